//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Correct color match
    Correct,
    /// Wrong color while a circle was in the zone
    Wrong,
    /// Idle click with nothing in the zone
    IdleClick,
    /// Timer expired
    GameOver,
    /// New best score
    NewBest,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Correct => self.play_correct(ctx, vol),
            SoundEffect::Wrong => self.play_wrong(ctx, vol),
            SoundEffect::IdleClick => self.play_idle_click(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::NewBest => self.play_new_best(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Correct match - bright rising chime
    fn play_correct(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(520.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(1040.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Wrong color - low buzzer
    fn play_wrong(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.frequency().set_value_at_time(180.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(90.0, t + 0.2)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.22).ok();
    }

    /// Idle click - soft tick
    fn play_idle_click(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
    }

    /// Game over - descending three-note figure
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [392.0f32, 311.0, 233.0].iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) else {
                continue;
            };
            let start = t + i as f64 * 0.18;
            gain.gain().set_value_at_time(vol * 0.25, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.16)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.18).ok();
        }
    }

    /// New best score - ascending arpeggio
    fn play_new_best(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.0f32, 659.0, 784.0, 1047.0].iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) else {
                continue;
            };
            let start = t + i as f64 * 0.1;
            gain.gain().set_value_at_time(vol * 0.3, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.2)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.22).ok();
        }
    }
}
