//! Game settings and preferences
//!
//! Persisted separately from scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::storage;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles the renderer draws for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 128,
            QualityPreset::High => crate::consts::MAX_PARTICLES,
        }
    }

    /// Whether the tap zone border pulses
    pub fn zone_pulse_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Particle bursts on hits
    pub particles: bool,
    /// Glow ring around circles inside the tap zone
    pub zone_glow: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute when window loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no pulsing zone border, no glow rings)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            zone_glow: true,

            show_fps: false,

            master_volume: 0.8,
            sfx_volume: 1.0,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "color_match_settings";

    /// Effective cap on drawn particles
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective zone pulse (respects reduced_motion)
    pub fn effective_zone_pulse(&self) -> bool {
        self.quality.zone_pulse_enabled() && !self.reduced_motion
    }

    /// Effective zone glow (respects reduced_motion)
    pub fn effective_zone_glow(&self) -> bool {
        self.zone_glow && !self.reduced_motion
    }

    pub fn load() -> Self {
        if let Some(json) = storage::get(Self::STORAGE_KEY) {
            if let Ok(settings) = serde_json::from_str(&json) {
                log::info!("loaded settings");
                return settings;
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if !storage::set(Self::STORAGE_KEY, &json) {
                    log::warn!("settings not persisted (storage unavailable)");
                }
            }
            Err(e) => log::warn!("settings serialization failed: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_round_trip() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::from_str(preset.as_str()), Some(preset));
        }
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_particle_cap_respects_toggle() {
        let mut settings = Settings::default();
        assert_eq!(settings.max_particles(), 128);
        settings.particles = false;
        assert_eq!(settings.max_particles(), 0);
    }

    #[test]
    fn test_reduced_motion_overrides_effects() {
        let mut settings = Settings::default();
        assert!(settings.effective_zone_pulse());
        assert!(settings.effective_zone_glow());
        settings.reduced_motion = true;
        assert!(!settings.effective_zone_pulse());
        assert!(!settings.effective_zone_glow());
    }
}
