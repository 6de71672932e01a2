//! Game state and core simulation types
//!
//! Everything the renderer and driver observe lives here. The state is
//! deterministic: all randomness flows through the seeded RNG it owns.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// The fixed circle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

impl Color {
    pub const ALL: [Self; 4] = [Self::Red, Self::Blue, Self::Green, Self::Yellow];

    /// CSS color used for drawing and particle tinting
    pub fn css(self) -> &'static str {
        match self {
            Self::Red => "#e74c3c",
            Self::Blue => "#3498db",
            Self::Green => "#2ecc71",
            Self::Yellow => "#f1c40f",
        }
    }

    /// Lowercase name matching the `data-color` attribute on the UI buttons
    pub fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "red" => Some(Self::Red),
            "blue" => Some(Self::Blue),
            "green" => Some(Self::Green),
            "yellow" => Some(Self::Yellow),
            _ => None,
        }
    }

    /// Draw a color uniformly from the palette
    pub fn sample(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A falling circle - one scoring opportunity
#[derive(Debug, Clone)]
pub struct Circle {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Fall speed in pixels per simulation tick, fixed at spawn
    pub speed: f32,
    pub color: Color,
    /// Recomputed every tick from the current vertical position
    pub in_zone: bool,
    /// Flagged circles are purged before the next tick's update pass
    pub to_remove: bool,
}

impl Circle {
    /// Spawn a new circle above the playfield at a random column
    pub fn spawn(id: u32, rng: &mut impl Rng) -> Self {
        Self {
            id,
            x: rng.random_range(SPAWN_MARGIN..PLAYFIELD_WIDTH - SPAWN_MARGIN),
            y: SPAWN_Y,
            radius: CIRCLE_RADIUS,
            speed: rng.random_range(MIN_FALL_SPEED..MIN_FALL_SPEED + FALL_SPEED_RANGE),
            color: Color::sample(rng),
            in_zone: false,
            to_remove: false,
        }
    }

    /// Advance one tick: fall, retest zone membership, flag once past the
    /// removal line
    pub fn advance(&mut self) {
        self.y += self.speed;
        self.in_zone = super::zone::in_target_zone(self.y);
        if super::zone::past_removal_line(self.y) {
            self.to_remove = true;
        }
    }
}

/// A burst particle - purely cosmetic feedback on a hit
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// 1.0 at birth, decays every tick; dead at <= 0
    pub alpha: f32,
    pub size: f32,
}

impl Particle {
    pub fn new(pos: Vec2, color: Color, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            vel: Vec2::new(
                rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
                rng.random_range(-PARTICLE_SPREAD..PARTICLE_SPREAD),
            ),
            color,
            alpha: 1.0,
            size: rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE),
        }
    }

    /// Advance one tick: drift, sink, fade, shrink
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.alpha -= PARTICLE_ALPHA_DECAY;
        self.size *= PARTICLE_SHRINK;
    }

    pub fn is_dead(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// No session yet, or the previous one has been acknowledged
    Idle,
    /// Timer active, circles falling, input accepted
    Running,
    /// Timer expired; score finalized, awaiting restart
    Ended,
}

/// Outward-facing notifications, drained by the driver each frame.
///
/// The sim never calls into rendering, audio or persistence; collaborators
/// observe these events instead.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A fresh session began
    Started,
    /// Correct match: the circle at `pos` was consumed
    Hit { pos: Vec2, color: Color },
    /// Wrong color clicked while at least one circle was in the zone
    WrongColor,
    /// Click landed with no circle in the zone
    IdleClick,
    /// Session over; `final_score` is authoritative
    Ended { final_score: u32 },
    /// Final score beat the stored best
    NewBest { score: u32 },
    /// Final score reached the win threshold
    PrizeWon { score: u32 },
}

/// Complete game state for one session plus the carried best score
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from, kept for reproducing a session in tests
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Never goes negative; penalties saturate at zero
    pub score: u32,
    /// Whole seconds remaining, decremented by the 1 Hz countdown
    pub time_left: u32,
    /// Best score carried across sessions (persisted by the driver)
    pub best_score: u32,
    /// Simulation tick counter for the current session
    pub time_ticks: u64,
    pub circles: Vec<Circle>,
    pub particles: Vec<Particle>,
    events: Vec<SessionEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game state with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            time_left: SESSION_SECONDS,
            best_score: 0,
            time_ticks: 0,
            circles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new circle ID
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Circles currently eligible for scoring
    pub fn zone_residents(&self) -> impl Iterator<Item = &Circle> {
        self.circles.iter().filter(|c| c.in_zone && !c.to_remove)
    }

    /// Spawn a particle burst at a scoring position, evicting the oldest
    /// particles when the cap is reached
    pub(crate) fn spawn_burst(&mut self, pos: Vec2, color: Color, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let particle = Particle::new(pos, color, &mut self.rng);
            self.particles.push(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_round_trip() {
        for color in Color::ALL {
            assert_eq!(Color::from_name(color.name()), Some(color));
        }
        assert_eq!(Color::from_name("purple"), None);
    }

    #[test]
    fn test_spawn_within_margins() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..200 {
            let c = Circle::spawn(id, &mut rng);
            assert!(c.x >= crate::consts::SPAWN_MARGIN);
            assert!(c.x < crate::consts::PLAYFIELD_WIDTH - crate::consts::SPAWN_MARGIN);
            assert!(c.speed >= crate::consts::MIN_FALL_SPEED);
            assert!(c.speed < crate::consts::MIN_FALL_SPEED + crate::consts::FALL_SPEED_RANGE);
            assert!(!c.in_zone);
            assert!(!c.to_remove);
        }
    }

    #[test]
    fn test_burst_respects_particle_cap() {
        let mut state = GameState::new(1);
        for _ in 0..30 {
            state.spawn_burst(Vec2::new(100.0, 100.0), Color::Red, crate::consts::BURST_COUNT);
        }
        assert!(state.particles.len() <= crate::consts::MAX_PARTICLES);
    }

    #[test]
    fn test_particle_fades_out() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut p = Particle::new(Vec2::ZERO, Color::Green, &mut rng);
        assert!(!p.is_dead());
        for _ in 0..60 {
            p.advance();
        }
        assert!(p.is_dead());
    }
}
