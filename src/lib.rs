//! Color Match Rush - a timed color-matching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, scoring, session state)
//! - `renderer`: Canvas2D rendering of the frame snapshot
//! - `platform`: Browser/native storage abstraction
//! - `scores`: Best score and leaderboard persistence
//! - `wallet`: Entry-fee authorization gate

pub mod platform;
pub mod scores;
pub mod settings;
pub mod sim;
pub mod wallet;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use scores::{BestScore, Leaderboard};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz logical tick rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (logical pixels)
    pub const PLAYFIELD_WIDTH: f32 = 350.0;
    pub const PLAYFIELD_HEIGHT: f32 = 400.0;

    /// Top edge of the tap zone
    pub const ZONE_TOP: f32 = PLAYFIELD_HEIGHT - 110.0;
    /// Zone membership ends here (exclusive); lower circles no longer score
    pub const ZONE_INNER_BOTTOM: f32 = PLAYFIELD_HEIGHT - 40.0;
    /// Circles past this line are flagged for removal
    pub const REMOVAL_Y: f32 = PLAYFIELD_HEIGHT - 30.0;

    /// Horizontal spawn margin on each side of the playfield
    pub const SPAWN_MARGIN: f32 = 30.0;
    /// Circles spawn above the visible playfield
    pub const SPAWN_Y: f32 = -30.0;
    /// Circle radius
    pub const CIRCLE_RADIUS: f32 = 25.0;
    /// Fall speed band, pixels per simulation tick:
    /// uniform in [MIN_FALL_SPEED, MIN_FALL_SPEED + FALL_SPEED_RANGE)
    pub const MIN_FALL_SPEED: f32 = 2.0;
    pub const FALL_SPEED_RANGE: f32 = 2.0;
    /// Per-tick probability of spawning a circle while running
    pub const SPAWN_PROBABILITY: f32 = 0.02;

    /// Session duration in seconds
    pub const SESSION_SECONDS: u32 = 20;
    /// Score awarded for a correct match
    pub const HIT_BONUS: u32 = 10;
    /// Penalty for clicking the wrong color while a circle is in the zone
    pub const WRONG_MATCH_PENALTY: u32 = 5;
    /// Penalty for clicking with no circle in the zone
    pub const IDLE_CLICK_PENALTY: u32 = 2;
    /// Final score at or above this wins the prize
    pub const WIN_THRESHOLD: u32 = 100;

    /// Particles per hit burst
    pub const BURST_COUNT: usize = 20;
    /// Particle velocity components: uniform in [-PARTICLE_SPREAD, PARTICLE_SPREAD)
    pub const PARTICLE_SPREAD: f32 = 2.5;
    /// Particle size: uniform in [PARTICLE_MIN_SIZE, PARTICLE_MAX_SIZE)
    pub const PARTICLE_MIN_SIZE: f32 = 2.0;
    pub const PARTICLE_MAX_SIZE: f32 = 6.0;
    /// Opacity lost per tick
    pub const PARTICLE_ALPHA_DECAY: f32 = 0.02;
    /// Downward acceleration per tick
    pub const PARTICLE_GRAVITY: f32 = 0.08;
    /// Multiplicative size shrink per tick
    pub const PARTICLE_SHRINK: f32 = 0.97;
    /// Hard cap on live particles (oldest evicted first)
    pub const MAX_PARTICLES: usize = 256;
}
