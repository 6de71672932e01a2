//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! Two independent cadences drive it: the per-frame `tick` (spawning,
//! falling, particle decay) and the 1 Hz `session::second_tick` countdown.

pub mod input;
pub mod session;
pub mod state;
pub mod tick;
pub mod zone;

pub use input::{ClickOutcome, resolve_click};
pub use session::{end, second_tick, start};
pub use state::{Circle, Color, GamePhase, GameState, Particle, SessionEvent};
pub use tick::tick;
pub use zone::{in_target_zone, past_removal_line};
