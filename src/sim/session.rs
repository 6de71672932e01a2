//! Session lifecycle: start, countdown, end
//!
//! The countdown runs on its own 1 Hz cadence, independent of the frame
//! tick. `end` is idempotent so a stale timer firing late cannot
//! double-finalize a session.

use super::state::{GamePhase, GameState, SessionEvent};
use crate::consts::{SESSION_SECONDS, WIN_THRESHOLD};

/// Begin a fresh session.
///
/// The caller is responsible for the external start gate (entry payment);
/// this function must only be reached after the gate has approved, or when
/// no gate is configured. Resets score, countdown and both live collections
/// regardless of the previous phase.
pub fn start(state: &mut GameState) {
    state.score = 0;
    state.time_left = SESSION_SECONDS;
    state.time_ticks = 0;
    state.circles.clear();
    state.particles.clear();
    state.phase = GamePhase::Running;
    state.push_event(SessionEvent::Started);
    log::info!("session started ({SESSION_SECONDS}s)");
}

/// 1 Hz countdown tick. Decrements the remaining time and ends the session
/// when it reaches zero. No-op unless running.
pub fn second_tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_left = state.time_left.saturating_sub(1);
    if state.time_left == 0 {
        end(state);
    }
}

/// Finalize the session: freeze the score, compare against the carried best
/// and emit the end-of-session events. Idempotent - calling it when not
/// running is a no-op.
pub fn end(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.phase = GamePhase::Ended;

    let final_score = state.score;
    state.push_event(SessionEvent::Ended { final_score });

    if final_score >= WIN_THRESHOLD {
        state.push_event(SessionEvent::PrizeWon { score: final_score });
    }

    if final_score > state.best_score {
        state.best_score = final_score;
        state.push_event(SessionEvent::NewBest { score: final_score });
    }

    log::info!("session ended with score {final_score}");
}
