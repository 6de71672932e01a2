//! Per-frame simulation step
//!
//! Advances one fixed timestep: purge, spawn, fall, fade. The countdown
//! clock is driven separately at 1 Hz (see `session`); this function never
//! touches it.

use rand::Rng;

use super::state::{Circle, GamePhase, GameState};
use crate::consts::SPAWN_PROBABILITY;

/// Advance the game state by one simulation tick.
///
/// No-op unless the session is running. Circles flagged for removal on the
/// previous tick are purged before anything moves, so a circle past the
/// terminal boundary is never advanced twice.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;

    // Purge pass: consumed/fallen circles and faded particles leave the
    // live collections before this tick's updates
    state.circles.retain(|c| !c.to_remove);
    state.particles.retain(|p| !p.is_dead());

    maybe_spawn(state);

    for circle in &mut state.circles {
        circle.advance();
    }

    for particle in &mut state.particles {
        particle.advance();
    }
}

/// Stochastic spawner: one uniform draw per tick against the fixed
/// spawn probability. No cap on live circles beyond natural attrition.
fn maybe_spawn(state: &mut GameState) {
    if state.rng.random::<f32>() < SPAWN_PROBABILITY {
        let id = state.next_entity_id();
        let circle = Circle::spawn(id, &mut state.rng);
        state.circles.push(circle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::session;
    use crate::sim::state::Color;
    use glam::Vec2;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        session::start(&mut state);
        state.drain_events();
        state
    }

    /// Plant a circle at a fixed position, bypassing the spawner
    fn plant_circle(state: &mut GameState, y: f32, color: Color) -> u32 {
        let id = state.next_entity_id();
        state.circles.push(Circle {
            id,
            x: 100.0,
            y,
            radius: CIRCLE_RADIUS,
            speed: 2.0,
            color,
            in_zone: crate::sim::zone::in_target_zone(y),
            to_remove: false,
        });
        id
    }

    #[test]
    fn test_tick_ignored_when_not_running() {
        let mut state = GameState::new(42);
        assert_eq!(state.phase, GamePhase::Idle);
        tick(&mut state);
        assert_eq!(state.time_ticks, 0);
        assert!(state.circles.is_empty());
    }

    #[test]
    fn test_circles_fall_monotonically() {
        let mut state = running_state(42);
        let id = plant_circle(&mut state, 50.0, Color::Red);
        let mut last_y = 50.0;
        for _ in 0..20 {
            tick(&mut state);
            let c = state.circles.iter().find(|c| c.id == id).unwrap();
            assert!(c.y > last_y);
            last_y = c.y;
        }
    }

    #[test]
    fn test_zone_flag_follows_position() {
        let mut state = running_state(1);
        let id = plant_circle(&mut state, ZONE_TOP - 2.0, Color::Blue);
        tick(&mut state);
        // speed 2.0 lands it exactly on the zone top edge
        let c = state.circles.iter().find(|c| c.id == id).unwrap();
        assert_eq!(c.y, ZONE_TOP);
        assert!(c.in_zone);
    }

    #[test]
    fn test_fallen_circle_flagged_then_purged() {
        let mut state = running_state(1);
        let id = plant_circle(&mut state, REMOVAL_Y - 1.0, Color::Green);

        tick(&mut state);
        let c = state.circles.iter().find(|c| c.id == id).unwrap();
        assert!(c.to_remove, "circle past the removal line must be flagged");
        assert!(!c.in_zone, "grace band circles are not zone residents");

        tick(&mut state);
        // Purged at the start of the next tick, never advanced again
        assert!(!state.circles.iter().any(|c| c.id == id));
    }

    #[test]
    fn test_dead_particles_purged() {
        let mut state = running_state(5);
        state.spawn_burst(Vec2::new(100.0, 300.0), Color::Yellow, BURST_COUNT);
        assert_eq!(state.particles.len(), BURST_COUNT);

        // Alpha decays 0.02/tick from 1.0: all dead within 51 ticks, purged
        // one tick later
        for _ in 0..52 {
            tick(&mut state);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_spawner_rate_is_plausible() {
        let mut state = running_state(777);
        let mut spawned = 0;
        for _ in 0..10_000 {
            tick(&mut state);
            // The field is cleared each tick, so whatever is present was
            // spawned this tick (0 or 1 circles)
            spawned += state.circles.len();
            state.circles.clear();
        }
        // Expectation is 200 at p = 0.02; generous bounds to stay seed-robust
        assert!((100..=350).contains(&spawned), "spawned {spawned} circles");
    }

    #[test]
    fn test_determinism() {
        let mut a = running_state(99999);
        let mut b = running_state(99999);
        for _ in 0..600 {
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.circles.len(), b.circles.len());
        for (ca, cb) in a.circles.iter().zip(&b.circles) {
            assert_eq!(ca.id, cb.id);
            assert_eq!(ca.x, cb.x);
            assert_eq!(ca.y, cb.y);
            assert_eq!(ca.color, cb.color);
        }
    }
}
