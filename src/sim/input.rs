//! Click resolution
//!
//! Maps a color-button press to hit / wrong-match / idle-click outcomes
//! against every circle currently resident in the tap zone.

use glam::Vec2;

use super::state::{Color, GamePhase, GameState, SessionEvent};
use crate::consts::{HIT_BONUS, IDLE_CLICK_PENALTY, WRONG_MATCH_PENALTY};

/// What a single click did to the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Net score change (negative deltas are clamped by the zero floor)
    pub score_delta: i32,
    /// Circles consumed by this click
    pub hits: u32,
    /// Zone residents of a different color that were evaluated
    pub wrong_matches: u32,
    /// Whether any circle was in the zone when the click fired
    pub any_zone_resident: bool,
}

/// Resolve one color selection against all live zone residents.
///
/// Every resident is evaluated independently: when two circles overlap the
/// zone, one click can score several hits and wrong-matches in the same call.
/// Ignored outside the Running phase.
pub fn resolve_click(state: &mut GameState, selected: Color) -> ClickOutcome {
    let mut outcome = ClickOutcome::default();
    if state.phase != GamePhase::Running {
        return outcome;
    }

    let score_before = state.score as i64;
    let mut bursts: Vec<(Vec2, Color)> = Vec::new();
    let mut events: Vec<SessionEvent> = Vec::new();

    for circle in state.circles.iter_mut() {
        if !circle.in_zone || circle.to_remove {
            continue;
        }
        outcome.any_zone_resident = true;

        if circle.color == selected {
            state.score += HIT_BONUS;
            circle.to_remove = true;
            outcome.hits += 1;
            let pos = Vec2::new(circle.x, circle.y);
            bursts.push((pos, circle.color));
            events.push(SessionEvent::Hit {
                pos,
                color: circle.color,
            });
        } else {
            // A wrong match is purely a scoring event: the circle stays live
            // and can be matched again later
            state.score = state.score.saturating_sub(WRONG_MATCH_PENALTY);
            outcome.wrong_matches += 1;
            events.push(SessionEvent::WrongColor);
        }
    }

    if !outcome.any_zone_resident {
        state.score = state.score.saturating_sub(IDLE_CLICK_PENALTY);
        events.push(SessionEvent::IdleClick);
    }

    for (pos, color) in bursts {
        state.spawn_burst(pos, color, crate::consts::BURST_COUNT);
    }
    for event in events {
        state.push_event(event);
    }

    outcome.score_delta = (state.score as i64 - score_before) as i32;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::session;
    use crate::sim::state::Circle;
    use proptest::prelude::*;

    fn running_state_with_score(score: u32) -> GameState {
        let mut state = GameState::new(11);
        session::start(&mut state);
        state.drain_events();
        state.score = score;
        state
    }

    fn plant_zone_circle(state: &mut GameState, color: Color) -> u32 {
        let id = state.next_entity_id();
        state.circles.push(Circle {
            id,
            x: 175.0,
            y: ZONE_TOP + 10.0,
            radius: CIRCLE_RADIUS,
            speed: 2.0,
            color,
            in_zone: true,
            to_remove: false,
        });
        id
    }

    fn plant_above_zone_circle(state: &mut GameState, color: Color) -> u32 {
        let id = state.next_entity_id();
        state.circles.push(Circle {
            id,
            x: 175.0,
            y: 100.0,
            radius: CIRCLE_RADIUS,
            speed: 2.0,
            color,
            in_zone: false,
            to_remove: false,
        });
        id
    }

    #[test]
    fn test_hit_scores_and_flags() {
        let mut state = running_state_with_score(40);
        let id = plant_zone_circle(&mut state, Color::Red);

        let outcome = resolve_click(&mut state, Color::Red);
        assert_eq!(state.score, 50);
        assert_eq!(outcome.score_delta, HIT_BONUS as i32);
        assert_eq!(outcome.hits, 1);
        assert!(outcome.any_zone_resident);
        assert!(state.circles.iter().find(|c| c.id == id).unwrap().to_remove);
        assert_eq!(state.particles.len(), BURST_COUNT);

        let events = state.drain_events();
        assert!(matches!(events[0], SessionEvent::Hit { .. }));
    }

    #[test]
    fn test_wrong_match_penalizes_but_keeps_circle() {
        let mut state = running_state_with_score(40);
        let id = plant_zone_circle(&mut state, Color::Blue);

        let outcome = resolve_click(&mut state, Color::Red);
        assert_eq!(state.score, 35);
        assert_eq!(outcome.score_delta, -(WRONG_MATCH_PENALTY as i32));
        assert_eq!(outcome.hits, 0);
        assert_eq!(outcome.wrong_matches, 1);
        assert!(!state.circles.iter().find(|c| c.id == id).unwrap().to_remove);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_wrong_match_floors_at_zero() {
        let mut state = running_state_with_score(0);
        let id = plant_zone_circle(&mut state, Color::Blue);

        let outcome = resolve_click(&mut state, Color::Red);
        assert_eq!(state.score, 0);
        assert_eq!(outcome.score_delta, 0);
        assert!(!state.circles.iter().find(|c| c.id == id).unwrap().to_remove);
    }

    #[test]
    fn test_idle_click_penalty() {
        let mut state = running_state_with_score(10);
        plant_above_zone_circle(&mut state, Color::Red);

        // The matching color exists but is outside the zone: idle click
        let outcome = resolve_click(&mut state, Color::Red);
        assert_eq!(state.score, 10 - IDLE_CLICK_PENALTY);
        assert!(!outcome.any_zone_resident);
        assert_eq!(state.drain_events(), vec![SessionEvent::IdleClick]);
    }

    #[test]
    fn test_idle_click_floors_at_zero() {
        let mut state = running_state_with_score(1);
        resolve_click(&mut state, Color::Green);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_one_click_evaluates_every_zone_resident() {
        let mut state = running_state_with_score(0);
        plant_zone_circle(&mut state, Color::Red);
        plant_zone_circle(&mut state, Color::Red);
        plant_zone_circle(&mut state, Color::Yellow);

        let outcome = resolve_click(&mut state, Color::Red);
        // Two hits (+20) and one wrong match (-5) compound in a single call
        assert_eq!(outcome.hits, 2);
        assert_eq!(outcome.wrong_matches, 1);
        assert_eq!(state.score, 15);
        assert_eq!(state.particles.len(), 2 * BURST_COUNT);
    }

    #[test]
    fn test_flagged_circle_excluded_from_resolution() {
        let mut state = running_state_with_score(0);
        let id = plant_zone_circle(&mut state, Color::Red);
        resolve_click(&mut state, Color::Red);
        assert_eq!(state.score, HIT_BONUS);

        // Still flagged, not yet purged: a second click cannot double-score
        // it, and with no other resident it counts as an idle click
        assert!(state.circles.iter().any(|c| c.id == id && c.to_remove));
        let outcome = resolve_click(&mut state, Color::Red);
        assert_eq!(outcome.hits, 0);
        assert!(!outcome.any_zone_resident);
        assert_eq!(state.score, HIT_BONUS - IDLE_CLICK_PENALTY);
    }

    #[test]
    fn test_click_ignored_when_not_running() {
        let mut state = GameState::new(11);
        state.score = 0;
        let outcome = resolve_click(&mut state, Color::Red);
        assert_eq!(outcome, ClickOutcome::default());
        assert!(state.drain_events().is_empty());
    }

    proptest! {
        #[test]
        fn prop_score_never_negative(clicks in proptest::collection::vec(0usize..4, 1..60)) {
            let mut state = running_state_with_score(0);
            for (i, &c) in clicks.iter().enumerate() {
                if i % 3 == 0 {
                    plant_zone_circle(&mut state, Color::ALL[i % 4]);
                }
                resolve_click(&mut state, Color::ALL[c]);
                crate::sim::tick::tick(&mut state);
                // u32 score cannot underflow; the meaningful property is that
                // every reported delta matches the floored arithmetic
                prop_assert!(state.score < 1_000_000);
            }
        }

        #[test]
        fn prop_delta_matches_score_change(start in 0u32..200, c in 0usize..4) {
            let mut state = running_state_with_score(start);
            plant_zone_circle(&mut state, Color::Red);
            let before = state.score as i64;
            let outcome = resolve_click(&mut state, Color::ALL[c]);
            prop_assert_eq!(outcome.score_delta as i64, state.score as i64 - before);
        }
    }
}
