//! Simulation tick
//!
//! One call advances a run by one step: ball physics and landing, camera
//! scroll and level generation, pruning, game-over detection, difficulty.
//! Moving platform kinematics are frame-time driven and run separately
//! (see [`super::kinematics`]), before each tick.

use super::state::{GameEvent, RunState};
use super::{difficulty, physics, viewport};

/// Advance the run by one tick using the held directions in `state.input`
pub fn tick(state: &mut RunState) {
    // A finished run is frozen
    if !state.running {
        return;
    }

    state.time_ticks += 1;

    let input = state.input;
    if let Some(platform_id) = physics::step_ball(state, input) {
        state.events.push(GameEvent::Landed { platform_id });
    }

    viewport::scroll(state);
    viewport::prune(state);

    if state.ball.pos.y > state.viewport.height {
        state.running = false;
        state.input.release();
        log::info!(
            "Run {} over after {} ticks: score {}, level {}",
            state.seed,
            state.time_ticks,
            state.score,
            state.current_level
        );
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        return;
    }

    difficulty::advance(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::input::InputState;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    fn new_run(seed: u64) -> RunState {
        RunState::new(seed, Viewport::new(400.0, 800.0), Tuning::default())
    }

    fn game_overs(state: &mut RunState) -> usize {
        state
            .drain_events()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count()
    }

    #[test]
    fn test_first_tick_lands_on_seed_platform() {
        let mut state = new_run(12345);
        assert_eq!(state.platforms[0].pos, Vec2::new(150.0, 440.0));

        tick(&mut state);
        assert!((state.ball.pos.y - 400.4).abs() < 1e-4);
        // Bottom edge at 440.4 is inside the seed platform's band
        assert_eq!(state.ball.vel.y, -15.0);
        let seed_id = state.platforms[0].id;
        assert!(
            state
                .drain_events()
                .any(|e| e == GameEvent::Landed { platform_id: seed_id })
        );
    }

    #[test]
    fn test_fall_ends_run_exactly_once() {
        let mut state = new_run(12345);
        tick(&mut state);
        state.platforms.clear();
        state.drain_events().for_each(drop);

        let mut overs = 0;
        let mut last_score = 0;
        for _ in 0..10_000 {
            if !state.running {
                break;
            }
            tick(&mut state);
            last_score = state.score;
            overs += game_overs(&mut state);
        }

        assert!(!state.running);
        assert!(state.ball.pos.y > 800.0);
        assert_eq!(overs, 1);

        // Frozen afterwards
        let ticks = state.time_ticks;
        let y = state.ball.pos.y;
        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.ball.pos.y, y);
        assert_eq!(game_overs(&mut state), 0);
        assert_eq!(state.score, last_score);
    }

    #[test]
    fn test_game_over_carries_score() {
        let mut state = new_run(77);
        state.platforms.clear();
        state.max_height = 51_234.0;
        state.score = 5123;
        state.ball.pos.y = 790.0;
        state.ball.vel.y = 20.0;
        state.drain_events().for_each(drop);

        tick(&mut state);
        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::GameOver { final_score: 5123 }));
    }

    #[test]
    fn test_scroll_shift_applies_to_every_platform() {
        let mut state = new_run(5);
        tick(&mut state); // bounce
        let before: Vec<(u32, f32)> = state.platforms.iter().map(|p| (p.id, p.pos.y)).collect();
        state.drain_events().for_each(drop);

        tick(&mut state);
        let offset = state
            .drain_events()
            .find_map(|e| match e {
                GameEvent::Scrolled { offset } => Some(offset),
                _ => None,
            })
            .expect("rising ball scrolls");

        for (id, y) in before {
            if let Some(p) = state.platforms.iter().find(|p| p.id == id) {
                assert!((p.pos.y - (y + offset)).abs() < 1e-3, "platform {id}");
            }
        }
        assert_eq!(state.ball.pos.y, 400.0);
    }

    #[test]
    fn test_difficulty_through_ticks() {
        let mut state = new_run(8);
        state.difficulty_timer = 1500;
        let speeds: Vec<f32> = state.platforms.iter().filter_map(|p| p.speed()).collect();
        tick(&mut state);
        let after: Vec<f32> = state.platforms.iter().filter_map(|p| p.speed()).collect();
        assert_eq!(speeds.len(), after.len());
        for (a, b) in speeds.iter().zip(&after) {
            assert!((b - (a + 0.5).min(5.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = new_run(99999);
        let mut b = new_run(99999);
        let inputs = [
            InputState { left: false, right: true },
            InputState::default(),
            InputState { left: true, right: false },
        ];

        for i in 0..600 {
            let input = inputs[i % inputs.len()];
            a.input = input;
            b.input = input;
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.ball, b.ball);
        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases(
            seed in any::<u64>(),
            inputs in prop::collection::vec((any::<bool>(), any::<bool>()), 1..400),
        ) {
            let mut state = new_run(seed);
            let mut last = state.score;
            for (left, right) in inputs {
                state.input = InputState { left, right };
                tick(&mut state);
                prop_assert!(state.score >= last);
                last = state.score;
            }
        }
    }
}
