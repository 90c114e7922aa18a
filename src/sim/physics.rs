//! Ball physics
//!
//! Per-tick units throughout: velocities are distance per tick, gravity is
//! distance per tick².

use super::collision::find_landing;
use super::state::RunState;
use crate::input::InputState;

/// Advance the ball one tick. Returns the platform it landed on, if any.
pub fn step_ball(state: &mut RunState, input: InputState) -> Option<u32> {
    let tuning = &state.tuning;
    let width = state.viewport.width;
    let ball = &mut state.ball;

    // Held direction sets speed outright; otherwise friction decays it
    if input.right {
        ball.vel.x = tuning.move_speed;
    } else if input.left {
        ball.vel.x = -tuning.move_speed;
    } else {
        ball.vel.x *= tuning.friction;
    }

    ball.pos.x += ball.vel.x;

    // Teleport wrap at the side edges
    if ball.pos.x > width {
        ball.pos.x = -ball.size.x;
    } else if ball.pos.x + ball.size.x < 0.0 {
        ball.pos.x = width;
    }

    ball.vel.y += tuning.gravity;
    ball.pos.y += ball.vel.y;

    let landed = find_landing(ball, &state.platforms, tuning.landing_tolerance).map(|p| p.id);
    if landed.is_some() {
        ball.vel.y = tuning.jump_force;
    }
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Viewport;
    use crate::sim::state::{Platform, PlatformKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state() -> RunState {
        RunState::bare(1, Viewport::new(400.0, 800.0), Tuning::default())
    }

    fn seed_platform() -> Platform {
        Platform::new(
            1,
            Vec2::new(150.0, 440.0),
            Vec2::new(100.0, 20.0),
            PlatformKind::Static,
            200.0,
        )
    }

    #[test]
    fn test_gravity_from_rest() {
        let mut state = state();
        assert_eq!(step_ball(&mut state, InputState::default()), None);
        assert!((state.ball.vel.y - 0.4).abs() < 1e-6);
        assert!((state.ball.pos.y - 400.4).abs() < 1e-4);
    }

    #[test]
    fn test_steering_is_absolute() {
        let mut state = state();
        state.ball.vel.x = -3.0;
        step_ball(&mut state, InputState { left: false, right: true });
        assert_eq!(state.ball.vel.x, 7.0);
        assert_eq!(state.ball.pos.x, 187.0);

        step_ball(&mut state, InputState { left: true, right: false });
        assert_eq!(state.ball.vel.x, -7.0);

        // Right wins when both are held
        step_ball(&mut state, InputState { left: true, right: true });
        assert_eq!(state.ball.vel.x, 7.0);
    }

    #[test]
    fn test_friction_decay() {
        let mut state = state();
        state.ball.vel.x = 10.0;
        step_ball(&mut state, InputState::default());
        assert!((state.ball.vel.x - 9.0).abs() < 1e-5);
        step_ball(&mut state, InputState::default());
        assert!((state.ball.vel.x - 8.1).abs() < 1e-5);
    }

    #[test]
    fn test_wrap_right_to_left() {
        let mut state = state();
        state.ball.pos.x = 400.0 - 40.0 + 1.0;
        state.ball.vel.x = 50.0;
        step_ball(&mut state, InputState::default());
        // 361 + 45 > 400, so the ball reappears off the left edge
        assert_eq!(state.ball.pos.x, -40.0);
    }

    #[test]
    fn test_wrap_left_to_right() {
        let mut state = state();
        state.ball.pos.x = -35.0;
        step_ball(&mut state, InputState { left: true, right: false });
        assert_eq!(state.ball.pos.x, 400.0);
    }

    #[test]
    fn test_bounce_is_hard_set() {
        for incoming in [0.1, 2.0, 5.0, 9.6] {
            let mut state = state();
            state.platforms.push(seed_platform());
            // Place the ball so this tick's fall ends inside the landing band
            state.ball.pos.y = 402.0 - incoming;
            state.ball.vel.y = incoming - 0.4;

            let landed = step_ball(&mut state, InputState::default());
            assert_eq!(landed, Some(1), "incoming vy={incoming}");
            assert_eq!(state.ball.vel.y, -15.0);
        }
    }

    #[test]
    fn test_rising_ball_passes_through() {
        let mut state = state();
        state.platforms.push(seed_platform());
        state.ball.pos.y = 415.0;
        state.ball.vel.y = -8.0;
        assert_eq!(step_ball(&mut state, InputState::default()), None);
        assert!((state.ball.vel.y + 7.6).abs() < 1e-5);
    }
}
