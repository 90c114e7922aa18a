//! Time-based difficulty
//!
//! Every `difficulty_interval_ticks` ticks all live moving platforms speed up
//! by a fixed step, up to a cap. Height and level count play no part.

use super::state::{GameEvent, PlatformKind, RunState};

/// Advance the difficulty timer by one tick. Returns true on a speed-up.
pub fn advance(state: &mut RunState) -> bool {
    state.difficulty_timer += 1;
    if state.difficulty_timer <= state.tuning.difficulty_interval_ticks {
        return false;
    }
    state.difficulty_timer = 0;

    let step = state.tuning.difficulty_speed_step;
    let cap = state.tuning.difficulty_speed_cap;
    let mut raised = 0;
    for platform in &mut state.platforms {
        if let PlatformKind::Moving { speed, .. } = &mut platform.kind {
            // Never lower a platform that already exceeds the cap
            *speed = (*speed + step).min(cap).max(*speed);
            raised += 1;
        }
    }

    log::debug!("Difficulty raised: {} moving platforms sped up", raised);
    state.events.push(GameEvent::DifficultyRaised);
    true
}
