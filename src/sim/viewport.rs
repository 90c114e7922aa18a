//! Camera scrolling, score and pruning
//!
//! The camera never moves. When the ball rises above mid-screen the whole
//! world shifts down by the overshoot and the ball is put back on the center
//! line; the accumulated shift is the height score.

use super::state::{GameEvent, RunState};

/// Scroll the world if the ball rose above center. Returns the applied offset.
pub fn scroll(state: &mut RunState) -> Option<f32> {
    let center = state.viewport.center_y();
    if state.ball.pos.y >= center {
        return None;
    }

    let offset = center - state.ball.pos.y;
    state.viewport_offset = offset;
    state.max_height += offset;
    state.score = (state.max_height / state.tuning.score_divisor).floor() as u64;

    for platform in &mut state.platforms {
        platform.pos.y += offset;
    }
    state.ball.pos.y = center;
    state.events.push(GameEvent::Scrolled { offset });

    // Nothing at or above the top edge any more: extend the frontier
    if state.frontier_y().is_none_or(|y| y > 0.0) {
        state.current_level += 1;
        let base_y = -state.tuning.level_height;
        let platforms = state.spawn_level(base_y);
        log::info!(
            "Level {} generated ({} platforms), score {}",
            state.current_level,
            platforms,
            state.score
        );
        state.events.push(GameEvent::LevelGenerated {
            level: state.current_level,
            platforms,
        });
    }

    Some(offset)
}

/// Drop platforms that scrolled well below the bottom edge. Returns how many.
pub fn prune(state: &mut RunState) -> usize {
    let limit = state.viewport.height + state.tuning.prune_margin;
    let before = state.platforms.len();
    state.platforms.retain(|p| p.pos.y < limit);
    before - state.platforms.len()
}
