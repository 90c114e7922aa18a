//! Moving platform kinematics
//!
//! Runs once per rendered frame, scaled by wall-clock time rather than by
//! simulation ticks, so platform speed does not depend on frame rate.

use super::state::{Platform, PlatformKind};
use crate::tuning::Tuning;

/// Convert elapsed milliseconds into nominal-frame units
pub fn delta_factor(elapsed_ms: f32, tuning: &Tuning) -> f32 {
    elapsed_ms.clamp(0.0, tuning.max_frame_gap_ms) / tuning.nominal_frame_ms
}

/// Slide every moving platform and reflect it at the viewport edges.
///
/// The reflection only flips the direction; the platform may overshoot an
/// edge for a frame before travelling back.
pub fn update_moving_platforms(platforms: &mut [Platform], viewport_width: f32, delta: f32) {
    for platform in platforms.iter_mut() {
        let PlatformKind::Moving { direction, speed } = &mut platform.kind else {
            continue;
        };

        platform.pos.x += *direction * *speed * delta;

        let at_left = platform.pos.x <= 0.0 && *direction < 0.0;
        let at_right = platform.pos.x + platform.size.x >= viewport_width && *direction > 0.0;
        if at_left || at_right {
            *direction = -*direction;
        }
    }
}
