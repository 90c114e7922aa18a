//! Procedural level generation
//!
//! A level is one row of static platforms plus a row of moving platforms
//! `level_spacing` above it. Horizontal placement is a bounded retry: each
//! candidate x must keep `placement_separation` platform widths from every x
//! already placed in the batch, and after `placement_attempts` misses the
//! last candidate is taken anyway. Overlap is therefore possible on narrow
//! viewports.

use glam::Vec2;
use rand::Rng;

use super::state::{Platform, PlatformKind, RunState};

/// Result of placing one platform horizontally
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    /// Candidates sampled, including the accepted one
    pub attempts: u32,
    /// Whether the accepted x clears every earlier x in the batch
    pub separated: bool,
}

/// A freshly generated batch, not yet part of the live set
#[derive(Debug, Clone)]
pub struct LevelBatch {
    pub platforms: Vec<Platform>,
    /// Placement attempts spent per platform (same order as `platforms`)
    pub attempts: Vec<u32>,
}

/// Sample x in `[0, span]`, retrying while it crowds a used slot
pub fn place_x<R: Rng + ?Sized>(
    rng: &mut R,
    span: f32,
    used: &[f32],
    min_gap: f32,
    max_attempts: u32,
) -> Placement {
    let max_attempts = max_attempts.max(1);
    let mut attempts = 0;
    loop {
        let x = if span > 0.0 {
            rng.random_range(0.0..span)
        } else {
            0.0
        };
        attempts += 1;

        let separated = used.iter().all(|&u| (x - u).abs() >= min_gap);
        if separated || attempts >= max_attempts {
            return Placement {
                x,
                attempts,
                separated,
            };
        }
    }
}

/// Build one level with its static row at `base_y`
pub fn generate_level(state: &mut RunState, base_y: f32) -> LevelBatch {
    let tuning = state.tuning.clone();
    let size = Vec2::new(tuning.platform_width, tuning.platform_height);
    let span = state.viewport.width - tuning.platform_width;
    let min_gap = tuning.platform_width * tuning.placement_separation;

    let (static_min, static_max) = tuning.static_platforms;
    let (moving_min, moving_max) = tuning.moving_platforms;
    let static_count = state.rng.random_range(static_min..=static_max);
    let moving_count = state.rng.random_range(moving_min..=moving_max);
    let moving_y = base_y - tuning.level_spacing;

    let total = (static_count + moving_count) as usize;
    let mut used = Vec::with_capacity(total);
    let mut batch = LevelBatch {
        platforms: Vec::with_capacity(total),
        attempts: Vec::with_capacity(total),
    };
    let mut fallbacks = 0;

    for i in 0..static_count + moving_count {
        let placement = place_x(
            &mut state.rng,
            span,
            &used,
            min_gap,
            tuning.placement_attempts,
        );
        if !placement.separated {
            fallbacks += 1;
        }

        let (y, kind) = if i < static_count {
            (base_y, PlatformKind::Static)
        } else {
            let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
            let (lo, hi) = tuning.moving_speed_range;
            let speed = state.rng.random_range(lo..hi);
            (moving_y, PlatformKind::Moving { direction, speed })
        };

        let id = state.next_entity_id();
        batch.platforms.push(Platform::new(
            id,
            Vec2::new(placement.x, y),
            size,
            kind,
            tuning.level_height,
        ));
        batch.attempts.push(placement.attempts);
        used.push(placement.x);
    }

    if fallbacks > 0 {
        log::debug!(
            "Level at y={}: {} of {} platforms placed without clearance",
            base_y,
            fallbacks,
            total
        );
    }

    batch
}
