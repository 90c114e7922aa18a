//! Data-driven game balance
//!
//! Every constant the simulation reads comes through [`Tuning`] so a host can
//! load a JSON override without rebuilding. Missing fields fall back to
//! [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Ball ===
    pub ball_width: f32,
    pub ball_height: f32,
    pub move_speed: f32,
    pub friction: f32,
    pub gravity: f32,
    pub jump_force: f32,

    // === Platforms ===
    pub platform_width: f32,
    pub platform_height: f32,
    pub landing_tolerance: f32,

    // === Level generation ===
    pub level_height: f32,
    pub level_spacing: f32,
    pub bootstrap_levels: u32,
    pub static_platforms: (u32, u32),
    pub moving_platforms: (u32, u32),
    pub placement_attempts: u32,
    pub placement_separation: f32,
    pub moving_speed_range: (f32, f32),

    // === Viewport / score ===
    pub prune_margin: f32,
    pub score_divisor: f32,

    // === Difficulty ===
    pub difficulty_interval_ticks: u32,
    pub difficulty_speed_step: f32,
    pub difficulty_speed_cap: f32,

    // === Session ===
    pub reward_threshold: u64,
    pub countdown_secs: u32,
    pub nominal_frame_ms: f32,
    pub max_frame_gap_ms: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_width: BALL_WIDTH,
            ball_height: BALL_HEIGHT,
            move_speed: BALL_MOVE_SPEED,
            friction: FRICTION,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,

            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            landing_tolerance: LANDING_TOLERANCE,

            level_height: LEVEL_HEIGHT,
            level_spacing: LEVEL_SPACING,
            bootstrap_levels: BOOTSTRAP_LEVELS,
            static_platforms: (STATIC_PLATFORMS_MIN, STATIC_PLATFORMS_MAX),
            moving_platforms: (MOVING_PLATFORMS_MIN, MOVING_PLATFORMS_MAX),
            placement_attempts: PLACEMENT_ATTEMPTS,
            placement_separation: PLACEMENT_SEPARATION,
            moving_speed_range: (MOVING_SPEED_MIN, MOVING_SPEED_MAX),

            prune_margin: PRUNE_MARGIN,
            score_divisor: SCORE_DIVISOR,

            difficulty_interval_ticks: DIFFICULTY_INTERVAL_TICKS,
            difficulty_speed_step: DIFFICULTY_SPEED_STEP,
            difficulty_speed_cap: DIFFICULTY_SPEED_CAP,

            reward_threshold: REWARD_THRESHOLD,
            countdown_secs: COUNTDOWN_SECS,
            nominal_frame_ms: NOMINAL_FRAME_MS,
            max_frame_gap_ms: MAX_FRAME_GAP_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        positive("ball_width", self.ball_width)?;
        positive("ball_height", self.ball_height)?;
        positive("platform_width", self.platform_width)?;
        positive("platform_height", self.platform_height)?;
        positive("level_height", self.level_height)?;
        positive("score_divisor", self.score_divisor)?;
        positive("nominal_frame_ms", self.nominal_frame_ms)?;

        if !(self.max_frame_gap_ms >= 0.0 && self.max_frame_gap_ms.is_finite()) {
            return Err(TuningError::Invalid {
                field: "max_frame_gap_ms",
                reason: "must be a non-negative finite number",
            });
        }

        if self.jump_force >= 0.0 {
            return Err(TuningError::Invalid {
                field: "jump_force",
                reason: "must be negative (upward)",
            });
        }
        if self.static_platforms.0 > self.static_platforms.1 {
            return Err(TuningError::Invalid {
                field: "static_platforms",
                reason: "min exceeds max",
            });
        }
        if self.moving_platforms.0 > self.moving_platforms.1 {
            return Err(TuningError::Invalid {
                field: "moving_platforms",
                reason: "min exceeds max",
            });
        }
        if self.moving_speed_range.0 >= self.moving_speed_range.1 {
            return Err(TuningError::Invalid {
                field: "moving_speed_range",
                reason: "must be a non-empty [min, max) range",
            });
        }
        if self.placement_attempts == 0 {
            return Err(TuningError::Invalid {
                field: "placement_attempts",
                reason: "must allow at least one attempt",
            });
        }
        Ok(())
    }
}
