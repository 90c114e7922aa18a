//! Updraft - An endless vertical bouncing-ball platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scrolling, level generation)
//! - `session`: Run lifecycle (countdown, frame loop, game over, reward hand-off)
//! - `input`: Keyboard/touch events reduced to left/right flags
//! - `render`: Snapshots handed to whatever draws the game
//! - `reward`: Boundary contract for reporting a final score
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod render;
pub mod reward;
pub mod session;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{InputEvent, InputState, Key};
pub use render::{FrameSnapshot, PlatformView};
pub use reward::{RewardError, RewardReporter, RewardStatus};
pub use session::{Session, SessionEvent, SessionPhase};
pub use tuning::{Tuning, TuningError};

use serde::{Deserialize, Serialize};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal frame duration the kinematics speeds are expressed in (ms)
    pub const NOMINAL_FRAME_MS: f32 = 16.0;
    /// Longest frame gap the kinematics will integrate over (ms)
    pub const MAX_FRAME_GAP_MS: f32 = 250.0;

    /// Ball defaults
    pub const BALL_WIDTH: f32 = 40.0;
    pub const BALL_HEIGHT: f32 = 40.0;
    /// Horizontal speed while a direction is held (per tick)
    pub const BALL_MOVE_SPEED: f32 = 7.0;
    /// Horizontal velocity multiplier when no direction is held
    pub const FRICTION: f32 = 0.9;
    /// Downward acceleration (per tick²)
    pub const GRAVITY: f32 = 0.4;
    /// Vertical velocity set on landing (negative = up)
    pub const JUMP_FORCE: f32 = -15.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Extra depth below a platform top that still counts as a landing
    pub const LANDING_TOLERANCE: f32 = 5.0;

    /// Vertical distance between generated levels
    pub const LEVEL_HEIGHT: f32 = 200.0;
    /// Moving platforms sit this far above their level's static row
    pub const LEVEL_SPACING: f32 = 100.0;
    /// Levels generated above the seed platform at run start
    pub const BOOTSTRAP_LEVELS: u32 = 5;
    pub const STATIC_PLATFORMS_MIN: u32 = 5;
    pub const STATIC_PLATFORMS_MAX: u32 = 8;
    pub const MOVING_PLATFORMS_MIN: u32 = 2;
    pub const MOVING_PLATFORMS_MAX: u32 = 3;
    /// Resample budget per platform before accepting an overlapping slot
    pub const PLACEMENT_ATTEMPTS: u32 = 10;
    /// Minimum x gap between platforms in one batch, in platform widths
    pub const PLACEMENT_SEPARATION: f32 = 1.2;
    /// Initial moving platform speed range [min, max)
    pub const MOVING_SPEED_MIN: f32 = 1.0;
    pub const MOVING_SPEED_MAX: f32 = 3.0;

    /// Platforms this far below the bottom edge are dropped
    pub const PRUNE_MARGIN: f32 = 100.0;
    /// Height units per score point
    pub const SCORE_DIVISOR: f32 = 10.0;

    /// Ticks between moving platform speed-ups
    pub const DIFFICULTY_INTERVAL_TICKS: u32 = 1500;
    pub const DIFFICULTY_SPEED_STEP: f32 = 0.5;
    pub const DIFFICULTY_SPEED_CAP: f32 = 5.0;

    /// Minimum final score that is forwarded to the reward reporter
    pub const REWARD_THRESHOLD: u64 = 5000;
    /// Pre-run countdown length (seconds)
    pub const COUNTDOWN_SECS: u32 = 3;
}

/// Visible play area in screen units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical center line the camera keeps the ball on
    #[inline]
    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}
