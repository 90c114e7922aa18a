//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame callback, per-tick units
//! - Seeded RNG only
//! - Stable iteration order (platform insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod kinematics;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;
pub mod viewport;

pub use collision::{find_landing, has_landing};
pub use kinematics::{delta_factor, update_moving_platforms};
pub use level::{LevelBatch, Placement, generate_level, place_x};
pub use physics::step_ball;
pub use state::{Ball, GameEvent, Platform, PlatformKind, RunState, level_index};
pub use tick::tick;
pub use viewport::{prune, scroll};
