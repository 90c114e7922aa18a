//! Run state and core simulation types
//!
//! Everything one run needs lives in [`RunState`]; nothing outlives it except
//! the final score handed to the session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Viewport;
use crate::input::InputState;
use crate::tuning::Tuning;

/// The player's ball (axis-aligned box, top-left anchored)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    /// Y of the ball's bottom edge
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// True while the ball is moving down the screen
    #[inline]
    pub fn is_descending(&self) -> bool {
        self.vel.y > 0.0
    }
}

/// Platform behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Static,
    /// Slides horizontally, reflecting at the viewport edges
    Moving { direction: f32, speed: f32 },
}

/// A platform the ball can land on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
    /// Generation band this platform was created in
    pub level: i32,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, size: Vec2, kind: PlatformKind, level_height: f32) -> Self {
        Self {
            id,
            pos,
            size,
            kind,
            level: level_index(pos.y, level_height),
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        matches!(self.kind, PlatformKind::Moving { .. })
    }

    /// Current speed for moving platforms
    pub fn speed(&self) -> Option<f32> {
        match self.kind {
            PlatformKind::Moving { speed, .. } => Some(speed),
            PlatformKind::Static => None,
        }
    }
}

/// Level band index for a y coordinate
#[inline]
pub fn level_index(y: f32, level_height: f32) -> i32 {
    (y / level_height).floor() as i32
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Descending ball bounced off a platform
    Landed { platform_id: u32 },
    /// Camera moved up; every platform shifted down by `offset`
    Scrolled { offset: f32 },
    /// A new batch of platforms was added above the frontier
    LevelGenerated { level: u32, platforms: usize },
    /// Moving platforms got faster
    DifficultyRaised,
    /// Ball fell past the bottom edge
    GameOver { final_score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Viewport the simulation currently measures against
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub ball: Ball,
    /// Live platforms (insertion order)
    pub platforms: Vec<Platform>,
    pub score: u64,
    /// Total upward scroll over the run
    pub max_height: f32,
    /// Shift applied by the most recent scroll
    pub viewport_offset: f32,
    /// Ticks since the last difficulty bump
    pub difficulty_timer: u32,
    /// Levels generated after the bootstrap
    pub current_level: u32,
    /// Held directions for the next tick
    pub input: InputState,
    pub running: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl RunState {
    /// Start a run: ball at mid-screen, a seed platform under it and the
    /// bootstrap levels above
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut state = Self::bare(seed, viewport, tuning);

        let seed_platform = Platform::new(
            state.next_entity_id(),
            Vec2::new(
                viewport.width / 2.0 - state.tuning.platform_width / 2.0,
                viewport.center_y() + state.tuning.ball_height,
            ),
            Vec2::new(state.tuning.platform_width, state.tuning.platform_height),
            PlatformKind::Static,
            state.tuning.level_height,
        );
        state.platforms.push(seed_platform);

        for i in 1..=state.tuning.bootstrap_levels {
            let base_y = viewport.center_y() - i as f32 * state.tuning.level_height;
            state.spawn_level(base_y);
        }

        log::info!(
            "Run {} started: viewport {}x{}, {} platforms",
            seed,
            viewport.width,
            viewport.height,
            state.platforms.len()
        );
        state
    }

    /// A running state with the ball placed and no platforms
    pub fn bare(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let ball = Ball::new(
            Vec2::new(
                viewport.width / 2.0 - tuning.ball_width / 2.0,
                viewport.center_y(),
            ),
            Vec2::new(tuning.ball_width, tuning.ball_height),
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
            tuning,
            ball,
            platforms: Vec::new(),
            score: 0,
            max_height: 0.0,
            viewport_offset: 0.0,
            difficulty_timer: 0,
            current_level: 0,
            input: InputState::default(),
            running: true,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Generate a level at `base_y` and add it to the live set.
    /// Returns how many platforms were added.
    pub fn spawn_level(&mut self, base_y: f32) -> usize {
        let batch = super::level::generate_level(self, base_y);
        let count = batch.platforms.len();
        self.platforms.extend(batch.platforms);
        count
    }

    /// Smallest y among live platforms (the frontier)
    pub fn frontier_y(&self) -> Option<f32> {
        self.platforms.iter().map(|p| p.pos.y).reduce(f32::min)
    }

    /// Take all events produced so far
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
