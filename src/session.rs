//! Run lifecycle
//!
//! A [`Session`] owns at most one run and is driven by the host's per-frame
//! callback. Each frame it first slides the moving platforms by elapsed
//! wall-clock time, then runs one simulation tick, so both loops share the
//! platform set under a single owner.
//!
//! ```text
//! Idle ──start_countdown──▶ Countdown ──(3 s)──▶ Running ──fall──▶ GameOver
//!   └──────────────begin_run───────────────────────▲                  │
//!                                                  └────begin_run─────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::Viewport;
use crate::input::{InputEvent, InputState};
use crate::render::{BallView, FrameSnapshot, PlatformView};
use crate::reward::{RewardReporter, RewardStatus};
use crate::sim::{self, GameEvent, RunState, kinematics};
use crate::tuning::Tuning;

/// Milliseconds per countdown step
const COUNTDOWN_STEP_MS: f64 = 1000.0;
/// Seed stride between consecutive runs
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No run
    Idle,
    /// Pre-run countdown; `remaining` is the value on screen
    Countdown { remaining: u32 },
    /// Loop active, input live
    Running,
    /// Run ended; score frozen, input discarded
    GameOver { final_score: u64 },
}

/// Notifications for the host, drained with [`Session::drain_events`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    CountdownChanged(u32),
    RunStarted { seed: u64 },
    ScoreChanged(u64),
    LevelReached(u32),
    GameOver { final_score: u64 },
    Reward(RewardStatus),
    Stopped,
}

pub struct Session<R: RewardReporter> {
    viewport: Viewport,
    tuning: Tuning,
    reporter: R,
    phase: SessionPhase,
    run: Option<RunState>,
    input: InputState,
    next_seed: u64,
    last_frame_ms: f64,
    countdown_deadline_ms: f64,
    last_score: u64,
    last_level: u32,
    reward_status: Option<RewardStatus>,
    events: Vec<SessionEvent>,
}

impl<R: RewardReporter> Session<R> {
    pub fn new(viewport: Viewport, tuning: Tuning, reporter: R, seed: u64) -> Self {
        Self {
            viewport,
            tuning,
            reporter,
            phase: SessionPhase::Idle,
            run: None,
            input: InputState::default(),
            next_seed: seed,
            last_frame_ms: 0.0,
            countdown_deadline_ms: 0.0,
            last_score: 0,
            last_level: 0,
            reward_status: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    /// Current score; the frozen final score after game over
    pub fn score(&self) -> u64 {
        match self.phase {
            SessionPhase::GameOver { final_score } => final_score,
            _ => self.run.as_ref().map_or(0, |run| run.score),
        }
    }

    /// Show the pre-run countdown, then begin the run. Ignored while running.
    pub fn start_countdown(&mut self, now_ms: f64) {
        if self.phase == SessionPhase::Running {
            log::warn!("Countdown requested while a run is active; ignoring");
            return;
        }
        let remaining = self.tuning.countdown_secs;
        if remaining == 0 {
            self.begin_run(now_ms);
            return;
        }
        self.phase = SessionPhase::Countdown { remaining };
        self.countdown_deadline_ms = now_ms + COUNTDOWN_STEP_MS;
        self.events.push(SessionEvent::CountdownChanged(remaining));
    }

    /// Reset everything and start a fresh run
    pub fn begin_run(&mut self, now_ms: f64) {
        if self.phase == SessionPhase::Running {
            log::info!("Restarting active run");
        }
        let seed = self.next_seed;
        self.next_seed = self.next_seed.wrapping_add(SEED_STRIDE);

        self.run = Some(RunState::new(seed, self.viewport, self.tuning.clone()));
        self.input = InputState::default();
        self.last_frame_ms = now_ms;
        self.last_score = 0;
        self.last_level = 0;
        self.reward_status = None;
        self.phase = SessionPhase::Running;
        self.events.push(SessionEvent::RunStarted { seed });
    }

    /// Per-frame callback from the host scheduler
    pub fn frame(&mut self, now_ms: f64) {
        match self.phase {
            SessionPhase::Countdown { remaining } => self.advance_countdown(now_ms, remaining),
            SessionPhase::Running => self.step_run(now_ms),
            SessionPhase::Idle | SessionPhase::GameOver { .. } => {}
        }
    }

    /// Feed a key/touch event. Discarded unless a run is active.
    pub fn handle_input(&mut self, event: InputEvent) {
        if self.phase == SessionPhase::Running {
            self.input.apply(event, self.viewport.width);
        }
    }

    /// Cancel the countdown or the active run. Safe to call repeatedly.
    pub fn stop(&mut self) {
        match self.phase {
            SessionPhase::Countdown { .. } | SessionPhase::Running => {
                log::info!("Session stopped");
                self.phase = SessionPhase::Idle;
                self.run = None;
                self.input.release();
                self.events.push(SessionEvent::Stopped);
            }
            SessionPhase::Idle | SessionPhase::GameOver { .. } => {}
        }
    }

    /// New viewport size. Existing coordinates are not rescaled.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
    }

    /// Render-facing copy of the current state
    pub fn snapshot(&self) -> FrameSnapshot {
        let run = self.run.as_ref();
        FrameSnapshot {
            phase: self.phase,
            ball: run.map(|r| BallView::from(&r.ball)),
            platforms: run
                .map(|r| r.platforms.iter().map(PlatformView::from).collect())
                .unwrap_or_default(),
            score: self.score(),
            level: self.last_level,
            status: self.reward_status.map(|s| s.message().to_string()),
        }
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    fn advance_countdown(&mut self, now_ms: f64, mut remaining: u32) {
        // Catch up on every step that elapsed since the last frame
        while now_ms >= self.countdown_deadline_ms {
            remaining -= 1;
            if remaining == 0 {
                self.begin_run(now_ms);
                return;
            }
            self.countdown_deadline_ms += COUNTDOWN_STEP_MS;
            self.events.push(SessionEvent::CountdownChanged(remaining));
        }
        self.phase = SessionPhase::Countdown { remaining };
    }

    fn step_run(&mut self, now_ms: f64) {
        let Some(run) = self.run.as_mut() else {
            return;
        };

        let elapsed = (now_ms - self.last_frame_ms) as f32;
        self.last_frame_ms = now_ms;
        run.viewport = self.viewport;

        let delta = kinematics::delta_factor(elapsed, &self.tuning);
        kinematics::update_moving_platforms(&mut run.platforms, run.viewport.width, delta);

        run.input = self.input;
        sim::tick(run);

        let score = run.score;
        let mut final_score = None;
        for event in run.drain_events() {
            match event {
                GameEvent::LevelGenerated { level, .. } => {
                    self.last_level = level;
                    self.events.push(SessionEvent::LevelReached(level));
                }
                GameEvent::GameOver { final_score: s } => final_score = Some(s),
                _ => {}
            }
        }

        if score != self.last_score {
            self.last_score = score;
            self.events.push(SessionEvent::ScoreChanged(score));
        }

        if let Some(final_score) = final_score {
            self.finish(final_score);
        }
    }

    fn finish(&mut self, final_score: u64) {
        self.phase = SessionPhase::GameOver { final_score };
        self.run = None;
        self.input.release();
        self.events.push(SessionEvent::GameOver { final_score });

        if final_score < self.tuning.reward_threshold {
            return;
        }

        let result = self.reporter.report(final_score);
        let status = RewardStatus::from(&result);
        match result {
            Ok(()) => log::info!("Reward reported for score {}", final_score),
            Err(err) => log::warn!("Reward for score {} not granted: {}", final_score, err),
        }
        self.reward_status = Some(status);
        self.events.push(SessionEvent::Reward(status));
    }
}
