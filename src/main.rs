//! Updraft entry point
//!
//! Native builds run one headless autoplay session: a simple steering bot
//! plays until the ball falls, and progress is logged. The browser build
//! drives the session from JavaScript through `updraft::web`.
//!
//! Usage: `updraft [seed] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::process::ExitCode;

    use updraft::render::PlatformTag;
    use updraft::reward::LogReporter;
    use updraft::{
        FrameSnapshot, InputEvent, Key, Session, SessionEvent, SessionPhase, Tuning, Viewport,
    };

    /// Frame duration the headless loop pretends to run at (ms)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten minutes of simulated play
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Which way the bot holds the stick
    fn steer(snapshot: &FrameSnapshot) -> Option<Key> {
        let ball = snapshot.ball?;
        let ball_center = ball.x + ball.width / 2.0;
        let ball_bottom = ball.y + ball.height;

        // Aim at the closest platform below while falling, above while rising.
        // Moving platforms are harder to catch, so static ones win ties.
        let target = snapshot
            .platforms
            .iter()
            .filter(|p| {
                if ball.vy > 0.0 {
                    p.y >= ball_bottom
                } else {
                    p.y < ball.y
                }
            })
            .min_by(|a, b| {
                let score = |p: &&updraft::PlatformView| {
                    let penalty = if p.kind == PlatformTag::Moving { 60.0 } else { 0.0 };
                    (p.y - ball_bottom).abs() + penalty
                };
                score(a).total_cmp(&score(b))
            })?;

        let target_center = target.x + target.width / 2.0;
        let dx = target_center - ball_center;
        if dx.abs() < target.width / 4.0 {
            None
        } else if dx > 0.0 {
            Some(Key::Right)
        } else {
            Some(Key::Left)
        }
    }

    fn load_tuning(path: Option<&str>) -> Result<Tuning, String> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
        Tuning::from_json(&json).map_err(|e| format!("{path}: {e}"))
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let mut args = std::env::args().skip(1);
        let seed = match args.next().map(|s| s.parse::<u64>()) {
            Some(Ok(seed)) => seed,
            Some(Err(e)) => {
                log::error!("Invalid seed: {}", e);
                return ExitCode::FAILURE;
            }
            None => 0xC0FFEE,
        };
        let tuning = match load_tuning(args.next().as_deref()) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning: {}", e);
                return ExitCode::FAILURE;
            }
        };

        let viewport = Viewport::new(400.0, 800.0);
        let mut session = Session::new(viewport, tuning, LogReporter, seed);
        session.begin_run(0.0);

        let mut held: Option<Key> = None;
        let mut now = 0.0;
        for _ in 0..MAX_FRAMES {
            let wanted = steer(&session.snapshot());
            if wanted != held {
                if let Some(key) = held {
                    session.handle_input(InputEvent::KeyUp(key));
                }
                if let Some(key) = wanted {
                    session.handle_input(InputEvent::KeyDown(key));
                }
                held = wanted;
            }

            now += FRAME_MS;
            session.frame(now);

            for event in session.drain_events() {
                match event {
                    SessionEvent::LevelReached(level) => log::debug!("Reached level {}", level),
                    SessionEvent::GameOver { final_score } => {
                        log::info!("Game over, final score {}", final_score)
                    }
                    SessionEvent::Reward(status) => log::info!("{}", status.message()),
                    _ => {}
                }
            }

            if matches!(session.phase(), SessionPhase::GameOver { .. }) {
                break;
            }
        }

        if session.phase() == SessionPhase::Running {
            log::info!("Frame budget exhausted, stopping at score {}", session.score());
            session.stop();
        }
        println!("{}", session.score());
        ExitCode::SUCCESS
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
