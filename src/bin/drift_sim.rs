//! Headless Drift Session Runner
//!
//! Run with: `cargo run --bin drift_sim -- [options]`
//!
//! Drives a full timed session with a scripted driver and logs every game
//! event. Used for tuning: tweak a JSON config, rerun, compare scores.
//!
//! Options:
//! - `--config <path>`: JSON tuning overrides
//! - `--fps <hz>`: simulation rate (default 60)
//! - `--time-limit <seconds>`: override the session length
//! - `--high-score <path>`: JSON high score file (default: in-memory)
//!
//! Logging follows `RUST_LOG` (default `info`; `debug` shows drift commits
//! and strikes).

use std::path::PathBuf;
use std::process::ExitCode;

use drift_rush_engine::storage::{HighScoreStore, JsonFileHighScore, MemoryHighScore};
use drift_rush_engine::{
    DriftSession, FrameOutcome, GameConfig, GameEvent, InputSnapshot, ObstacleField,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

// ============================================================================
// ARGUMENTS
// ============================================================================

struct Args {
    config: Option<PathBuf>,
    fps: f32,
    time_limit: Option<f32>,
    high_score: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        fps: 60.0,
        time_limit: None,
        high_score: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("{flag} needs a value"));
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value()?)),
            "--high-score" => args.high_score = Some(PathBuf::from(value()?)),
            "--fps" => {
                args.fps = value()?
                    .parse()
                    .map_err(|e| format!("--fps: {e}"))?;
            }
            "--time-limit" => {
                args.time_limit = Some(value()?.parse().map_err(|e| format!("--time-limit: {e}"))?);
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }

    if !(args.fps > 0.0) {
        return Err("--fps must be positive".to_string());
    }
    Ok(args)
}

/// Fixed step for `fps`. Steps the session would skip are rejected, since the
/// clock would never advance.
fn frame_dt(fps: f32, max_frame_dt: f32) -> Result<f32, String> {
    let dt = 1.0 / fps;
    if dt > max_frame_dt {
        return Err(format!(
            "--fps {fps} gives {dt:.3} s frames; the session accepts at most {max_frame_dt} s (fps >= {:.1})",
            1.0 / max_frame_dt
        ));
    }
    Ok(dt)
}

// ============================================================================
// SCRIPTED DRIVER
// ============================================================================

/// Repeating 6 s pattern: straight, a held left drift, straight, a short
/// right flick with nitro.
fn scripted_input(t: f32) -> InputSnapshot {
    let phase = t % 6.0;
    let mut input = InputSnapshot {
        throttle: true,
        ..Default::default()
    };
    match phase {
        p if p < 1.5 => {}
        p if p < 4.0 => {
            input.drift = true;
            input.steer_left = true;
        }
        p if p < 5.0 => input.nitro = true,
        _ => {
            input.drift = true;
            input.steer_right = true;
        }
    }
    input
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load_from_path(path)?,
        None => GameConfig::default(),
    };
    if let Some(limit) = args.time_limit {
        config.session.time_limit = limit;
    }

    let store: Box<dyn HighScoreStore> = match &args.high_score {
        Some(path) => Box::new(JsonFileHighScore::new(path, config.session.high_score_key.clone())),
        None => Box::new(MemoryHighScore::default()),
    };

    let dt = frame_dt(args.fps, config.session.max_frame_dt)?;

    let field = ObstacleField::walled_arena(60.0, 2.0, 3.0);
    let mut session = DriftSession::new(config, field, store)?;
    session.start();

    let mut t = 0.0;
    let mut frames = 0u64;
    let mut drifts = 0u32;
    let mut strikes = 0u32;

    loop {
        if session.frame(scripted_input(t), dt) == FrameOutcome::Skipped {
            return Err(format!("frame of {dt} s rejected by the session").into());
        }
        t += dt;
        frames += 1;

        let mut finished = false;
        for event in session.drain_events() {
            match event {
                GameEvent::DriftScored { points, total_score } => {
                    drifts += 1;
                    info!(t, points, total_score, "drift scored");
                }
                GameEvent::SpinoutBonus { score, awarded, duration_seconds } => {
                    info!(t, score, awarded, duration_seconds, "spinout bonus");
                }
                GameEvent::Collision { impact_speed, .. } => {
                    strikes += 1;
                    info!(t, impact_speed, "collision");
                }
                GameEvent::Recovered => info!(t, "recovered"),
                GameEvent::GameOver { final_score, high_score } => {
                    info!(final_score, high_score, frames, drifts, strikes, "session over");
                    finished = true;
                }
            }
        }
        if finished {
            break;
        }
    }

    println!("{}", serde_json::to_string_pretty(&session.telemetry())?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dt_rejects_skipped_steps() {
        assert!((frame_dt(60.0, 0.2).unwrap() - 1.0 / 60.0).abs() < 1e-7);
        assert_eq!(frame_dt(5.0, 0.2).unwrap(), 0.2);
        assert!(frame_dt(4.0, 0.2).is_err());
        assert!(frame_dt(1.0, 0.2).is_err());
    }

    #[test]
    fn test_scripted_session_finishes() {
        let mut config = GameConfig::default();
        config.session.time_limit = 3.0;
        let dt = frame_dt(30.0, config.session.max_frame_dt).unwrap();
        let mut session = DriftSession::new(
            config,
            ObstacleField::walled_arena(60.0, 2.0, 3.0),
            Box::new(MemoryHighScore::default()),
        )
        .unwrap();
        session.start();

        let mut t = 0.0;
        let mut game_over = false;
        for _ in 0..200 {
            assert_eq!(session.frame(scripted_input(t), dt), FrameOutcome::Simulated);
            t += dt;
            if session
                .drain_events()
                .iter()
                .any(|event| matches!(event, GameEvent::GameOver { .. }))
            {
                game_over = true;
                break;
            }
        }
        assert!(game_over);
    }
}
