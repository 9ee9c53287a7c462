//! Drift Rush Engine Library
//!
//! Simulation core for a top-down arcade drifting game: per-frame vehicle
//! dynamics, an arcade drift model, drift and spin scoring, obstacle strikes
//! and a countdown session. Rendering, HUD and raw input capture live in the
//! host; the core consumes an input snapshot per frame and hands back
//! kinematic state and game events.
//!
//! # Modules
//!
//! - [`config`] - Tuning constants with serde overrides and validation
//! - [`input`] - Per-frame input snapshot and keyboard mapping
//! - [`physics`] - Heading math, drift model and obstacle queries
//! - [`vehicle`] - Car state, dynamics and collision response
//! - [`scoring`] - Drift bucket, multipliers and high score
//! - [`session`] - Frame orchestration, clock, pacing and events
//! - [`storage`] - High score persistence and the leaderboard contract
//!
//! # Example
//!
//! ```ignore
//! use drift_rush_engine::{DriftSession, GameConfig, InputSnapshot, MemoryHighScore, ObstacleField};
//!
//! let mut session = DriftSession::new(
//!     GameConfig::default(),
//!     ObstacleField::walled_arena(60.0, 2.0, 3.0),
//!     Box::new(MemoryHighScore::default()),
//! )?;
//! session.start();
//!
//! let input = InputSnapshot { throttle: true, drift: true, steer_left: true, ..Default::default() };
//! session.frame(input, 1.0 / 60.0);
//!
//! for event in session.drain_events() {
//!     println!("{event:?}");
//! }
//! println!("speed {:.1}", session.telemetry().speed);
//! ```

pub mod config;
pub mod input;
pub mod physics;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod vehicle;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export the types a host needs at crate level
pub use config::{ConfigError, GameConfig};
pub use input::{DriveKeys, InputSnapshot, KeyCode};
pub use physics::{CollisionField, HitInfo, Obstacle, ObstacleField, Vec3};
pub use scoring::ScoreEngine;
pub use session::{
    DriftSession, EventQueue, FrameOutcome, FramePacer, GameEvent, SessionClock, SessionPhase,
    Telemetry,
};
pub use storage::{HighScoreStore, JsonFileHighScore, Leaderboard, MemoryHighScore};
pub use vehicle::{Vehicle, VehicleDynamics};
