//! Session Module
//!
//! Frame orchestration for one game.
//!
//! - [`DriftSession`] - Runs every system in order each frame
//! - [`SessionClock`] - Countdown that gates scoring
//! - [`FramePacer`] - Timestamps to frame deltas, with a rate limit for weak devices
//! - [`GameEvent`] / [`EventQueue`] - Outbound notifications, drained per frame
//! - [`Telemetry`] - Serializable state snapshot for the HUD

pub mod clock;
pub mod events;
pub mod frame;
pub mod game;
pub mod telemetry;

pub use clock::SessionClock;
pub use events::{EventQueue, GameEvent};
pub use frame::FramePacer;
pub use game::{DriftSession, FrameOutcome, SessionPhase};
pub use telemetry::Telemetry;
