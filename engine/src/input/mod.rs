//! Input Module
//!
//! The simulation only ever sees an [`InputSnapshot`]: a fixed set of
//! boolean flags sampled once per frame. [`DriveKeys`] builds one from
//! generic key press/release events.
//!
//! ```rust,ignore
//! use drift_rush_engine::input::{DriveKeys, KeyCode};
//!
//! let mut keys = DriveKeys::new();
//! keys.handle_key(KeyCode::W, true);
//! keys.handle_key(KeyCode::Space, true);
//! session.frame(keys.snapshot(), dt);
//! ```

pub mod keyboard;
pub mod snapshot;

pub use keyboard::{DriveKeys, KeyCode};
pub use snapshot::InputSnapshot;
