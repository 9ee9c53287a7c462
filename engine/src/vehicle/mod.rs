//! Vehicle Module
//!
//! The player car and the systems that move it.
//!
//! # Components
//!
//! - [`Vehicle`] - Kinematic state with nitro, drift, spin and crash bookkeeping
//! - [`VehicleDynamics`] - Speed, steering, nitro and drift ownership each frame
//! - [`CollisionResponse`] - Obstacle strikes, crash recovery and restart

pub mod crash;
pub mod dynamics;
pub mod state;

pub use crash::{CollisionResponse, Strike};
pub use dynamics::{AdvanceReport, VehicleDynamics};
pub use state::{CrashState, NITRO_CAPACITY, NitroState, Vehicle};
