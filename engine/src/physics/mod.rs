//! Physics module for Drift Rush
//!
//! Hand-written arcade physics for a single car on a flat arena. No external
//! physics library: the car model is a few dozen lines of tuned integration
//! and the world is a list of axis-aligned boxes.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Headings in radians (0 faces -Z, positive turns right)
//!
//! # Submodules
//!
//! - [`types`] - Vec3 re-export and heading helpers
//! - [`drift`] - Drift engagement, drift forces and spin detection
//! - [`collision`] - Ray-AABB obstacle queries and velocity reflection

pub mod collision;
pub mod drift;
pub mod types;

pub use collision::{
    CollisionField, HitInfo, Obstacle, ObstacleField, aabb_surface_normal, ray_aabb_intersect,
    reflect,
};
pub use drift::{DriftModel, DriftState, DriftTransition, SpinBonus, SpinState};
pub use types::{Vec3, forward_vector, normalize_angle, right_vector, slip_angle};
