//! Per-frame control snapshot consumed by the simulation.

use serde::{Deserialize, Serialize};
use static_assertions::assert_impl_all;

/// Boolean control flags sampled once per frame.
///
/// Produced by whatever captures input (keyboard, touch overlay, a replay
/// script) and handed to the session by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSnapshot {
    pub throttle: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub drift: bool,
    pub nitro: bool,
    pub restart: bool,
}

impl InputSnapshot {
    /// All controls released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Steering target in {-1, 0, 1}; positive steers right.
    pub fn steer_axis(&self) -> f32 {
        (self.steer_right as i32 - self.steer_left as i32) as f32
    }
}

assert_impl_all!(InputSnapshot: Copy, Send, Sync);
