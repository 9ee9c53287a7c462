//! Continuous state snapshot read by presentation each frame.

use glam::Vec3;
use serde::Serialize;

use super::SessionPhase;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Telemetry {
    pub position: Vec3,
    pub heading: f32,
    pub speed: f32,
    pub velocity: Vec3,
    pub steering: f32,
    pub drift_active: bool,
    pub drift_duration: f32,
    pub drift_intensity: f32,
    pub drift_force: f32,
    pub nitro_charge: f32,
    pub nitro_active: bool,
    pub crashed: bool,
    pub spinning: bool,
    pub total_score: u64,
    pub pending_drift_points: f32,
    pub drift_multiplier: f32,
    pub chain_multiplier: f32,
    pub high_score: u64,
    pub remaining_time: f32,
    pub phase: SessionPhase,
}
