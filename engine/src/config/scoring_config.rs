//! Scoring and Session Configuration

use serde::{Deserialize, Serialize};

/// Drift bucket, chain multiplier and nitro recovery tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Drift points per second at top speed with multiplier 1
    pub drift_points_per_second: f32,
    /// Drift multiplier growth per second of drifting
    pub drift_multiplier_ramp: f32,
    /// Drift multiplier cap
    pub max_drift_multiplier: f32,
    /// Nitro charge restored per committed drift point
    pub nitro_recovery_rate: f32,
    /// Chain multiplier growth per second of drifting
    pub chain_growth_rate: f32,
    /// Chain multiplier cap
    pub max_chain_multiplier: f32,
    /// Non-drifting seconds before the chain drops back to 1
    pub chain_timeout: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            drift_points_per_second: 100.0,
            drift_multiplier_ramp: 0.5,
            max_drift_multiplier: 5.0,
            nitro_recovery_rate: 0.05,
            chain_growth_rate: 0.5,
            max_chain_multiplier: 8.0,
            chain_timeout: 1.5,
        }
    }
}

/// Session timing and frame pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown length (seconds)
    pub time_limit: f32,
    /// Frames with a larger delta are skipped (seconds)
    pub max_frame_dt: f32,
    /// Target rate for constrained devices (Hz)
    pub constrained_frame_hz: f32,
    /// Storage key of the persisted high score
    pub high_score_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            time_limit: 90.0,
            max_frame_dt: 0.2,
            constrained_frame_hz: 30.0,
            high_score_key: "driftHighScore".to_string(),
        }
    }
}
