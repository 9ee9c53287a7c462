//! Config Module
//!
//! Centralized tuning for the car, drift model, scoring and session timing.
//! `Default` carries the shipped values; a JSON file can override any subset
//! of fields since every section is `#[serde(default)]`.
//!
//! ```rust,ignore
//! use drift_rush_engine::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "vehicle": { "max_speed": 30.0 } }"#)?;
//! assert_eq!(config.vehicle.max_speed, 30.0);
//! assert_eq!(config.session.time_limit, 90.0);
//! ```

pub mod scoring_config;
pub mod vehicle_config;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use scoring_config::{ScoreConfig, SessionConfig};
pub use vehicle_config::{CollisionConfig, DriftConfig, VehicleConfig};

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Validation(String),
}

/// Complete tuning set for one game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub vehicle: VehicleConfig,
    pub drift: DriftConfig,
    pub scoring: ScoreConfig,
    pub collision: CollisionConfig,
    pub session: SessionConfig,
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::info!(
            "Loaded config `{}`: max speed {} m/s, time limit {} s",
            path.display(),
            config.vehicle.max_speed,
            config.session.time_limit
        );
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.vehicle;
        positive("vehicle.max_speed", v.max_speed)?;
        positive("vehicle.acceleration", v.acceleration)?;
        positive("vehicle.brake_force", v.brake_force)?;
        unit_interval("vehicle.min_brake_fraction", v.min_brake_fraction)?;
        unit_interval("vehicle.drift_brake_factor", v.drift_brake_factor)?;
        non_negative("vehicle.reverse_start_speed", v.reverse_start_speed)?;
        if v.reverse_start_speed > v.reverse_cap() {
            return Err(ConfigError::Validation(format!(
                "vehicle.reverse_start_speed ({}) must not exceed max_speed / 3 ({})",
                v.reverse_start_speed,
                v.reverse_cap()
            )));
        }
        non_negative("vehicle.reverse_acceleration", v.reverse_acceleration)?;
        non_negative("vehicle.drag_coefficient", v.drag_coefficient)?;
        non_negative("vehicle.rolling_resistance", v.rolling_resistance)?;
        non_negative("vehicle.engine_braking", v.engine_braking)?;
        unit_interval(
            "vehicle.drift_engine_braking_factor",
            v.drift_engine_braking_factor,
        )?;
        non_negative("vehicle.rest_speed", v.rest_speed)?;
        positive("vehicle.turn_rate", v.turn_rate)?;
        positive("vehicle.drift_turn_multiplier", v.drift_turn_multiplier)?;
        positive("vehicle.steering_response", v.steering_response)?;
        if !(0.0 < v.low_speed_steer_ratio && v.low_speed_steer_ratio < v.high_speed_steer_ratio)
            || v.high_speed_steer_ratio >= 1.0
        {
            return Err(ConfigError::Validation(format!(
                "vehicle steering ratios must satisfy 0 < low ({}) < high ({}) < 1",
                v.low_speed_steer_ratio, v.high_speed_steer_ratio
            )));
        }
        unit_interval("vehicle.low_speed_steer_floor", v.low_speed_steer_floor)?;
        unit_interval("vehicle.high_speed_steer_floor", v.high_speed_steer_floor)?;
        at_least_one(
            "vehicle.nitro_acceleration_multiplier",
            v.nitro_acceleration_multiplier,
        )?;
        at_least_one(
            "vehicle.nitro_top_speed_multiplier",
            v.nitro_top_speed_multiplier,
        )?;
        positive("vehicle.nitro_drain_rate", v.nitro_drain_rate)?;
        unit_interval("vehicle.grip_friction", v.grip_friction)?;
        unit_interval("vehicle.drift_friction", v.drift_friction)?;
        non_negative("vehicle.drift_momentum_boost", v.drift_momentum_boost)?;
        if !v.spawn_position.is_finite() || !v.spawn_heading.is_finite() {
            return Err(ConfigError::Validation(
                "vehicle.spawn_position and vehicle.spawn_heading must be finite".to_string(),
            ));
        }

        let d = &self.drift;
        positive("drift.min_drift_speed", d.min_drift_speed)?;
        positive("drift.max_drift_duration", d.max_drift_duration)?;
        non_negative("drift.lateral_force", d.lateral_force)?;
        non_negative("drift.forward_force", d.forward_force)?;
        if !(d.max_slip_angle > 0.0 && d.max_slip_angle < std::f32::consts::PI) {
            return Err(ConfigError::Validation(format!(
                "drift.max_slip_angle must be in (0, pi), got {}",
                d.max_slip_angle
            )));
        }
        non_negative("drift.slip_correction", d.slip_correction)?;
        positive("drift.spin_rate_threshold", d.spin_rate_threshold)?;
        non_negative("drift.spin_min_speed", d.spin_min_speed)?;
        non_negative("drift.spin_min_duration", d.spin_min_duration)?;
        non_negative("drift.spin_bonus_multiplier", d.spin_bonus_multiplier)?;

        let s = &self.scoring;
        non_negative("scoring.drift_points_per_second", s.drift_points_per_second)?;
        non_negative("scoring.drift_multiplier_ramp", s.drift_multiplier_ramp)?;
        at_least_one("scoring.max_drift_multiplier", s.max_drift_multiplier)?;
        non_negative("scoring.nitro_recovery_rate", s.nitro_recovery_rate)?;
        non_negative("scoring.chain_growth_rate", s.chain_growth_rate)?;
        at_least_one("scoring.max_chain_multiplier", s.max_chain_multiplier)?;
        positive("scoring.chain_timeout", s.chain_timeout)?;

        let c = &self.collision;
        positive("collision.collision_radius", c.collision_radius)?;
        unit_interval("collision.speed_damping", c.speed_damping)?;
        unit_interval("collision.bounce_factor", c.bounce_factor)?;
        positive("collision.recovery_time", c.recovery_time)?;
        non_negative("collision.recovery_offset", c.recovery_offset)?;
        non_negative("collision.min_strike_speed", c.min_strike_speed)?;

        let session = &self.session;
        positive("session.time_limit", session.time_limit)?;
        positive("session.max_frame_dt", session.max_frame_dt)?;
        positive("session.constrained_frame_hz", session.constrained_frame_hz)?;
        if session.high_score_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "session.high_score_key must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be > 0, got {value}"
        )))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be >= 0, got {value}"
        )))
    }
}

fn unit_interval(field: &str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be within [0, 1], got {value}"
        )))
    }
}

fn at_least_one(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{field} must be >= 1, got {value}"
        )))
    }
}
