//! Vehicle, Drift and Collision Tuning
//!
//! Every constant the per-frame car simulation reads. Defaults are the
//! hand-tuned arcade values; none of them try to be physically accurate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Longitudinal, steering and nitro tuning for the player car.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Top forward speed without nitro (m/s)
    pub max_speed: f32,
    /// Base throttle acceleration before the falloff curve (m/s^2)
    pub acceleration: f32,
    /// Braking deceleration at full speed (m/s^2)
    pub brake_force: f32,
    /// Fraction of `brake_force` applied at very low speed
    pub min_brake_fraction: f32,
    /// Brake multiplier while drifting (keeps drift speed)
    pub drift_brake_factor: f32,
    /// Speed the car jumps to when reverse starts from rest (m/s)
    pub reverse_start_speed: f32,
    /// Reverse acceleration before the falloff curve (m/s^2)
    pub reverse_acceleration: f32,
    /// Aerodynamic drag, scales with speed squared
    pub drag_coefficient: f32,
    /// Rolling resistance, scales with speed
    pub rolling_resistance: f32,
    /// Engine braking while coasting forward, scales with speed
    pub engine_braking: f32,
    /// Engine braking multiplier while drifting
    pub drift_engine_braking_factor: f32,
    /// Speeds below this snap to zero when coasting (m/s)
    pub rest_speed: f32,
    /// Heading rate at full steering and top speed (rad/s)
    pub turn_rate: f32,
    /// Turn rate multiplier while drifting
    pub drift_turn_multiplier: f32,
    /// How fast the steering input follows the keys (units/s)
    pub steering_response: f32,
    /// Speed ratio below which steering is attenuated
    pub low_speed_steer_ratio: f32,
    /// Speed ratio above which steering is attenuated
    pub high_speed_steer_ratio: f32,
    /// Steering factor at rest
    pub low_speed_steer_floor: f32,
    /// Steering factor at (and above) top speed
    pub high_speed_steer_floor: f32,
    /// Acceleration multiplier while nitro is burning
    pub nitro_acceleration_multiplier: f32,
    /// Top speed multiplier while nitro is burning
    pub nitro_top_speed_multiplier: f32,
    /// Nitro charge consumed per second
    pub nitro_drain_rate: f32,
    /// Velocity retained per 60 Hz frame while gripping
    pub grip_friction: f32,
    /// Velocity retained per 60 Hz frame while drifting
    pub drift_friction: f32,
    /// Forward speed boost per second while drifting, relative to speed
    pub drift_momentum_boost: f32,
    /// Spawn position (y is the ride height)
    pub spawn_position: Vec3,
    /// Spawn heading (radians)
    pub spawn_heading: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            max_speed: 25.0,
            acceleration: 14.0,
            brake_force: 30.0,
            min_brake_fraction: 0.3,
            drift_brake_factor: 0.25,
            reverse_start_speed: 1.0,
            reverse_acceleration: 8.0,
            drag_coefficient: 0.002,
            rolling_resistance: 0.15,
            engine_braking: 0.5,
            drift_engine_braking_factor: 0.2,
            rest_speed: 0.05,
            turn_rate: 2.5,
            drift_turn_multiplier: 1.7,
            steering_response: 6.0,
            low_speed_steer_ratio: 0.2,
            high_speed_steer_ratio: 0.8,
            low_speed_steer_floor: 0.4,
            high_speed_steer_floor: 0.6,
            nitro_acceleration_multiplier: 6.0,
            nitro_top_speed_multiplier: 1.4,
            nitro_drain_rate: 25.0,
            grip_friction: 0.95,
            drift_friction: 0.995,
            drift_momentum_boost: 0.08,
            spawn_position: Vec3::new(0.0, 0.5, 0.0),
            spawn_heading: 0.0,
        }
    }
}

impl VehicleConfig {
    /// Maximum reverse speed magnitude.
    pub fn reverse_cap(&self) -> f32 {
        self.max_speed / 3.0
    }

    /// Forward speed ceiling for the current nitro state.
    pub fn speed_ceiling(&self, nitro_active: bool) -> f32 {
        if nitro_active {
            self.max_speed * self.nitro_top_speed_multiplier
        } else {
            self.max_speed
        }
    }
}

/// Drift force and spin detection tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Minimum |speed| for a drift to engage or continue (m/s)
    pub min_drift_speed: f32,
    /// Drift duration cap (seconds); intensity saturates at half of it
    pub max_drift_duration: f32,
    /// Sideways force per unit steering, relative to speed
    pub lateral_force: f32,
    /// Forward force keeping momentum through the slide, relative to speed
    pub forward_force: f32,
    /// Slip angle past which the velocity is pulled back (radians)
    pub max_slip_angle: f32,
    /// Strength of the pull back toward the heading, relative to speed
    pub slip_correction: f32,
    /// Heading rate that counts as a spin (rad/s)
    pub spin_rate_threshold: f32,
    /// Minimum |speed| for a spin to count (m/s)
    pub spin_min_speed: f32,
    /// Spin length required for a bonus (seconds)
    pub spin_min_duration: f32,
    /// Bonus points per accumulated spin point
    pub spin_bonus_multiplier: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            min_drift_speed: 5.0,
            max_drift_duration: 2.5,
            lateral_force: 1.5,
            forward_force: 0.15,
            max_slip_angle: 0.35 * std::f32::consts::PI,
            slip_correction: 4.0,
            spin_rate_threshold: 3.0,
            spin_min_speed: 3.0,
            spin_min_duration: 0.5,
            spin_bonus_multiplier: 2.5,
        }
    }
}

/// Obstacle strike and crash recovery tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Forward ray length that counts as a strike (m)
    pub collision_radius: f32,
    /// Speed multiplier applied on impact
    pub speed_damping: f32,
    /// Reflected velocity multiplier
    pub bounce_factor: f32,
    /// Seconds spent crashed before auto-recovery
    pub recovery_time: f32,
    /// Distance the car is moved back on recovery (m)
    pub recovery_offset: f32,
    /// Forward speed required to register a strike (m/s)
    pub min_strike_speed: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            collision_radius: 2.0,
            speed_damping: 0.3,
            bounce_factor: 0.5,
            recovery_time: 2.0,
            recovery_offset: 3.0,
            min_strike_speed: 0.5,
        }
    }
}
