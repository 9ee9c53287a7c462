//! Vehicle Dynamics
//!
//! Per-frame arcade car model: steering smoothing, nitro, longitudinal speed,
//! heading integration, drift ownership of the velocity, friction and
//! position integration.
//!
//! # Speed Model
//!
//! - Throttle: acceleration falls off as `1 - (s / ceiling)^1.5`
//! - Brake: stronger at speed, `brake * (min + (1 - min) * (s / max)^2)`
//! - Coast: drag (s^2), rolling (s) and engine braking (s)
//! - Reverse: capped at a third of top speed
//! - Drift: forward force and momentum boost offset coasting losses, never
//!   exceeding the entry speed unless the throttle is held
//!
//! # Steering
//!
//! Heading rate scales with speed, so a parked car cannot turn. Steering is
//! softened at very low and very high speed ratios.
//!
//! # Usage
//!
//! ```rust,ignore
//! use drift_rush_engine::vehicle::{Vehicle, VehicleDynamics};
//!
//! let dynamics = VehicleDynamics::new(config.vehicle, config.drift);
//! let mut vehicle = Vehicle::new(&config.vehicle);
//!
//! // Each frame:
//! let report = dynamics.advance(&mut vehicle, &input, dt);
//! ```

use crate::config::{DriftConfig, VehicleConfig};
use crate::input::InputSnapshot;
use crate::physics::{DriftModel, DriftTransition, SpinBonus, forward_vector};

use super::Vehicle;

/// Below this length a velocity is treated as zero and never normalized.
const MIN_VELOCITY_LENGTH: f32 = 1e-4;

/// Friction factors are defined per frame at this rate.
const FRICTION_REFERENCE_HZ: f32 = 60.0;

/// What happened during one [`VehicleDynamics::advance`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdvanceReport {
    /// Drift engagement change this frame
    pub drift: DriftTransition,
    /// Lateral drift force magnitude (0 when not drifting)
    pub drift_force: f32,
    /// Bonus from a spin that ended this frame
    pub spin_bonus: Option<SpinBonus>,
}

/// Car physics driven by an [`InputSnapshot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VehicleDynamics {
    config: VehicleConfig,
    drift: DriftModel,
}

impl VehicleDynamics {
    pub fn new(config: VehicleConfig, drift: DriftConfig) -> Self {
        Self {
            config,
            drift: DriftModel::new(drift),
        }
    }

    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    pub fn drift_model(&self) -> &DriftModel {
        &self.drift
    }

    /// Advance the car by `dt` seconds.
    ///
    /// A crashed car is left alone; crash coasting is handled by
    /// [`CollisionResponse::update_recovery`](super::CollisionResponse::update_recovery).
    pub fn advance(&self, vehicle: &mut Vehicle, input: &InputSnapshot, dt: f32) -> AdvanceReport {
        if vehicle.crash.crashed || !(dt > 0.0) {
            return AdvanceReport::default();
        }

        // Steering follows the keys at a fixed rate
        vehicle.steering = approach(
            vehicle.steering,
            input.steer_axis(),
            self.config.steering_response * dt,
        )
        .clamp(-1.0, 1.0);

        // Nitro
        vehicle.nitro.active = input.nitro && vehicle.speed > 0.0 && vehicle.nitro.charge > 0.0;
        if vehicle.nitro.active {
            vehicle.nitro.drain(self.config.nitro_drain_rate, dt);
        }

        // Drift engagement
        let transition =
            self.drift
                .update_engagement(&mut vehicle.drift, input.drift, vehicle.speed, dt);
        if transition == DriftTransition::Started {
            vehicle.velocity = forward_vector(vehicle.heading) * vehicle.speed;
        }
        let drifting = vehicle.drift.active;
        let nitro = vehicle.nitro.active;
        let entry_speed = vehicle.speed.abs();

        vehicle.speed = self.longitudinal_speed(vehicle.speed, input, drifting, nitro, dt);

        // Heading
        let ratio = vehicle.speed.abs() / self.config.max_speed;
        let effective_steering = vehicle.steering * self.steer_attenuation(ratio);
        let turn_multiplier = if drifting {
            self.config.drift_turn_multiplier
        } else {
            1.0
        };
        vehicle.heading += effective_steering * self.config.turn_rate * turn_multiplier * dt * ratio;

        let forward = vehicle.forward();
        let ceiling = self.config.speed_ceiling(nitro);
        let mut drift_force = 0.0;

        if drifting {
            let length = vehicle.velocity.length();
            if length > MIN_VELOCITY_LENGTH {
                vehicle.velocity *= vehicle.speed.abs() / length;
            }

            drift_force = self.drift.apply_forces(
                &mut vehicle.velocity,
                vehicle.heading,
                effective_steering,
                vehicle.speed,
                dt,
            );

            // Without throttle a slide never leaves the frame faster than it entered
            let limit = if input.throttle {
                ceiling
            } else {
                entry_speed.min(ceiling)
            };
            let sign = if vehicle.speed < 0.0 { -1.0 } else { 1.0 };
            let mut magnitude = vehicle.velocity.length();
            magnitude += magnitude * self.config.drift_momentum_boost * dt;
            vehicle.speed = (magnitude.min(limit) * sign).clamp(-self.config.reverse_cap(), ceiling);
            vehicle.velocity = vehicle.velocity.clamp_length_max(limit);
        } else {
            vehicle.velocity = forward * vehicle.speed;
        }
        vehicle.drift.force = drift_force;

        // Friction per 60 Hz reference frame
        let friction = if drifting {
            self.config.drift_friction
        } else {
            self.config.grip_friction
        };
        vehicle.velocity *= friction.powf(dt * FRICTION_REFERENCE_HZ);

        // Integrate on the ground plane
        let ride_height = vehicle.position.y;
        vehicle.position += vehicle.velocity * dt;
        vehicle.position.y = ride_height;
        vehicle.velocity.y = 0.0;

        let spin_bonus =
            self.drift
                .detect_spin(&mut vehicle.spin, vehicle.heading, vehicle.speed, dt);

        AdvanceReport {
            drift: transition,
            drift_force,
            spin_bonus,
        }
    }

    /// New signed speed after throttle, brake or coasting for `dt`.
    pub fn longitudinal_speed(
        &self,
        speed: f32,
        input: &InputSnapshot,
        drifting: bool,
        nitro: bool,
        dt: f32,
    ) -> f32 {
        let c = &self.config;
        let ceiling = c.speed_ceiling(nitro);
        let reverse_cap = c.reverse_cap();

        let next = if input.throttle {
            if speed >= 0.0 {
                let ratio = (speed / ceiling).min(1.0);
                let boost = if nitro { c.nitro_acceleration_multiplier } else { 1.0 };
                let accel = (1.0 - ratio.powf(1.5)) * c.acceleration * boost;
                (speed + accel * dt).min(ceiling)
            } else {
                // Throttle while reversing brakes toward zero
                (speed + c.brake_force * 0.5 * dt).min(0.0)
            }
        } else if input.brake {
            if speed > 0.0 {
                let ratio = (speed / c.max_speed).min(1.0);
                let mut force =
                    c.brake_force * (c.min_brake_fraction + (1.0 - c.min_brake_fraction) * ratio * ratio);
                if drifting {
                    force *= c.drift_brake_factor;
                }
                (speed - force * dt).max(0.0)
            } else if speed == 0.0 {
                -c.reverse_start_speed
            } else {
                let ratio = (speed.abs() / reverse_cap).min(1.0);
                (speed - c.reverse_acceleration * (1.0 - ratio) * dt).max(-reverse_cap)
            }
        } else {
            self.coast(speed, drifting, dt)
        };

        next.clamp(-reverse_cap, ceiling)
    }

    /// Natural deceleration with no pedal held. Never crosses zero.
    fn coast(&self, speed: f32, drifting: bool, dt: f32) -> f32 {
        let c = &self.config;
        if speed > 0.0 {
            let engine = if drifting {
                c.engine_braking * c.drift_engine_braking_factor
            } else {
                c.engine_braking
            };
            let decel = c.drag_coefficient * speed * speed + c.rolling_resistance * speed + engine * speed;
            let next = (speed - decel * dt).max(0.0);
            if next < c.rest_speed { 0.0 } else { next }
        } else if speed < 0.0 {
            let decel = c.drag_coefficient * speed * speed + c.rolling_resistance * speed.abs();
            let next = (speed + decel * dt).min(0.0);
            if next > -c.rest_speed { 0.0 } else { next }
        } else {
            0.0
        }
    }

    /// Steering multiplier for a speed ratio (|speed| / max_speed).
    pub fn steer_attenuation(&self, ratio: f32) -> f32 {
        let c = &self.config;
        if ratio < c.low_speed_steer_ratio {
            c.low_speed_steer_floor + (1.0 - c.low_speed_steer_floor) * (ratio / c.low_speed_steer_ratio)
        } else if ratio > c.high_speed_steer_ratio {
            let span = (1.0 - c.high_speed_steer_ratio).max(f32::EPSILON);
            let t = ((ratio - c.high_speed_steer_ratio) / span).min(1.0);
            1.0 - (1.0 - c.high_speed_steer_floor) * t
        } else {
            1.0
        }
    }
}

/// Move `current` toward `target` by at most `max_delta`.
fn approach(current: f32, target: f32, max_delta: f32) -> f32 {
    if current < target {
        (current + max_delta).min(target)
    } else {
        (current - max_delta).max(target)
    }
}
