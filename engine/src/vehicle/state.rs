//! Vehicle State
//!
//! Kinematic state of the player car plus the nitro, drift, spin and crash
//! bookkeeping attached to it. Only [`VehicleDynamics`](super::VehicleDynamics)
//! and [`CollisionResponse`](super::CollisionResponse) mutate it; presentation
//! reads it through the accessors or a telemetry snapshot.

use glam::Vec3;
use serde::Serialize;

use crate::config::VehicleConfig;
use crate::physics::{DriftState, SpinState, forward_vector, right_vector};

/// Full nitro tank
pub const NITRO_CAPACITY: f32 = 100.0;

/// Nitro meter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NitroState {
    /// 0..=100
    pub charge: f32,
    /// Burning this frame
    pub active: bool,
}

impl Default for NitroState {
    fn default() -> Self {
        Self {
            charge: NITRO_CAPACITY,
            active: false,
        }
    }
}

impl NitroState {
    /// Add charge, clamped to capacity. Returns the new charge.
    pub fn refill(&mut self, amount: f32) -> f32 {
        self.charge = (self.charge + amount.max(0.0)).min(NITRO_CAPACITY);
        self.charge
    }

    /// Burn charge for `dt` seconds, clamped at empty.
    pub fn drain(&mut self, rate: f32, dt: f32) {
        self.charge = (self.charge - rate * dt).max(0.0);
    }
}

/// Crash bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CrashState {
    pub crashed: bool,
    /// Seconds until auto-recovery
    pub recovery_timer: f32,
}

/// The player car.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub(crate) position: Vec3,
    pub(crate) heading: f32,
    /// Signed longitudinal speed (m/s); negative when reversing
    pub(crate) speed: f32,
    pub(crate) velocity: Vec3,
    /// Smoothed steering in [-1, 1]; positive steers right
    pub(crate) steering: f32,
    pub(crate) nitro: NitroState,
    pub(crate) drift: DriftState,
    pub(crate) spin: SpinState,
    pub(crate) crash: CrashState,
    spawn_position: Vec3,
    spawn_heading: f32,
}

impl Vehicle {
    /// Create a car at rest at the configured spawn pose.
    pub fn new(config: &VehicleConfig) -> Self {
        Self::at_spawn(config.spawn_position, config.spawn_heading)
    }

    /// Create a car at rest at an explicit spawn pose.
    pub fn at_spawn(position: Vec3, heading: f32) -> Self {
        Self {
            position,
            heading,
            speed: 0.0,
            velocity: Vec3::ZERO,
            steering: 0.0,
            nitro: NitroState::default(),
            drift: DriftState::default(),
            spin: SpinState::default(),
            crash: CrashState::default(),
            spawn_position: position,
            spawn_heading: heading,
        }
    }

    /// Put the car back at spawn with everything reset and a full nitro tank.
    pub fn reset_to_spawn(&mut self) {
        *self = Self::at_spawn(self.spawn_position, self.spawn_heading);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn steering(&self) -> f32 {
        self.steering
    }

    pub fn nitro(&self) -> &NitroState {
        &self.nitro
    }

    pub fn drift(&self) -> &DriftState {
        &self.drift
    }

    pub fn spin(&self) -> &SpinState {
        &self.spin
    }

    pub fn crash(&self) -> &CrashState {
        &self.crash
    }

    pub fn spawn_position(&self) -> Vec3 {
        self.spawn_position
    }

    pub fn spawn_heading(&self) -> f32 {
        self.spawn_heading
    }

    pub fn is_drifting(&self) -> bool {
        self.drift.active
    }

    pub fn is_crashed(&self) -> bool {
        self.crash.crashed
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.active
    }

    /// Unit vector the nose points along.
    pub fn forward(&self) -> Vec3 {
        forward_vector(self.heading)
    }

    /// Unit vector to the car's right.
    pub fn right(&self) -> Vec3 {
        right_vector(self.heading)
    }

    /// Set the longitudinal speed and align the velocity with the heading.
    ///
    /// Used for scripted starts; a running drift is left engaged.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.velocity = self.forward() * speed;
    }

    /// Teleport to a pose without touching speed.
    ///
    /// The spin heading reference is dropped so the jump is not read as a spin.
    pub fn set_pose(&mut self, position: Vec3, heading: f32) {
        self.position = position;
        self.heading = heading;
        self.spin.reset();
    }

    /// Overwrite the nitro charge (clamped to 0..=100).
    pub fn set_nitro_charge(&mut self, charge: f32) {
        self.nitro.charge = charge.clamp(0.0, NITRO_CAPACITY);
    }

    /// Refill nitro from a drift commit.
    pub fn refill_nitro(&mut self, amount: f32) -> f32 {
        self.nitro.refill(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawns_at_rest_with_full_nitro() {
        let config = VehicleConfig::default();
        let vehicle = Vehicle::new(&config);
        assert_eq!(vehicle.position(), config.spawn_position);
        assert_eq!(vehicle.heading(), config.spawn_heading);
        assert_eq!(vehicle.speed(), 0.0);
        assert_eq!(vehicle.velocity(), Vec3::ZERO);
        assert_eq!(vehicle.nitro().charge, NITRO_CAPACITY);
        assert!(!vehicle.is_drifting());
        assert!(!vehicle.is_crashed());
    }

    #[test]
    fn test_reset_to_spawn() {
        let mut vehicle = Vehicle::at_spawn(Vec3::new(1.0, 0.5, 2.0), 0.3);
        vehicle.set_pose(Vec3::new(40.0, 0.5, -10.0), 2.0);
        vehicle.set_speed(18.0);
        vehicle.set_nitro_charge(12.0);
        vehicle.drift.active = true;
        vehicle.crash.crashed = true;
        vehicle.steering = -1.0;

        vehicle.reset_to_spawn();

        assert_eq!(vehicle.position(), Vec3::new(1.0, 0.5, 2.0));
        assert_eq!(vehicle.heading(), 0.3);
        assert_eq!(vehicle.speed(), 0.0);
        assert_eq!(vehicle.steering(), 0.0);
        assert_eq!(vehicle.nitro().charge, NITRO_CAPACITY);
        assert!(!vehicle.is_drifting());
        assert!(!vehicle.is_crashed());
        assert_eq!(vehicle.spin().last_heading(), None);
    }

    #[test]
    fn test_nitro_refill_clamps() {
        let mut nitro = NitroState { charge: 90.0, active: false };
        assert_eq!(nitro.refill(25.0), NITRO_CAPACITY);
        nitro.drain(25.0, 10.0);
        assert_eq!(nitro.charge, 0.0);
        assert_eq!(nitro.refill(-5.0), 0.0);
    }

    #[test]
    fn test_set_speed_aligns_velocity() {
        let mut vehicle = Vehicle::at_spawn(Vec3::ZERO, 0.0);
        vehicle.set_speed(10.0);
        assert!((vehicle.velocity() - Vec3::NEG_Z * 10.0).length() < 1e-5);
    }
}
