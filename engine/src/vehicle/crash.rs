//! Collision Response
//!
//! Obstacle strikes, the crashed state and recovery.
//!
//! A strike is a forward ray from the car hitting an obstacle within
//! `collision_radius` while the car moves forward. The car loses most of its
//! speed, takes a reflected velocity off the surface and is crashed for
//! `recovery_time` seconds. A crashed car stays where it struck; on expiry it
//! is pulled back from the wall and released at rest.

use glam::Vec3;
use tracing::debug;

use crate::config::CollisionConfig;
use crate::physics::{CollisionField, HitInfo, reflect};

use super::Vehicle;

/// Outcome of a strike, as reported to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Strike {
    /// Signed speed just before impact
    pub impact_speed: f32,
    /// Signed speed after damping
    pub speed_after: f32,
    /// Surface normal of the struck face
    pub normal: Vec3,
    /// Index of the struck obstacle in its field
    pub obstacle: usize,
}

/// Strike detection, crash timer and restart.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResponse {
    config: CollisionConfig,
}

impl CollisionResponse {
    pub fn new(config: CollisionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Query the field along the car's nose.
    ///
    /// Returns `None` when crashed, not moving forward fast enough, or clear.
    pub fn detect<F: CollisionField + ?Sized>(&self, vehicle: &Vehicle, field: &F) -> Option<HitInfo> {
        if vehicle.crash.crashed || vehicle.speed <= self.config.min_strike_speed {
            return None;
        }

        field
            .first_hit(vehicle.position, vehicle.forward(), self.config.collision_radius)
            .filter(|hit| hit.distance < self.config.collision_radius)
    }

    /// Apply a strike: damp, bounce, end the drift and enter the crashed state.
    pub fn apply_strike(&self, vehicle: &mut Vehicle, hit: &HitInfo) -> Strike {
        let impact_speed = vehicle.speed;

        vehicle.speed *= self.config.speed_damping;
        vehicle.velocity = reflect(vehicle.velocity, hit.normal) * self.config.bounce_factor;
        vehicle.velocity.y = 0.0;
        vehicle.drift.end();
        vehicle.spin.clear_spin();
        vehicle.nitro.active = false;
        vehicle.crash.crashed = true;
        vehicle.crash.recovery_timer = self.config.recovery_time;

        debug!(
            impact_speed,
            obstacle = hit.obstacle,
            distance = hit.distance,
            "vehicle struck obstacle"
        );

        Strike {
            impact_speed,
            speed_after: vehicle.speed,
            normal: hit.normal,
            obstacle: hit.obstacle,
        }
    }

    /// Detect and apply a strike in one step.
    pub fn respond<F: CollisionField + ?Sized>(&self, vehicle: &mut Vehicle, field: &F) -> Option<Strike> {
        let hit = self.detect(vehicle, field)?;
        Some(self.apply_strike(vehicle, &hit))
    }

    /// Tick the crash timer. Nothing else moves while crashed.
    ///
    /// Returns `true` on the frame the car recovers.
    pub fn update_recovery(&self, vehicle: &mut Vehicle, dt: f32) -> bool {
        if !vehicle.crash.crashed {
            return false;
        }

        vehicle.crash.recovery_timer -= dt;
        if vehicle.crash.recovery_timer > 0.0 {
            return false;
        }

        vehicle.position -= vehicle.forward() * self.config.recovery_offset;
        vehicle.velocity = Vec3::ZERO;
        vehicle.speed = 0.0;
        vehicle.nitro.active = false;
        vehicle.crash.crashed = false;
        vehicle.crash.recovery_timer = 0.0;
        // The pull-back is a teleport, not rotation
        vehicle.spin.reset();

        debug!(position = ?vehicle.position, "vehicle recovered");
        true
    }

    /// Manual restart: back to spawn, bypassing any crash timer.
    pub fn restart(&self, vehicle: &mut Vehicle) {
        vehicle.reset_to_spawn();
        debug!("vehicle restarted at spawn");
    }
}
