//! Drift Model
//!
//! Arcade drift forces and spin detection.
//!
//! # Drift
//!
//! A drift engages while the drift key is held and the car is moving faster
//! than `min_drift_speed`. While engaged the car's velocity vector is owned
//! here instead of being slaved to the heading:
//!
//! ```text
//! v += right(h)   * steering * lateral_force * |speed| * dt
//! v += forward(h) * |speed|  * forward_force * dt
//! if angle(v, forward(h)) > max_slip_angle:
//!     v += forward(h) * slip_correction * |speed| * dt
//! ```
//!
//! The slip clamp keeps the slide from turning into a backwards skid.
//!
//! # Spins
//!
//! Spin detection runs every frame regardless of drift state. The heading
//! change since the previous frame gives an angular rate; sustained fast
//! rotation at speed earns a one-shot bonus when it ends.

use serde::Serialize;

use super::types::{Vec3, forward_vector, normalize_angle, right_vector, slip_angle};
use crate::config::DriftConfig;

// ============================================================================
// STATE
// ============================================================================

/// Per-vehicle drift bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DriftState {
    /// Whether the drift is engaged this frame
    pub active: bool,
    /// Seconds since the drift engaged, capped at `max_drift_duration`
    pub duration: f32,
    /// 0..1, saturates at half the max duration
    pub intensity: f32,
    /// Lateral force magnitude applied last frame
    pub force: f32,
}

impl DriftState {
    /// Force the drift off (strike, restart).
    pub fn end(&mut self) {
        self.active = false;
        self.intensity = 0.0;
        self.force = 0.0;
    }

    /// Clear everything including the last duration.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Result of evaluating drift engagement for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriftTransition {
    /// No change (still drifting or still gripping)
    #[default]
    Unchanged,
    /// Drift engaged this frame
    Started,
    /// Drift ended this frame
    Ended,
}

/// Spin detection bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SpinState {
    /// Heading rate measured last frame (rad/s)
    pub rate: f32,
    /// Currently spinning
    pub active: bool,
    /// Seconds spent in the current spin
    pub elapsed: f32,
    /// Raw score accumulated in the current spin
    pub accumulated: f32,
    #[serde(skip)]
    last_heading: Option<f32>,
}

impl SpinState {
    /// Drop the current spin but keep the heading reference.
    pub fn clear_spin(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
        self.accumulated = 0.0;
    }

    /// Full reset, including the heading reference so a teleport is not
    /// measured as rotation.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Heading seen on the previous frame, if any.
    pub fn last_heading(&self) -> Option<f32> {
        self.last_heading
    }
}

/// One-shot bonus earned by a completed spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpinBonus {
    /// Base bonus points, before any chain multiplier
    pub score: u64,
    /// Length of the spin in milliseconds
    pub duration_ms: u32,
}

impl SpinBonus {
    /// Spin length in seconds.
    pub fn duration_seconds(&self) -> f32 {
        self.duration_ms as f32 / 1000.0
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// Drift engagement, drift forces and spin detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct DriftModel {
    config: DriftConfig,
}

impl DriftModel {
    pub fn new(config: DriftConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Whether a drift may be engaged at this speed with the key held.
    pub fn can_engage(&self, drift_held: bool, speed: f32) -> bool {
        drift_held && speed.abs() > self.config.min_drift_speed
    }

    /// Evaluate engagement and advance duration/intensity.
    ///
    /// The caller re-seeds the velocity on [`DriftTransition::Started`].
    pub fn update_engagement(
        &self,
        state: &mut DriftState,
        drift_held: bool,
        speed: f32,
        dt: f32,
    ) -> DriftTransition {
        let engaged = self.can_engage(drift_held, speed);

        match (state.active, engaged) {
            (false, true) => {
                state.active = true;
                state.duration = 0.0;
                state.intensity = 0.0;
                DriftTransition::Started
            }
            (true, true) => {
                state.duration = (state.duration + dt).min(self.config.max_drift_duration);
                state.intensity = self.intensity_for(state.duration);
                DriftTransition::Unchanged
            }
            (true, false) => {
                state.end();
                DriftTransition::Ended
            }
            (false, false) => DriftTransition::Unchanged,
        }
    }

    /// Intensity for a drift duration: 0 at engagement, 1 at half the cap.
    pub fn intensity_for(&self, duration: f32) -> f32 {
        let half = 0.5 * self.config.max_drift_duration;
        if half <= 0.0 {
            return 1.0;
        }
        (duration / half).clamp(0.0, 1.0)
    }

    /// Add the drift forces to `velocity` and clamp the slip angle.
    ///
    /// Returns the lateral force magnitude for this frame.
    pub fn apply_forces(
        &self,
        velocity: &mut Vec3,
        heading: f32,
        steering: f32,
        speed: f32,
        dt: f32,
    ) -> f32 {
        let forward = forward_vector(heading);
        let right = right_vector(heading);
        let magnitude = speed.abs();

        *velocity += right * (steering * self.config.lateral_force * magnitude * dt);
        *velocity += forward * (magnitude * self.config.forward_force * dt);

        if slip_angle(*velocity, heading) > self.config.max_slip_angle {
            *velocity += forward * (self.config.slip_correction * magnitude * dt);
        }

        steering.abs() * self.config.lateral_force
    }

    /// Measure heading rotation and track spins.
    ///
    /// Returns a bonus on the frame a long enough spin ends.
    pub fn detect_spin(
        &self,
        spin: &mut SpinState,
        heading: f32,
        speed: f32,
        dt: f32,
    ) -> Option<SpinBonus> {
        let previous = spin.last_heading.replace(heading)?;

        spin.rate = if dt > 0.0 {
            normalize_angle(heading - previous).abs() / dt
        } else {
            0.0
        };

        let spinning =
            spin.rate > self.config.spin_rate_threshold && speed.abs() > self.config.spin_min_speed;

        if spinning {
            spin.active = true;
            spin.elapsed += dt;
            spin.accumulated += spin.rate * speed.abs() * dt;
            return None;
        }

        let bonus = (spin.active && spin.elapsed >= self.config.spin_min_duration).then(|| SpinBonus {
            score: (spin.accumulated * self.config.spin_bonus_multiplier).floor() as u64,
            duration_ms: (spin.elapsed * 1000.0).round() as u32,
        });

        spin.clear_spin();
        bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_engagement_requires_speed() {
        let model = DriftModel::default();
        let mut state = DriftState::default();

        assert_eq!(model.update_engagement(&mut state, true, 0.0, 0.1), DriftTransition::Unchanged);
        assert!(!state.active);

        assert_eq!(model.update_engagement(&mut state, true, 5.0, 0.1), DriftTransition::Unchanged);
        assert!(!state.active, "threshold is exclusive");

        assert_eq!(model.update_engagement(&mut state, true, -6.0, 0.1), DriftTransition::Started);
        assert!(state.active, "reverse speed counts by magnitude");
    }

    #[test]
    fn test_duration_resets_on_engage_and_caps() {
        let model = DriftModel::default();
        let mut state = DriftState { duration: 1.7, ..Default::default() };

        model.update_engagement(&mut state, true, 10.0, 0.1);
        assert_eq!(state.duration, 0.0);

        let mut last = 0.0;
        for _ in 0..40 {
            model.update_engagement(&mut state, true, 10.0, 0.1);
            assert!(state.duration >= last);
            last = state.duration;
        }
        assert!(approx_eq(state.duration, 2.5, 1e-5));
        assert!(approx_eq(state.intensity, 1.0, 1e-6));
    }

    #[test]
    fn test_intensity_ramp() {
        let model = DriftModel::default();
        assert_eq!(model.intensity_for(0.0), 0.0);
        assert!(approx_eq(model.intensity_for(0.625), 0.5, 1e-6));
        assert_eq!(model.intensity_for(2.0), 1.0);
    }

    #[test]
    fn test_release_ends_drift() {
        let model = DriftModel::default();
        let mut state = DriftState::default();
        model.update_engagement(&mut state, true, 10.0, 0.1);
        state.force = 1.5;

        assert_eq!(model.update_engagement(&mut state, false, 10.0, 0.1), DriftTransition::Ended);
        assert!(!state.active);
        assert_eq!(state.force, 0.0);

        // Dropping below the threshold also ends it
        model.update_engagement(&mut state, true, 10.0, 0.1);
        assert_eq!(model.update_engagement(&mut state, true, 4.0, 0.1), DriftTransition::Ended);
    }

    #[test]
    fn test_forces_push_sideways_and_forward() {
        let model = DriftModel::default();
        let mut velocity = Vec3::NEG_Z * 10.0;

        let force = model.apply_forces(&mut velocity, 0.0, 1.0, 10.0, 0.1);

        assert!(approx_eq(force, 1.5, 1e-6));
        // Steering right pushes toward +X
        assert!(approx_eq(velocity.x, 1.5, 1e-5));
        // Forward boost along -Z
        assert!(approx_eq(velocity.z, -10.15, 1e-4));
        assert_eq!(velocity.y, 0.0);
    }

    #[test]
    fn test_no_steering_no_drift_force() {
        let model = DriftModel::default();
        let mut velocity = Vec3::NEG_Z * 10.0;
        let force = model.apply_forces(&mut velocity, 0.0, 0.0, 10.0, 0.1);
        assert_eq!(force, 0.0);
        assert!(approx_eq(velocity.x, 0.0, 1e-6));
    }

    #[test]
    fn test_slip_clamp_pulls_toward_heading() {
        let model = DriftModel::default();
        // Sliding almost sideways relative to the heading
        let mut velocity = Vec3::X * 10.0;
        let before = slip_angle(velocity, 0.0);
        model.apply_forces(&mut velocity, 0.0, 0.0, 10.0, 0.1);
        let after = slip_angle(velocity, 0.0);

        assert!(before > model.config().max_slip_angle);
        assert!(after < before);
        // forward_force 0.15 plus correction 4.0, scaled by |speed| * dt
        assert!(approx_eq(velocity.z, -4.15, 1e-4));
    }

    #[test]
    fn test_first_frame_primes_heading() {
        let model = DriftModel::default();
        let mut spin = SpinState::default();
        assert!(model.detect_spin(&mut spin, 2.0, 10.0, 0.1).is_none());
        assert_eq!(spin.last_heading(), Some(2.0));
        assert_eq!(spin.rate, 0.0);
        assert!(!spin.active);
    }

    #[test]
    fn test_spin_bonus_after_sustained_rotation() {
        let model = DriftModel::default();
        let mut spin = SpinState::default();
        let mut heading = 0.0;
        model.detect_spin(&mut spin, heading, 10.0, 0.1);

        // 5 rad/s at 10 m/s for 1 s
        for _ in 0..10 {
            heading += 0.5;
            assert!(model.detect_spin(&mut spin, heading, 10.0, 0.1).is_none());
            assert!(spin.active);
        }
        assert!(approx_eq(spin.accumulated, 50.0, 1e-2));

        let bonus = model.detect_spin(&mut spin, heading, 10.0, 0.1).unwrap();
        // floor(50 * 2.5); allow float drift in the accumulated sum
        assert!(bonus.score == 125 || bonus.score == 124);
        assert_eq!(bonus.duration_ms, 1000);
        assert!(!spin.active);
        assert_eq!(spin.accumulated, 0.0);
    }

    #[test]
    fn test_short_spin_earns_nothing() {
        let model = DriftModel::default();
        let mut spin = SpinState::default();
        let mut heading = 0.0;
        model.detect_spin(&mut spin, heading, 10.0, 0.1);

        for _ in 0..3 {
            heading -= 0.5;
            model.detect_spin(&mut spin, heading, 10.0, 0.1);
        }
        assert!(spin.active);
        assert!(model.detect_spin(&mut spin, heading, 10.0, 0.1).is_none());
        assert_eq!(spin.elapsed, 0.0);
    }

    #[test]
    fn test_slow_rotation_is_not_a_spin() {
        let model = DriftModel::default();
        let mut spin = SpinState::default();
        model.detect_spin(&mut spin, 0.0, 10.0, 0.1);
        model.detect_spin(&mut spin, 0.5, 2.0, 0.1);
        assert!(!spin.active, "too slow to count");
        model.detect_spin(&mut spin, 0.6, 10.0, 0.1);
        assert!(!spin.active, "1 rad/s is below the rate threshold");
    }

    #[test]
    fn test_heading_wrap_is_not_a_spin() {
        let model = DriftModel::default();
        let mut spin = SpinState::default();
        model.detect_spin(&mut spin, PI - 0.01, 10.0, 0.1);
        model.detect_spin(&mut spin, PI + 0.01 - 2.0 * PI, 10.0, 0.1);
        assert!(approx_eq(spin.rate, 0.2, 1e-3));
    }

    #[test]
    fn test_reset_forgets_heading() {
        let model = DriftModel::default();
        let mut spin = SpinState::default();
        model.detect_spin(&mut spin, 0.0, 10.0, 0.1);
        spin.reset();
        // A teleport to a new heading only primes the reference
        assert!(model.detect_spin(&mut spin, 2.5, 10.0, 0.1).is_none());
        assert_eq!(spin.rate, 0.0);
    }
}
