//! Score Engine
//!
//! Drift points accrue into a pending bucket while a drift lasts and are
//! committed to the total when it ends. The bucket grows faster the longer the
//! drift is held (drift multiplier) and the faster the car goes.
//!
//! ```text
//! multiplier = min(max, 1 + drift_time * ramp)
//! bucket    += points_per_second * min(1, |speed| / max_speed) * multiplier * dt
//! ```
//!
//! A committed drift also refills nitro. A drift cut short by a crash or a
//! restart is thrown away.

use serde::Serialize;
use tracing::debug;

use crate::config::ScoreConfig;
use crate::vehicle::Vehicle;

use super::ChainMultiplier;

/// Points credited by a finished drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriftCommit {
    pub points: u64,
    pub total_score: u64,
}

/// Observable scoring state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreState {
    pub total: u64,
    /// Uncommitted drift points
    pub pending: f32,
    pub drift_multiplier: f32,
    pub chain_multiplier: f32,
    pub high_score: u64,
}

#[derive(Debug, Clone)]
pub struct ScoreEngine {
    config: ScoreConfig,
    max_speed: f32,
    total: u64,
    pending: f32,
    drift_multiplier: f32,
    /// Uncapped time in the current drift
    drift_time: f32,
    was_drifting: bool,
    chain: ChainMultiplier,
    high_score: u64,
    high_score_dirty: bool,
}

impl ScoreEngine {
    pub fn new(config: ScoreConfig, max_speed: f32, high_score: u64) -> Self {
        Self {
            config,
            max_speed,
            total: 0,
            pending: 0.0,
            drift_multiplier: 1.0,
            drift_time: 0.0,
            was_drifting: false,
            chain: ChainMultiplier::new(&config),
            high_score,
            high_score_dirty: false,
        }
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn pending_points(&self) -> f32 {
        self.pending
    }

    pub fn drift_multiplier(&self) -> f32 {
        self.drift_multiplier
    }

    pub fn chain_multiplier(&self) -> f32 {
        self.chain.value()
    }

    pub fn chain(&self) -> &ChainMultiplier {
        &self.chain
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn state(&self) -> ScoreState {
        ScoreState {
            total: self.total,
            pending: self.pending,
            drift_multiplier: self.drift_multiplier,
            chain_multiplier: self.chain.value(),
            high_score: self.high_score,
        }
    }

    /// Per-frame scoring after the vehicle has moved.
    ///
    /// `running` gates accrual and commits; when the clock is stopped the
    /// bucket stays empty. Returns the commit on the frame a drift ends.
    pub fn update(&mut self, vehicle: &mut Vehicle, dt: f32, running: bool) -> Option<DriftCommit> {
        let drifting = vehicle.is_drifting();
        let mut commit = None;

        if drifting {
            if !self.was_drifting {
                self.drift_time = 0.0;
                self.drift_multiplier = 1.0;
            }
            self.drift_time += dt;
            self.drift_multiplier =
                (1.0 + self.drift_time * self.config.drift_multiplier_ramp).min(self.config.max_drift_multiplier.max(1.0));

            if running {
                let speed_ratio = (vehicle.speed().abs() / self.max_speed).min(1.0);
                self.pending += self.config.drift_points_per_second * speed_ratio * self.drift_multiplier * dt;
            }
        } else if self.was_drifting {
            if vehicle.is_crashed() || !running {
                self.cancel_pending();
            } else {
                commit = self.commit_pending(vehicle);
            }
        }

        self.chain.update(drifting, dt);
        self.was_drifting = drifting;
        commit
    }

    /// Move the bucket into the total and refill nitro.
    ///
    /// Returns `None` when no drift is in progress.
    pub fn commit_pending(&mut self, vehicle: &mut Vehicle) -> Option<DriftCommit> {
        if !self.was_drifting && !vehicle.is_drifting() {
            return None;
        }

        let points = self.pending.max(0.0).floor() as u64;
        self.total = self.total.saturating_add(points);
        let nitro = vehicle.refill_nitro(points as f32 * self.config.nitro_recovery_rate);
        self.clear_drift();
        self.raise_high_score();

        debug!(points, total = self.total, nitro, "drift committed");

        Some(DriftCommit {
            points,
            total_score: self.total,
        })
    }

    /// Commit a drift still in progress (session end).
    pub fn finish_drift(&mut self, vehicle: &mut Vehicle) -> Option<DriftCommit> {
        let commit = self.commit_pending(vehicle);
        self.was_drifting = false;
        commit
    }

    /// Throw the bucket away (crash, restart).
    pub fn cancel_pending(&mut self) {
        if self.pending > 0.0 {
            debug!(pending = self.pending, "drift points discarded");
        }
        self.clear_drift();
    }

    /// Forget the current drift entirely, as after a restart.
    pub fn abandon_drift(&mut self) {
        self.cancel_pending();
        self.was_drifting = false;
    }

    /// General scoring path, scaled by the chain multiplier.
    ///
    /// Returns the points credited (0 when not running).
    pub fn add_score(&mut self, points: u64, running: bool) -> u64 {
        if !running {
            return 0;
        }
        let credited = (points as f64 * self.chain.value() as f64).floor() as u64;
        self.total = self.total.saturating_add(credited);
        self.raise_high_score();
        credited
    }

    /// Clear the total and all multipliers for a new session.
    pub fn reset_score(&mut self) {
        self.total = 0;
        self.abandon_drift();
        self.chain.reset();
        self.high_score_dirty = false;
    }

    /// The high score if it was raised since the last call.
    pub fn take_new_high_score(&mut self) -> Option<u64> {
        std::mem::take(&mut self.high_score_dirty).then_some(self.high_score)
    }

    fn clear_drift(&mut self) {
        self.pending = 0.0;
        self.drift_time = 0.0;
        self.drift_multiplier = 1.0;
    }

    fn raise_high_score(&mut self) {
        if self.total > self.high_score {
            self.high_score = self.total;
            self.high_score_dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn drifting_vehicle(speed: f32) -> Vehicle {
        let mut vehicle = Vehicle::at_spawn(Vec3::new(0.0, 0.5, 0.0), 0.0);
        vehicle.set_speed(speed);
        vehicle.drift.active = true;
        vehicle
    }

    fn engine() -> ScoreEngine {
        ScoreEngine::new(ScoreConfig::default(), 25.0, 0)
    }

    #[test]
    fn test_bucket_accrues_while_drifting() {
        let mut score = engine();
        let mut vehicle = drifting_vehicle(25.0);

        assert!(score.update(&mut vehicle, 1.0, true).is_none());
        // 100 pts/s * full speed * multiplier 1.5
        assert!((score.pending_points() - 150.0).abs() < 1e-3);
        assert!((score.drift_multiplier() - 1.5).abs() < 1e-6);
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn test_drift_multiplier_caps() {
        let mut score = engine();
        let mut vehicle = drifting_vehicle(10.0);
        for _ in 0..100 {
            score.update(&mut vehicle, 0.1, true);
        }
        assert_eq!(score.drift_multiplier(), 5.0);
    }

    #[test]
    fn test_commit_on_drift_end() {
        let mut score = engine();
        let mut vehicle = drifting_vehicle(25.0);
        vehicle.set_nitro_charge(50.0);
        score.update(&mut vehicle, 1.0, true);

        vehicle.drift.end();
        let commit = score.update(&mut vehicle, 0.1, true).unwrap();

        assert_eq!(commit.points, 150);
        assert_eq!(commit.total_score, 150);
        assert_eq!(score.pending_points(), 0.0);
        assert_eq!(score.drift_multiplier(), 1.0);
        // 150 * 0.05 = 7.5 nitro
        assert!((vehicle.nitro().charge - 57.5).abs() < 1e-4);

        // One commit per drift
        assert!(score.update(&mut vehicle, 0.1, true).is_none());
    }

    #[test]
    fn test_crash_discards_bucket() {
        let mut score = engine();
        let mut vehicle = drifting_vehicle(25.0);
        score.update(&mut vehicle, 1.0, true);

        vehicle.drift.end();
        vehicle.crash.crashed = true;
        assert!(score.update(&mut vehicle, 0.1, true).is_none());
        assert_eq!(score.total(), 0);
        assert_eq!(score.pending_points(), 0.0);
    }

    #[test]
    fn test_nothing_accrues_while_stopped() {
        let mut score = engine();
        let mut vehicle = drifting_vehicle(25.0);
        score.update(&mut vehicle, 1.0, false);
        assert_eq!(score.pending_points(), 0.0);
        vehicle.drift.end();
        assert!(score.update(&mut vehicle, 0.1, false).is_none());
        assert_eq!(score.add_score(100, false), 0);
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn test_add_score_uses_chain() {
        let mut score = engine();
        let mut vehicle = drifting_vehicle(25.0);
        // Chain reaches 2.0 after 2 s of drifting
        for _ in 0..20 {
            score.update(&mut vehicle, 0.1, true);
        }
        assert!((score.chain_multiplier() - 2.0).abs() < 1e-4);

        let before = score.total();
        let credited = score.add_score(100, true);
        assert!(credited == 200 || credited == 199);
        assert_eq!(score.total(), before + credited);
    }

    #[test]
    fn test_finish_drift_commits_in_progress() {
        let mut score = engine();
        let mut vehicle = drifting_vehicle(25.0);
        score.update(&mut vehicle, 1.0, true);

        let commit = score.finish_drift(&mut vehicle).unwrap();
        assert_eq!(commit.points, 150);

        // The drift ending afterwards does not commit again
        vehicle.drift.end();
        assert!(score.update(&mut vehicle, 0.1, true).is_none());
        assert_eq!(score.total(), 150);
    }

    #[test]
    fn test_high_score_tracking() {
        let mut score = ScoreEngine::new(ScoreConfig::default(), 25.0, 120);
        assert_eq!(score.add_score(100, true), 100);
        assert!(score.take_new_high_score().is_none());

        score.add_score(50, true);
        assert_eq!(score.take_new_high_score(), Some(150));
        assert!(score.take_new_high_score().is_none());
        assert_eq!(score.high_score(), 150);

        score.reset_score();
        assert_eq!(score.total(), 0);
        assert_eq!(score.high_score(), 150);
    }
}
