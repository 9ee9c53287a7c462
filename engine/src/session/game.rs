//! Drift Session
//!
//! Owns the car, the obstacle field, scoring, the clock and the event queue,
//! and runs one simulation frame at a time in a fixed order:
//!
//! 1. Reject invalid deltas
//! 2. Restart (any phase, bypasses the crash timer)
//! 3. Game over freezes everything
//! 4. Crash recovery, or dynamics + collision query + strike response
//! 5. Drift scoring and the chain multiplier
//! 6. Spin bonus through the general scoring path
//! 7. Clock tick, game over on expiry
//! 8. High score persistence
//!
//! # Usage
//!
//! ```rust,ignore
//! use drift_rush_engine::{DriftSession, FramePacer, GameConfig, MemoryHighScore, ObstacleField};
//!
//! let mut session = DriftSession::new(
//!     GameConfig::default(),
//!     ObstacleField::walled_arena(60.0, 2.0, 3.0),
//!     Box::new(MemoryHighScore::default()),
//! )?;
//! session.start();
//!
//! // Each frame:
//! if let Some(dt) = pacer.tick(now_ms) {
//!     session.frame(keys.snapshot(), dt);
//!     for event in session.drain_events() { /* update HUD */ }
//! }
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ConfigError, GameConfig};
use crate::input::InputSnapshot;
use crate::physics::{CollisionField, ObstacleField};
use crate::scoring::ScoreEngine;
use crate::storage::HighScoreStore;
use crate::vehicle::{CollisionResponse, Vehicle, VehicleDynamics};

use super::{EventQueue, GameEvent, SessionClock, Telemetry};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// Clock stopped; the car can be driven but nothing scores
    Ready,
    /// Clock counting down
    Running,
    /// Clock ran out; frozen until a new session
    GameOver,
}

/// What [`DriftSession::frame`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Delta was invalid; nothing changed
    Skipped,
    /// Restart flag handled; the rest of the frame was skipped
    Restarted,
    /// Game over; nothing changed
    Frozen,
    /// A full simulation step ran
    Simulated,
}

pub struct DriftSession<F: CollisionField = ObstacleField> {
    config: GameConfig,
    dynamics: VehicleDynamics,
    collision: CollisionResponse,
    vehicle: Vehicle,
    score: ScoreEngine,
    clock: SessionClock,
    field: F,
    store: Box<dyn HighScoreStore>,
    events: EventQueue,
    phase: SessionPhase,
}

impl<F: CollisionField> DriftSession<F> {
    /// Build a session in the `Ready` phase. Fails if `config` is invalid.
    pub fn new(config: GameConfig, field: F, store: Box<dyn HighScoreStore>) -> Result<Self, ConfigError> {
        config.validate()?;

        let high_score = store.load();
        info!(
            high_score,
            time_limit = config.session.time_limit,
            "drift session created"
        );

        Ok(Self {
            dynamics: VehicleDynamics::new(config.vehicle, config.drift),
            collision: CollisionResponse::new(config.collision),
            vehicle: Vehicle::new(&config.vehicle),
            score: ScoreEngine::new(config.scoring, config.vehicle.max_speed, high_score),
            clock: SessionClock::new(config.session.time_limit),
            field,
            store,
            events: EventQueue::new(),
            phase: SessionPhase::Ready,
            config,
        })
    }

    /// Start the countdown. Only valid from `Ready`.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::Ready || !self.clock.start() {
            return false;
        }
        self.phase = SessionPhase::Running;
        info!(time_limit = self.clock.time_limit(), "session started");
        true
    }

    /// Reset car, score and clock back to `Ready`.
    pub fn new_session(&mut self) {
        self.vehicle.reset_to_spawn();
        self.score.reset_score();
        self.clock.reset();
        self.events.clear();
        self.phase = SessionPhase::Ready;
        info!("new session ready");
    }

    /// Put the car back at spawn and drop any pending drift points.
    pub fn restart(&mut self) {
        self.collision.restart(&mut self.vehicle);
        self.score.abandon_drift();
    }

    /// Run one frame.
    pub fn frame(&mut self, input: InputSnapshot, dt: f32) -> FrameOutcome {
        if !dt.is_finite() || dt <= 0.0 || dt > self.config.session.max_frame_dt {
            return FrameOutcome::Skipped;
        }

        if input.restart {
            self.restart();
            return FrameOutcome::Restarted;
        }

        if self.phase == SessionPhase::GameOver {
            return FrameOutcome::Frozen;
        }

        let running = self.clock.is_running();
        let mut spin_bonus = None;

        if self.vehicle.is_crashed() {
            if self.collision.update_recovery(&mut self.vehicle, dt) {
                self.events.push(GameEvent::Recovered);
            }
        } else {
            let report = self.dynamics.advance(&mut self.vehicle, &input, dt);
            spin_bonus = report.spin_bonus;

            if let Some(strike) = self.collision.respond(&mut self.vehicle, &self.field) {
                self.events.push(GameEvent::Collision {
                    impact_speed: strike.impact_speed,
                    normal: strike.normal,
                });
            }
        }

        if let Some(commit) = self.score.update(&mut self.vehicle, dt, running) {
            self.events.push(GameEvent::DriftScored {
                points: commit.points,
                total_score: commit.total_score,
            });
        }

        if let Some(bonus) = spin_bonus.filter(|_| running) {
            let awarded = self.score.add_score(bonus.score, running);
            debug!(score = bonus.score, awarded, "spin bonus");
            self.events.push(GameEvent::SpinoutBonus {
                score: bonus.score,
                awarded,
                duration_seconds: bonus.duration_seconds(),
            });
        }

        if self.clock.tick(dt) {
            self.finish();
        }

        if let Some(high_score) = self.score.take_new_high_score() {
            self.store.save(high_score);
        }

        FrameOutcome::Simulated
    }

    /// Clock expiry: bank the drift in progress and freeze.
    fn finish(&mut self) {
        if let Some(commit) = self.score.finish_drift(&mut self.vehicle) {
            self.events.push(GameEvent::DriftScored {
                points: commit.points,
                total_score: commit.total_score,
            });
        }
        self.vehicle.drift.end();
        self.vehicle.nitro.active = false;
        self.phase = SessionPhase::GameOver;

        let final_score = self.score.total();
        let high_score = self.score.high_score();
        self.events.push(GameEvent::GameOver {
            final_score,
            high_score,
        });
        info!(final_score, high_score, "game over");
    }

    /// Events produced since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    pub fn telemetry(&self) -> Telemetry {
        let vehicle = &self.vehicle;
        Telemetry {
            position: vehicle.position(),
            heading: vehicle.heading(),
            speed: vehicle.speed(),
            velocity: vehicle.velocity(),
            steering: vehicle.steering(),
            drift_active: vehicle.is_drifting(),
            drift_duration: vehicle.drift().duration,
            drift_intensity: vehicle.drift().intensity,
            drift_force: vehicle.drift().force,
            nitro_charge: vehicle.nitro().charge,
            nitro_active: vehicle.nitro().active,
            crashed: vehicle.is_crashed(),
            spinning: vehicle.is_spinning(),
            total_score: self.score.total(),
            pending_drift_points: self.score.pending_points(),
            drift_multiplier: self.score.drift_multiplier(),
            chain_multiplier: self.score.chain_multiplier(),
            high_score: self.score.high_score(),
            remaining_time: self.clock.remaining(),
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Mutable car access for scripted setups (teleports, starting speed).
    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    pub fn score(&self) -> &ScoreEngine {
        &self.score
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut F {
        &mut self.field
    }
}
