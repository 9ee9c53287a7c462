//! Chain multiplier
//!
//! Grows while the player keeps drifting and collapses back to 1 after a
//! short break. Scales the general [`ScoreEngine::add_score`](super::ScoreEngine::add_score)
//! path, not the drift bucket.

use serde::Serialize;

use crate::config::ScoreConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChainMultiplier {
    value: f32,
    /// Seconds since the last drifting frame
    idle_time: f32,
    #[serde(skip)]
    growth_rate: f32,
    #[serde(skip)]
    max: f32,
    #[serde(skip)]
    timeout: f32,
}

impl Default for ChainMultiplier {
    fn default() -> Self {
        Self::new(&ScoreConfig::default())
    }
}

impl ChainMultiplier {
    pub fn new(config: &ScoreConfig) -> Self {
        Self {
            value: 1.0,
            idle_time: 0.0,
            growth_rate: config.chain_growth_rate,
            max: config.max_chain_multiplier.max(1.0),
            timeout: config.chain_timeout,
        }
    }

    pub fn update(&mut self, drifting: bool, dt: f32) {
        if drifting {
            self.value = (self.value + self.growth_rate * dt).min(self.max);
            self.idle_time = 0.0;
        } else {
            self.idle_time += dt;
            if self.idle_time > self.timeout {
                self.value = 1.0;
            }
        }
    }

    /// Current multiplier in [1, max].
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 1.0;
        self.idle_time = 0.0;
    }
}
