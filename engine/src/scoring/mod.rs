//! Scoring Module
//!
//! - [`ScoreEngine`] - Drift bucket, drift multiplier, totals and high score
//! - [`ChainMultiplier`] - Combo multiplier for the general scoring path

pub mod combo;
pub mod engine;

pub use combo::ChainMultiplier;
pub use engine::{DriftCommit, ScoreEngine, ScoreState};
