//! Storage Module
//!
//! Persistence capabilities injected into the session and the leaderboard
//! collaborator contract.
//!
//! - [`HighScoreStore`] - Best score persistence (memory, JSON file, browser storage)
//! - [`Leaderboard`] - Shared score table with retrying submission

pub mod high_score;
pub mod leaderboard;

pub use high_score::{HighScoreError, HighScoreStore, JsonFileHighScore, MemoryHighScore};
pub use leaderboard::{
    InMemoryLeaderboard, Leaderboard, LeaderboardEntry, LeaderboardError, MAX_NAME_CHARS,
    RetryPolicy, now_ms, rank_entries, submit_with_retry, validate_name,
};
