//! Leaderboard contract
//!
//! The remote table itself lives outside the engine. This module defines the
//! collaborator interface, an in-memory implementation with the same rules
//! (one row per name, only improvements overwrite), and a bounded
//! exponential-backoff retry for transient failures.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

/// Longest accepted player name, in characters, after trimming.
pub const MAX_NAME_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Milliseconds since the Unix epoch of the last improving submission
    pub timestamp_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    /// Network hiccup or server overload; worth retrying
    #[error("leaderboard temporarily unavailable: {0}")]
    Transient(String),
    /// The backing table does not exist; retrying will not help
    #[error("leaderboard table missing: {0}")]
    MissingTable(String),
    #[error("invalid player name: {0}")]
    InvalidName(String),
}

impl LeaderboardError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, LeaderboardError::Transient(_))
    }
}

/// Shared high score table.
pub trait Leaderboard {
    /// Record `score` for `name`. Returns `true` if the stored score changed.
    fn submit_score(&mut self, name: &str, score: u64) -> Result<bool, LeaderboardError>;

    /// Best `n` entries, highest score first; ties go to the earlier entry.
    fn fetch_top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}

/// Trim and check a player name.
pub fn validate_name(name: &str) -> Result<String, LeaderboardError> {
    let trimmed = name.trim();
    let chars = trimmed.chars().count();
    if chars == 0 {
        return Err(LeaderboardError::InvalidName("name is empty".to_string()));
    }
    if chars > MAX_NAME_CHARS {
        return Err(LeaderboardError::InvalidName(format!(
            "name is {chars} characters, at most {MAX_NAME_CHARS} allowed"
        )));
    }
    Ok(trimmed.to_string())
}

/// Order entries for display: score descending, then oldest first.
pub fn rank_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.timestamp_ms.cmp(&b.timestamp_ms))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Milliseconds since the Unix epoch from the host clock.
pub fn now_ms() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

// =============================================================================
// In-memory table
// =============================================================================

/// Leaderboard held in memory, timestamped by an injected clock.
pub struct InMemoryLeaderboard {
    entries: HashMap<String, LeaderboardEntry>,
    clock: Box<dyn Fn() -> u64 + Send>,
}

impl Default for InMemoryLeaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryLeaderboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryLeaderboard")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl InMemoryLeaderboard {
    /// Table stamped with the host clock.
    pub fn new() -> Self {
        Self::with_clock(now_ms)
    }

    pub fn with_clock(clock: impl Fn() -> u64 + Send + 'static) -> Self {
        Self {
            entries: HashMap::new(),
            clock: Box::new(clock),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&LeaderboardEntry> {
        self.entries.get(name.trim())
    }
}

impl Leaderboard for InMemoryLeaderboard {
    fn submit_score(&mut self, name: &str, score: u64) -> Result<bool, LeaderboardError> {
        let name = validate_name(name)?;
        let timestamp_ms = (self.clock)();

        match self.entries.get_mut(&name) {
            Some(existing) if existing.score >= score => Ok(false),
            Some(existing) => {
                existing.score = score;
                existing.timestamp_ms = timestamp_ms;
                Ok(true)
            }
            None => {
                self.entries.insert(
                    name.clone(),
                    LeaderboardEntry {
                        name,
                        score,
                        timestamp_ms,
                    },
                );
                Ok(true)
            }
        }
    }

    fn fetch_top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut entries: Vec<LeaderboardEntry> = self.entries.values().cloned().collect();
        rank_entries(&mut entries);
        entries.truncate(n);
        Ok(entries)
    }
}

// =============================================================================
// Retry
// =============================================================================

/// Bounded exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub multiplier: u32,
    pub max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_ms: 250,
            multiplier: 2,
            max_delay_ms: 4000,
        }
    }
}

impl RetryPolicy {
    /// Wait before retry number `retry` (0 = after the first failure).
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = (self.multiplier.max(1) as u64).saturating_pow(retry);
        Duration::from_millis(self.base_delay_ms.saturating_mul(factor).min(self.max_delay_ms))
    }
}

/// Submit with retries on transient failures.
///
/// `sleep` performs the wait between attempts; the caller decides whether
/// that blocks a worker thread or schedules a timer. Non-transient errors
/// return immediately; on exhaustion the last error is returned.
pub fn submit_with_retry<L, S>(
    board: &mut L,
    name: &str,
    score: u64,
    policy: &RetryPolicy,
    mut sleep: S,
) -> Result<bool, LeaderboardError>
where
    L: Leaderboard + ?Sized,
    S: FnMut(Duration),
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match board.submit_score(name, score) {
            Ok(updated) => return Ok(updated),
            Err(err @ LeaderboardError::MissingTable(_)) => {
                error!(error = %err, "leaderboard table missing, not retrying");
                return Err(err);
            }
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) => {
                attempt += 1;
                if attempt >= attempts {
                    warn!(error = %err, attempts, "leaderboard submit gave up");
                    return Err(err);
                }
                let delay = policy.delay(attempt - 1);
                warn!(error = %err, attempt, delay_ms = delay.as_millis() as u64, "retrying leaderboard submit");
                sleep(delay);
            }
        }
    }
}
