//! High score persistence
//!
//! The session only needs "load the best score" and "save a new best". Both
//! are infallible from the caller's point of view: a broken store logs a
//! warning and behaves as if empty.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

/// Persisted best score.
pub trait HighScoreStore {
    /// Best score saved so far, 0 if none.
    fn load(&self) -> u64;
    /// Persist a new best score.
    fn save(&mut self, score: u64);
}

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("high score file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// In-process store, lost on exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryHighScore {
    score: u64,
}

impl MemoryHighScore {
    pub fn new(score: u64) -> Self {
        Self { score }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&self) -> u64 {
        self.score
    }

    fn save(&mut self, score: u64) {
        self.score = score;
    }
}

/// JSON object on disk mapping storage keys to scores.
///
/// ```json
/// { "driftHighScore": 4120 }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileHighScore {
    path: PathBuf,
    key: String,
}

impl JsonFileHighScore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read_table(&self) -> Result<BTreeMap<String, u64>, HighScoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub fn try_load(&self) -> Result<u64, HighScoreError> {
        Ok(self.read_table()?.get(&self.key).copied().unwrap_or(0))
    }

    /// Write the score, keeping other keys in the file.
    pub fn try_save(&self, score: u64) -> Result<(), HighScoreError> {
        let mut table = self.read_table().unwrap_or_else(|err| {
            warn!(error = %err, "replacing unreadable high score file");
            BTreeMap::new()
        });
        table.insert(self.key.clone(), score);

        let io_err = |source| HighScoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&table)?;
        fs::write(&self.path, json).map_err(io_err)?;

        debug!(path = %self.path.display(), score, "high score saved");
        Ok(())
    }
}

impl HighScoreStore for JsonFileHighScore {
    fn load(&self) -> u64 {
        self.try_load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to load high score, starting from 0");
            0
        })
    }

    fn save(&mut self, score: u64) {
        if let Err(err) = self.try_save(score) {
            warn!(error = %err, "failed to save high score");
        }
    }
}
