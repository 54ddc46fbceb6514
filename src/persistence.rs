//! High score storage
//!
//! Persistence is best-effort: a missing or unreadable record loads as zero,
//! and callers log failed saves instead of stopping the game.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::{Path, PathBuf};

/// Where the best score survives between sessions
pub trait HighScoreStore {
    /// Stored high score, or 0 when absent or invalid
    fn load(&self) -> u32;

    fn save(&self, high_score: u32) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Keeps the high score in a small JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> u32 {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!("no high score at {:?}: {}", self.path, err);
                return 0;
            }
        };

        match serde_json::from_str::<HighScoreRecord>(&contents) {
            Ok(record) => record.high_score,
            Err(err) => {
                warn!("ignoring invalid high score file {:?}: {}", self.path, err);
                0
            }
        }
    }

    fn save(&self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string(&HighScoreRecord { high_score })
            .context("Failed to serialize high score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write high score to {:?}", self.path))?;
        Ok(())
    }
}

/// In-process store, used when nothing should touch the disk
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Cell<u32>,
}

impl MemoryStore {
    pub fn new(high_score: u32) -> Self {
        Self {
            value: Cell::new(high_score),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.get()
    }

    fn save(&self, high_score: u32) -> Result<()> {
        self.value.set(high_score);
        Ok(())
    }
}
