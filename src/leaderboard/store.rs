//! Leaderboard Stores
//!
//! `JsonLinesLeaderboard` appends one JSON object per line to a file.
//! `MemoryLeaderboard` keeps entries in process.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use super::{rank_entries, LeaderboardEntry, LeaderboardError, LeaderboardStore};

/// File-backed store, one entry per line.
#[derive(Debug, Clone)]
pub struct JsonLinesLeaderboard {
    path: PathBuf,
}

impl JsonLinesLeaderboard {
    /// Store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let entries = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    debug!("Skipping leaderboard line {}: {}", idx + 1, e);
                    None
                }
            })
            .collect();

        Ok(entries)
    }
}

impl LeaderboardStore for JsonLinesLeaderboard {
    fn record(&self, entry: &LeaderboardEntry) -> Result<(), LeaderboardError> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        Ok(rank_entries(self.read_all()?, n))
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Mutex<Vec<LeaderboardEntry>>,
}

impl MemoryLeaderboard {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl LeaderboardStore for MemoryLeaderboard {
    fn record(&self, entry: &LeaderboardEntry) -> Result<(), LeaderboardError> {
        let mut entries = self.entries.lock().map_err(|_| LeaderboardError::Unavailable)?;
        entries.push(entry.clone());
        Ok(())
    }

    fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let entries = self.entries.lock().map_err(|_| LeaderboardError::Unavailable)?;
        Ok(rank_entries(entries.clone(), n))
    }
}
