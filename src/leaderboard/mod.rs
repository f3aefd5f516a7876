//! Leaderboard
//!
//! Append-only record of finished rounds, read back best-first (fewest
//! guesses). Writes are fire-and-forget: a failing store is logged and
//! otherwise ignored so it can never hold up the game.

pub mod store;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

pub use store::{JsonLinesLeaderboard, MemoryLeaderboard};

/// One finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name, trimmed and non-empty.
    pub username: String,
    /// Guesses consumed, timer expiries included.
    pub guesses_used: u8,
    /// Mystery found.
    pub completed: bool,
    /// When the entry was written.
    pub recorded_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    /// Build an entry stamped with the current time.
    ///
    /// The name is trimmed; blank names and zero guesses are rejected.
    pub fn new(username: &str, guesses_used: u8, completed: bool) -> Result<Self, LeaderboardError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LeaderboardError::InvalidEntry("blank username".into()));
        }
        if guesses_used == 0 {
            return Err(LeaderboardError::InvalidEntry("no guesses used".into()));
        }
        Ok(Self {
            username: username.to_string(),
            guesses_used,
            completed,
            recorded_at: Utc::now(),
        })
    }
}

impl fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} guesses - {}",
            self.username,
            self.guesses_used,
            if self.completed { "✔ Completed" } else { "✘ Incomplete" }
        )
    }
}

/// Leaderboard errors.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Storage I/O failed.
    #[error("leaderboard io: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding an entry failed.
    #[error("leaderboard encoding: {0}")]
    Json(#[from] serde_json::Error),

    /// Entry rejected before storage.
    #[error("invalid leaderboard entry: {0}")]
    InvalidEntry(String),

    /// Store lock poisoned.
    #[error("leaderboard unavailable")]
    Unavailable,
}

/// Durable result storage.
pub trait LeaderboardStore: Send + Sync {
    /// Append one entry.
    fn record(&self, entry: &LeaderboardEntry) -> Result<(), LeaderboardError>;

    /// Up to `n` entries by ascending guesses used; ties keep insertion order.
    fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;
}

/// Order entries best-first and keep `n`. Stable, so ties stay in insertion order.
pub(crate) fn rank_entries(mut entries: Vec<LeaderboardEntry>, n: usize) -> Vec<LeaderboardEntry> {
    entries.sort_by_key(|e| e.guesses_used);
    entries.truncate(n);
    entries
}

/// Record a finished round if the player gave a name.
///
/// Returns whether an entry was written. Never fails: errors are logged.
pub fn record_result(
    store: &dyn LeaderboardStore,
    raw_name: &str,
    guesses_used: u8,
    completed: bool,
) -> bool {
    if raw_name.trim().is_empty() {
        return false;
    }

    let entry = match LeaderboardEntry::new(raw_name, guesses_used, completed) {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Leaderboard entry rejected: {}", e);
            return false;
        }
    };

    match store.record(&entry) {
        Ok(()) => {
            info!("Recorded {} ({} guesses, completed: {})", entry.username, guesses_used, completed);
            true
        }
        Err(e) => {
            warn!("Failed to record leaderboard entry: {}", e);
            false
        }
    }
}

/// Read the top `n` entries; an unreadable store yields an empty list.
pub fn fetch_top(store: &dyn LeaderboardStore, n: usize) -> Vec<LeaderboardEntry> {
    store.top_n(n).unwrap_or_else(|e| {
        warn!("Failed to read leaderboard: {}", e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl LeaderboardStore for BrokenStore {
        fn record(&self, _entry: &LeaderboardEntry) -> Result<(), LeaderboardError> {
            Err(LeaderboardError::Unavailable)
        }

        fn top_n(&self, _n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
            Err(LeaderboardError::Unavailable)
        }
    }

    #[test]
    fn test_entry_trims_name() {
        let entry = LeaderboardEntry::new("  ada  ", 3, true).unwrap();
        assert_eq!(entry.username, "ada");
    }

    #[test]
    fn test_entry_rejects_blank() {
        assert!(matches!(
            LeaderboardEntry::new("   ", 3, true),
            Err(LeaderboardError::InvalidEntry(_))
        ));
        assert!(LeaderboardEntry::new("ada", 0, false).is_err());
    }

    #[test]
    fn test_entry_display() {
        let won = LeaderboardEntry::new("ada", 2, true).unwrap();
        let lost = LeaderboardEntry::new("bob", 6, false).unwrap();
        assert_eq!(won.to_string(), "ada - 2 guesses - ✔ Completed");
        assert_eq!(lost.to_string(), "bob - 6 guesses - ✘ Incomplete");
    }

    #[test]
    fn test_record_result_skips_blank_name() {
        let store = MemoryLeaderboard::new();
        assert!(!record_result(&store, " \t", 3, true));
        assert!(store.top_n(10).unwrap().is_empty());
    }

    #[test]
    fn test_record_result_writes_once() {
        let store = MemoryLeaderboard::new();
        assert!(record_result(&store, " ada ", 3, true));

        let top = store.top_n(10).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].username, "ada");
    }

    #[test]
    fn test_failures_are_swallowed() {
        assert!(!record_result(&BrokenStore, "ada", 3, true));
        assert!(fetch_top(&BrokenStore, 10).is_empty());
    }

    #[test]
    fn test_rank_entries_stable() {
        let entries = vec![
            LeaderboardEntry::new("c", 4, true).unwrap(),
            LeaderboardEntry::new("a", 2, true).unwrap(),
            LeaderboardEntry::new("b", 4, false).unwrap(),
            LeaderboardEntry::new("d", 1, true).unwrap(),
        ];

        let names: Vec<String> = rank_entries(entries, 3).into_iter().map(|e| e.username).collect();
        assert_eq!(names, vec!["d", "a", "c"]);
    }
}
