//! Game Configuration
//!
//! Read from `UNIGUESS_*` environment variables, falling back to defaults.

use std::path::PathBuf;

use thiserror::Error;

use crate::game::round::RoundConfig;
use crate::{MAX_GUESSES, ROUND_SECONDS};

/// Value of `UNIGUESS_LEADERBOARD` selecting the in-process store.
pub const MEMORY_LEADERBOARD: &str = "memory";

/// Where the leaderboard lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaderboardTarget {
    /// JSON-lines file.
    File(PathBuf),
    /// Lost on exit.
    Memory,
}

/// Game configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Catalog CSV path.
    pub catalog_path: PathBuf,
    /// Leaderboard storage.
    pub leaderboard: LeaderboardTarget,
    /// Guesses per round.
    pub max_guesses: u8,
    /// Seconds per guess.
    pub round_seconds: u32,
    /// Entries shown by `:top`.
    pub leaderboard_size: usize,
    /// Fixed shuffle seed; random when `None`.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("data/universities.csv"),
            leaderboard: LeaderboardTarget::File(PathBuf::from("leaderboard.jsonl")),
            max_guesses: MAX_GUESSES,
            round_seconds: ROUND_SECONDS,
            leaderboard_size: 10,
            seed: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Variable set but unusable.
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// What was expected.
        reason: &'static str,
    },
}

impl GameConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("UNIGUESS_CATALOG") {
            config.catalog_path = PathBuf::from(path);
        }

        if let Some(target) = lookup("UNIGUESS_LEADERBOARD") {
            config.leaderboard = if target.eq_ignore_ascii_case(MEMORY_LEADERBOARD) {
                LeaderboardTarget::Memory
            } else {
                LeaderboardTarget::File(PathBuf::from(target))
            };
        }

        if let Some(value) = lookup("UNIGUESS_MAX_GUESSES") {
            config.max_guesses = match value.trim().parse::<u8>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid("UNIGUESS_MAX_GUESSES", value, "expected 1..=255")),
            };
        }

        if let Some(value) = lookup("UNIGUESS_ROUND_SECONDS") {
            config.round_seconds = match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid("UNIGUESS_ROUND_SECONDS", value, "expected a positive integer")),
            };
        }

        if let Some(value) = lookup("UNIGUESS_LEADERBOARD_SIZE") {
            config.leaderboard_size = value
                .trim()
                .parse()
                .map_err(|_| invalid("UNIGUESS_LEADERBOARD_SIZE", value.clone(), "expected an integer"))?;
        }

        if let Some(value) = lookup("UNIGUESS_SEED") {
            config.seed = Some(
                parse_seed(&value)
                    .ok_or_else(|| invalid("UNIGUESS_SEED", value.clone(), "expected decimal or 0x-hex u64"))?,
            );
        }

        Ok(config)
    }

    /// Round limits.
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            max_guesses: self.max_guesses,
            round_seconds: self.round_seconds,
        }
    }
}

fn invalid(var: &'static str, value: String, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { var, value, reason }
}

fn parse_seed(value: &str) -> Option<u64> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex_digits) => u64::from_str_radix(hex_digits, 16).ok(),
        None => value.parse().ok(),
    }
}
