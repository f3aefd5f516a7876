//! Round State Machine
//!
//! One round: a mystery university, a guess budget and a per-guess
//! countdown. Two entry points mutate it, `submit_guess` and `tick`; callers
//! must serialize them (see `play::session`).
//!
//! ```text
//!            win                exhausted
//!   Won  <-------- Active --------------> Lost
//! ```
//!
//! Won and Lost are terminal. Every call after that is a no-op.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{normalize_guess, Catalog, University};
use crate::game::feedback::Feedback;
use crate::{MAX_GUESSES, ROUND_SECONDS};

// =============================================================================
// CONFIG & PHASE
// =============================================================================

/// Limits for a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Guesses available (at least 1).
    pub max_guesses: u8,
    /// Countdown per guess in ticks (at least 1).
    pub round_seconds: u32,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            max_guesses: MAX_GUESSES,
            round_seconds: ROUND_SECONDS,
        }
    }
}

/// Round lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Accepting guesses and ticks.
    Active,
    /// Mystery named.
    Won,
    /// Guesses exhausted.
    Lost,
}

impl RoundPhase {
    /// Won or Lost.
    pub fn is_ended(self) -> bool {
        !matches!(self, RoundPhase::Active)
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Result of a valid guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessReport {
    /// 1-based guess number (counts timer expiries too).
    pub guess_number: u8,
    /// University the text resolved to.
    pub guess: University,
    /// Comparison against the mystery.
    pub feedback: Feedback,
    /// Guesses left after this one.
    pub guesses_remaining: u8,
    /// Phase after evaluation.
    pub phase: RoundPhase,
}

/// Rejected guess. None of these change the round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    /// No catalog name contains the text.
    #[error("no university matches {0:?}")]
    NotFound(String),

    /// Nothing but whitespace.
    #[error("guess is empty")]
    EmptyGuess,

    /// Round already Won or Lost.
    #[error("round is over ({0:?})")]
    RoundOver(RoundPhase),
}

/// Result of one tick on an active round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Countdown still running.
    Counting {
        /// Seconds left for the current guess.
        seconds_remaining: u32,
    },
    /// Countdown hit zero and consumed a guess.
    Expired {
        /// Guesses left afterwards.
        guesses_remaining: u8,
        /// Active (countdown restarted) or Lost.
        phase: RoundPhase,
    },
}

/// Counters at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Current phase.
    pub phase: RoundPhase,
    /// Guesses left.
    pub guesses_remaining: u8,
    /// Seconds left for the current guess.
    pub seconds_remaining: u32,
    /// Guesses consumed so far (valid guesses plus expiries).
    pub guesses_used: u8,
}

/// Final state of an ended round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Won or Lost.
    pub phase: RoundPhase,
    /// Guesses consumed.
    pub guesses_used: u8,
    /// The mystery, for the reveal.
    pub mystery: University,
}

impl RoundSummary {
    /// Whether the player found the mystery.
    pub fn completed(&self) -> bool {
        self.phase == RoundPhase::Won
    }
}

// =============================================================================
// ROUND
// =============================================================================

/// A single round against one mystery university.
#[derive(Clone, Debug)]
pub struct Round {
    catalog: Arc<Catalog>,
    mystery: usize,
    config: RoundConfig,
    guesses_remaining: u8,
    seconds_remaining: u32,
    phase: RoundPhase,
    history: Vec<GuessReport>,
}

impl Round {
    /// Start a round whose mystery is the first catalog entry.
    ///
    /// Shuffle the catalog beforehand to randomize the pick.
    pub fn new(catalog: Arc<Catalog>, config: RoundConfig) -> Self {
        Self::build(catalog, 0, config)
    }

    /// Start a round against a specific catalog index.
    pub fn with_mystery(catalog: Arc<Catalog>, mystery: usize, config: RoundConfig) -> Option<Self> {
        if mystery >= catalog.len() {
            return None;
        }
        Some(Self::build(catalog, mystery, config))
    }

    fn build(catalog: Arc<Catalog>, mystery: usize, config: RoundConfig) -> Self {
        let config = RoundConfig {
            max_guesses: config.max_guesses.max(1),
            round_seconds: config.round_seconds.max(1),
        };
        Self {
            catalog,
            mystery,
            config,
            guesses_remaining: config.max_guesses,
            seconds_remaining: config.round_seconds,
            phase: RoundPhase::Active,
            history: Vec::new(),
        }
    }

    /// Submit free text. See module docs for the state rules.
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessReport, GuessError> {
        if self.phase.is_ended() {
            return Err(GuessError::RoundOver(self.phase));
        }

        let normalized = normalize_guess(raw);
        if normalized.is_empty() {
            return Err(GuessError::EmptyGuess);
        }

        let guess = self
            .catalog
            .lookup(&normalized)
            .cloned()
            .ok_or_else(|| GuessError::NotFound(raw.trim().to_string()))?;

        // Matched, so the guess counts before the win check
        self.guesses_remaining -= 1;

        let feedback = Feedback::evaluate(&guess, self.mystery());

        if feedback.is_win {
            self.phase = RoundPhase::Won;
        } else if self.guesses_remaining == 0 {
            self.phase = RoundPhase::Lost;
        } else {
            self.seconds_remaining = self.config.round_seconds;
        }

        let report = GuessReport {
            guess_number: self.guesses_used(),
            guess,
            feedback,
            guesses_remaining: self.guesses_remaining,
            phase: self.phase,
        };
        self.history.push(report.clone());

        Ok(report)
    }

    /// Advance the countdown by one second. `None` once the round is over.
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.phase.is_ended() {
            return None;
        }

        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining > 0 {
            return Some(TickOutcome::Counting {
                seconds_remaining: self.seconds_remaining,
            });
        }

        // Expiry is an implicit failed guess
        self.guesses_remaining -= 1;
        if self.guesses_remaining == 0 {
            self.phase = RoundPhase::Lost;
        } else {
            self.seconds_remaining = self.config.round_seconds;
        }

        Some(TickOutcome::Expired {
            guesses_remaining: self.guesses_remaining,
            phase: self.phase,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Won or Lost.
    pub fn is_ended(&self) -> bool {
        self.phase.is_ended()
    }

    /// Guesses left.
    pub fn guesses_remaining(&self) -> u8 {
        self.guesses_remaining
    }

    /// Seconds left for the current guess.
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Guesses consumed so far.
    pub fn guesses_used(&self) -> u8 {
        self.config.max_guesses - self.guesses_remaining
    }

    /// Effective limits.
    pub fn config(&self) -> RoundConfig {
        self.config
    }

    /// The university to find.
    pub fn mystery(&self) -> &University {
        // Index validated at construction; the catalog is immutable
        &self.catalog.as_slice()[self.mystery]
    }

    /// Reports for every valid guess, oldest first.
    pub fn history(&self) -> &[GuessReport] {
        &self.history
    }

    /// Counters at this instant.
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            guesses_remaining: self.guesses_remaining,
            seconds_remaining: self.seconds_remaining,
            guesses_used: self.guesses_used(),
        }
    }

    /// Final result, once the round has ended.
    pub fn summary(&self) -> Option<RoundSummary> {
        if !self.is_ended() {
            return None;
        }
        Some(RoundSummary {
            phase: self.phase,
            guesses_used: self.guesses_used(),
            mystery: self.mystery().clone(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
