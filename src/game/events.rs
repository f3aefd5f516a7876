//! Round Events
//!
//! What the presentation layer hears about. Guess results come back from
//! `submit_guess` directly; the timer path has no caller to return to, so
//! the session forwards these events instead.

use serde::{Deserialize, Serialize};

use crate::game::round::{GuessReport, Round, RoundSummary, TickOutcome};

/// An event produced by a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// Countdown moved.
    Countdown {
        /// Seconds left for the current guess.
        seconds_remaining: u32,
        /// Guesses left.
        guesses_remaining: u8,
    },

    /// Countdown reached zero and cost a guess.
    TimeExpired {
        /// Guesses left afterwards.
        guesses_remaining: u8,
    },

    /// A valid guess was evaluated.
    GuessEvaluated(GuessReport),

    /// Round reached Won or Lost.
    RoundEnded(RoundSummary),
}

impl RoundEvent {
    /// Events for a tick outcome, read against the round after the tick.
    pub fn from_tick(outcome: TickOutcome, round: &Round) -> Vec<RoundEvent> {
        let mut events = match outcome {
            TickOutcome::Counting { seconds_remaining } => vec![RoundEvent::Countdown {
                seconds_remaining,
                guesses_remaining: round.guesses_remaining(),
            }],
            TickOutcome::Expired { guesses_remaining, .. } => {
                vec![RoundEvent::TimeExpired { guesses_remaining }]
            }
        };
        events.extend(ended(round));
        events
    }

    /// Events for a guess report, read against the round after the guess.
    pub fn from_guess(report: &GuessReport, round: &Round) -> Vec<RoundEvent> {
        let mut events = vec![RoundEvent::GuessEvaluated(report.clone())];
        events.extend(ended(round));
        events
    }

    /// Whether this is the final event of a round.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundEvent::RoundEnded(_))
    }
}

fn ended(round: &Round) -> Option<RoundEvent> {
    round.summary().map(RoundEvent::RoundEnded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::catalog::{Catalog, University};
    use crate::game::round::{RoundConfig, RoundPhase};

    fn create_test_round(max_guesses: u8, round_seconds: u32) -> Round {
        let catalog = Catalog::new(vec![
            University::new("A", 1, 1, "CA", "Public", ""),
            University::new("B", 2, 2, "NY", "Private", ""),
        ])
        .unwrap();
        Round::new(Arc::new(catalog), RoundConfig { max_guesses, round_seconds })
    }

    #[test]
    fn test_countdown_event() {
        let mut round = create_test_round(6, 60);
        let outcome = round.tick().unwrap();

        let events = RoundEvent::from_tick(outcome, &round);
        assert_eq!(
            events,
            vec![RoundEvent::Countdown { seconds_remaining: 59, guesses_remaining: 6 }]
        );
    }

    #[test]
    fn test_expiry_ending_round() {
        let mut round = create_test_round(1, 1);
        let outcome = round.tick().unwrap();

        let events = RoundEvent::from_tick(outcome, &round);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], RoundEvent::TimeExpired { guesses_remaining: 0 });
        match &events[1] {
            RoundEvent::RoundEnded(summary) => {
                assert_eq!(summary.phase, RoundPhase::Lost);
                assert_eq!(summary.guesses_used, 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(events[1].is_terminal());
    }

    #[test]
    fn test_guess_events() {
        let mut round = create_test_round(6, 60);

        let report = round.submit_guess("b").unwrap();
        let events = RoundEvent::from_guess(&report, &round);
        assert_eq!(events.len(), 1);

        let report = round.submit_guess("a").unwrap();
        let events = RoundEvent::from_guess(&report, &round);
        assert_eq!(events.len(), 2);
        assert!(events.last().unwrap().is_terminal());
    }
}
