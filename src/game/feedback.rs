//! Guess Feedback
//!
//! Compares a guessed university against the mystery one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::University;

/// Direction hint for a rank comparison.
///
/// Lower rank numbers are better, so a guess ranked 20 against a mystery
/// ranked 5 points `Down` the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankArrow {
    /// Guess rank number is greater than the mystery's.
    Down,
    /// Guess rank number is smaller than the mystery's.
    Up,
    /// Same rank.
    Match,
}

impl RankArrow {
    /// Compare a guessed rank with the mystery rank.
    pub fn compare(guess: u32, mystery: u32) -> Self {
        use std::cmp::Ordering;
        match guess.cmp(&mystery) {
            Ordering::Greater => RankArrow::Down,
            Ordering::Less => RankArrow::Up,
            Ordering::Equal => RankArrow::Match,
        }
    }

    /// Symbol shown next to the rank.
    pub fn symbol(self) -> &'static str {
        match self {
            RankArrow::Down => "↓",
            RankArrow::Up => "↑",
            RankArrow::Match => "✅",
        }
    }
}

impl fmt::Display for RankArrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One tag of the guessed university and whether the mystery shares it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMark {
    /// Tag text as written in the guessed university's row.
    pub label: String,
    /// Mystery has the same tag (case-insensitive).
    pub correct: bool,
}

/// Structured comparison for one guess.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Current rank hint.
    pub rank: RankArrow,
    /// Highest rank hint.
    pub highest_rank: RankArrow,
    /// Same state or region.
    pub state_correct: bool,
    /// Guessed tags in their original order.
    pub tags: Vec<TagMark>,
    /// Guess names the mystery exactly (case-insensitive).
    pub is_win: bool,
}

impl Feedback {
    /// Evaluate `guess` against `mystery`.
    pub fn evaluate(guess: &University, mystery: &University) -> Self {
        let mystery_tags = mystery.tag_set();

        let tags = guess
            .tags()
            .map(|tag| TagMark {
                label: tag.to_string(),
                correct: mystery_tags.contains(&tag.to_lowercase()),
            })
            .collect();

        Self {
            rank: RankArrow::compare(guess.current_rank(), mystery.current_rank()),
            highest_rank: RankArrow::compare(guess.highest_rank(), mystery.highest_rank()),
            state_correct: guess.state().to_lowercase() == mystery.state().to_lowercase(),
            tags,
            is_win: guess.same_name(mystery),
        }
    }

    /// Number of shared tags.
    pub fn correct_tag_count(&self) -> usize {
        self.tags.iter().filter(|t| t.correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uni(name: &str, rank: u32, high: u32, state: &str, tags: &str) -> University {
        University::new(name, rank, high, state, tags, "https://example.edu")
    }

    #[test]
    fn test_rank_arrows() {
        assert_eq!(RankArrow::compare(2, 1), RankArrow::Down);
        assert_eq!(RankArrow::compare(1, 2), RankArrow::Up);
        assert_eq!(RankArrow::compare(4, 4), RankArrow::Match);
        assert_eq!(RankArrow::Down.to_string(), "↓");
        assert_eq!(RankArrow::Up.to_string(), "↑");
        assert_eq!(RankArrow::Match.to_string(), "✅");
    }

    #[test]
    fn test_scenario_wrong_guess() {
        let a = uni("A", 1, 1, "CA", "Public;Large");
        let b = uni("B", 2, 1, "CA", "Private;Small");

        let fb = Feedback::evaluate(&b, &a);
        assert_eq!(fb.rank, RankArrow::Down);
        assert_eq!(fb.highest_rank, RankArrow::Match);
        assert!(fb.state_correct);
        assert_eq!(
            fb.tags,
            vec![
                TagMark { label: "Private".into(), correct: false },
                TagMark { label: "Small".into(), correct: false },
            ]
        );
        assert!(!fb.is_win);
    }

    #[test]
    fn test_tags_case_insensitive_any_position() {
        let mystery = uni("M", 5, 5, "NY", "research ; PRIVATE;Urban");
        let guess = uni("G", 5, 5, "ny", "Urban;Rural;Private");

        let fb = Feedback::evaluate(&guess, &mystery);
        let labels: Vec<(&str, bool)> = fb.tags.iter().map(|t| (t.label.as_str(), t.correct)).collect();
        assert_eq!(labels, vec![("Urban", true), ("Rural", false), ("Private", true)]);
        assert_eq!(fb.correct_tag_count(), 2);
        assert!(fb.state_correct);
    }

    #[test]
    fn test_win_requires_full_name() {
        let mystery = uni("Harvard University", 1, 1, "MA", "Ivy League");
        let same = uni("HARVARD UNIVERSITY", 1, 1, "MA", "Ivy League");
        let partial = uni("Harvard", 1, 1, "MA", "Ivy League");

        assert!(Feedback::evaluate(&same, &mystery).is_win);
        assert!(!Feedback::evaluate(&partial, &mystery).is_win);
    }

    proptest! {
        #[test]
        fn prop_tag_marked_iff_in_mystery(
            guess_tags in proptest::collection::vec("[A-Za-z]{1,6}", 0..6),
            mystery_tags in proptest::collection::vec("[A-Za-z]{1,6}", 0..6),
        ) {
            let guess = uni("G", 1, 1, "X", &guess_tags.join(";"));
            let mystery = uni("M", 1, 1, "X", &mystery_tags.join(";"));
            let fb = Feedback::evaluate(&guess, &mystery);

            prop_assert_eq!(fb.tags.len(), guess_tags.len());
            for (mark, original) in fb.tags.iter().zip(&guess_tags) {
                prop_assert_eq!(&mark.label, original);
                let expected = mystery_tags.iter().any(|t| t.eq_ignore_ascii_case(original));
                prop_assert_eq!(mark.correct, expected);
            }
        }
    }
}
