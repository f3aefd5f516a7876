//! Text Rendering
//!
//! Pure formatting of reports, events and the leaderboard for the terminal.

use std::fmt::Write as _;

use crate::catalog::University;
use crate::game::events::RoundEvent;
use crate::game::feedback::Feedback;
use crate::game::round::{GuessError, GuessReport, RoundPhase, RoundSummary};
use crate::leaderboard::LeaderboardEntry;

/// Remaining seconds that always get announced.
const FINAL_COUNTDOWN: u32 = 5;

/// Announce every this many seconds otherwise.
const ANNOUNCE_EVERY: u32 = 10;

/// Lives indicator, e.g. `♥♥♥♡♡♡`.
pub fn lives_bar(remaining: u8, max: u8) -> String {
    let remaining = remaining.min(max);
    let mut bar = "♥".repeat(remaining as usize);
    bar.push_str(&"♡".repeat((max - remaining) as usize));
    bar
}

/// Whether a countdown value is worth printing.
pub fn should_announce(seconds_remaining: u32) -> bool {
    seconds_remaining <= FINAL_COUNTDOWN || seconds_remaining % ANNOUNCE_EVERY == 0
}

/// Feedback block for one guess.
pub fn render_report(report: &GuessReport) -> String {
    let mut out = String::new();
    let guess = &report.guess;
    let fb = &report.feedback;

    let _ = writeln!(out, "Guess {}: {}", report.guess_number, guess.name());
    let _ = writeln!(
        out,
        "Rank: {} {} (highest: {} {})",
        guess.current_rank(),
        fb.rank,
        guess.highest_rank(),
        fb.highest_rank
    );
    let _ = writeln!(
        out,
        "State: {}{}",
        guess.state(),
        if fb.state_correct { " (correct)" } else { "" }
    );
    let _ = writeln!(out, "Tags: {}", render_tags(fb));
    out
}

fn render_tags(fb: &Feedback) -> String {
    fb.tags
        .iter()
        .map(|t| {
            if t.correct {
                format!("{} (correct)", t.label)
            } else {
                t.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Message for a rejected guess.
pub fn render_guess_error(err: &GuessError) -> String {
    match err {
        GuessError::NotFound(_) => "❗ University not found. Try entering the full name".to_string(),
        GuessError::EmptyGuess => "❗ Type a university name first".to_string(),
        GuessError::RoundOver(_) => "The round is already over".to_string(),
    }
}

/// Every field of a university, for the end-of-round reveal.
pub fn render_reveal(university: &University) -> String {
    format!(
        "Rank: {} (highest: {})\nState: {}\nTags: {}\nOfficial Website: {}\n",
        university.current_rank(),
        university.highest_rank(),
        university.state(),
        university.tags_raw(),
        university.website()
    )
}

/// End-of-round message.
pub fn render_summary(summary: &RoundSummary) -> String {
    match summary.phase {
        RoundPhase::Won => format!(
            "✅ Congratulations! You guessed correctly in {} {}!\nOfficial Website: {}\n",
            summary.guesses_used,
            if summary.guesses_used == 1 { "guess" } else { "guesses" },
            summary.mystery.website()
        ),
        RoundPhase::Lost => format!(
            "❌ Game over. The university was: {}\n{}",
            summary.mystery.name(),
            render_reveal(&summary.mystery)
        ),
        RoundPhase::Active => String::new(),
    }
}

/// Text for an event, or `None` if it should stay silent.
pub fn render_event(event: &RoundEvent, max_guesses: u8) -> Option<String> {
    match event {
        RoundEvent::Countdown { seconds_remaining, guesses_remaining } => {
            if !should_announce(*seconds_remaining) {
                return None;
            }
            Some(format!(
                "⏳ Time left: {}s  {}\n",
                seconds_remaining,
                lives_bar(*guesses_remaining, max_guesses)
            ))
        }
        RoundEvent::TimeExpired { guesses_remaining } => Some(format!(
            "⏰ Time's up for this round! You lost 1 guess. Remaining: {}  {}\n",
            guesses_remaining,
            lives_bar(*guesses_remaining, max_guesses)
        )),
        RoundEvent::GuessEvaluated(report) => {
            let mut out = render_report(report);
            if !report.phase.is_ended() {
                let _ = writeln!(
                    out,
                    "Guesses left: {}  {}",
                    report.guesses_remaining,
                    lives_bar(report.guesses_remaining, max_guesses)
                );
            }
            out.push('\n');
            Some(out)
        }
        RoundEvent::RoundEnded(summary) => Some(render_summary(summary)),
    }
}

/// Leaderboard table.
pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "🏆 Leaderboard is empty\n".to_string();
    }

    let mut out = String::from("🏆 Top Players\n");
    for (idx, entry) in entries.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", idx + 1, entry);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::feedback::{RankArrow, TagMark};

    fn report() -> GuessReport {
        GuessReport {
            guess_number: 1,
            guess: University::new("B", 2, 1, "CA", "Private;Small", "https://b.edu"),
            feedback: Feedback {
                rank: RankArrow::Down,
                highest_rank: RankArrow::Match,
                state_correct: true,
                tags: vec![
                    TagMark { label: "Private".into(), correct: false },
                    TagMark { label: "Small".into(), correct: true },
                ],
                is_win: false,
            },
            guesses_remaining: 5,
            phase: RoundPhase::Active,
        }
    }

    #[test]
    fn test_render_report() {
        assert_eq!(
            render_report(&report()),
            "Guess 1: B\nRank: 2 ↓ (highest: 1 ✅)\nState: CA (correct)\nTags: Private; Small (correct)\n"
        );
    }

    #[test]
    fn test_lives_bar() {
        assert_eq!(lives_bar(4, 6), "♥♥♥♥♡♡");
        assert_eq!(lives_bar(0, 3), "♡♡♡");
        assert_eq!(lives_bar(9, 2), "♥♥");
    }

    #[test]
    fn test_should_announce() {
        assert!(should_announce(60));
        assert!(should_announce(30));
        assert!(should_announce(5));
        assert!(should_announce(1));
        assert!(!should_announce(59));
        assert!(!should_announce(6));
    }

    #[test]
    fn test_quiet_countdown() {
        let event = RoundEvent::Countdown { seconds_remaining: 42, guesses_remaining: 6 };
        assert!(render_event(&event, 6).is_none());
    }

    #[test]
    fn test_render_loss_reveals_everything() {
        let summary = RoundSummary {
            phase: RoundPhase::Lost,
            guesses_used: 6,
            mystery: University::new("A", 1, 1, "CA", "Public;Large", "https://a.edu"),
        };
        let text = render_summary(&summary);
        assert!(text.starts_with("❌ Game over. The university was: A\n"));
        assert!(text.contains("Tags: Public;Large"));
        assert!(text.contains("Official Website: https://a.edu"));
    }

    #[test]
    fn test_render_win() {
        let summary = RoundSummary {
            phase: RoundPhase::Won,
            guesses_used: 1,
            mystery: University::new("A", 1, 1, "CA", "Public;Large", "https://a.edu"),
        };
        assert_eq!(
            render_summary(&summary),
            "✅ Congratulations! You guessed correctly in 1 guess!\nOfficial Website: https://a.edu\n"
        );
    }

    #[test]
    fn test_render_active_summary_is_silent() {
        let summary = RoundSummary {
            phase: RoundPhase::Active,
            guesses_used: 2,
            mystery: University::new("A", 1, 1, "CA", "Public;Large", "https://a.edu"),
        };
        assert_eq!(render_summary(&summary), "");
    }

    #[test]
    fn test_render_leaderboard() {
        let entries = vec![LeaderboardEntry::new("ada", 2, true).unwrap()];
        assert_eq!(render_leaderboard(&entries), "🏆 Top Players\n 1. ada - 2 guesses - ✔ Completed\n");
        assert_eq!(render_leaderboard(&[]), "🏆 Leaderboard is empty\n");
    }
}
