//! Game Logic Module
//!
//! Round logic with no I/O. Deterministic given the catalog order.
//!
//! ## Module Structure
//!
//! - `feedback`: Per-guess comparison against the mystery
//! - `round`: Round state machine (`submit_guess`, `tick`)
//! - `events`: Events forwarded to the presentation layer

pub mod events;
pub mod feedback;
pub mod round;

// Re-export key types
pub use events::RoundEvent;
pub use feedback::{Feedback, RankArrow, TagMark};
pub use round::{
    GuessError, GuessReport, Round, RoundConfig, RoundPhase, RoundSnapshot, RoundSummary,
    TickOutcome,
};
