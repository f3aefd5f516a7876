//! # University Guess
//!
//! Guess the mystery university from rank, state and tag hints.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     UNIVERSITY GUESS                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  └── rng.rs      - Seeded Xorshift128+ PRNG (shuffle)        │
//! │                                                              │
//! │  catalog/        - University catalog                        │
//! │  ├── university.rs - Immutable university record             │
//! │  └── loader.rs   - CSV loading (quote-aware)                 │
//! │                                                              │
//! │  game/           - Round logic (pure, UI-agnostic)           │
//! │  ├── feedback.rs - Per-guess comparison                      │
//! │  ├── round.rs    - Round state machine                       │
//! │  └── events.rs   - Outcomes emitted to the surface           │
//! │                                                              │
//! │  leaderboard/    - Append-only result store                  │
//! │                                                              │
//! │  play/           - Runtime wiring (non-deterministic)        │
//! │  ├── session.rs  - Locked round + cancellable ticker         │
//! │  └── console.rs  - Terminal rendering                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//!
//! `submit_guess` and `tick` both mutate the round. The session keeps the
//! round behind a single mutex so the input path and the timer never
//! interleave. Once a round is Won or Lost it is frozen.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod core;
pub mod game;
pub mod leaderboard;
pub mod play;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, University};
pub use config::{ConfigError, GameConfig};
pub use crate::core::rng::DeterministicRng;
pub use game::feedback::{Feedback, RankArrow, TagMark};
pub use game::round::{GuessError, GuessReport, Round, RoundPhase, RoundSnapshot};
pub use leaderboard::{LeaderboardEntry, LeaderboardStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Guesses per round.
pub const MAX_GUESSES: u8 = 6;

/// Seconds allowed per guess before the timer consumes one.
pub const ROUND_SECONDS: u32 = 60;
