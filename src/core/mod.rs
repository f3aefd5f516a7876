//! Core deterministic primitives.
//!
//! Nothing here reads the clock except `rng::entropy_seed`, which exists to
//! pick a seed when none is configured.

pub mod rng;

// Re-export core types
pub use rng::{derive_round_seed, entropy_seed, DeterministicRng};
