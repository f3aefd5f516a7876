//! Play Layer
//!
//! Runtime wiring around the pure round logic. This layer is
//! **non-deterministic**: it reads the clock and the terminal.

pub mod console;
pub mod render;
pub mod session;

pub use console::Console;
pub use session::{EventReceiver, EventSender, GameSession};
