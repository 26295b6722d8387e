//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Action`]s and holds the
//! latest action until the game loop hands it to the next tick. Nothing here
//! touches the terminal itself, so it can be tested without one.

pub mod latch;
pub mod map;

pub use termtris_types as types;

pub use latch::ActionLatch;
pub use map::{handle_key_event, should_quit};
