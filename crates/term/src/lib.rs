//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It skips widget
//! and layout libraries: views render a [`core::GameSnapshot`] into a plain
//! framebuffer, and [`TerminalRenderer`] flushes that framebuffer through
//! crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep views pure so they can be tested without a terminal
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use termtris_core as core;
pub use termtris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport, Wipe};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
