//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, state machine and simulation of a
//! falling-block session. It has no dependency on terminals or clocks:
//! time only advances through the `dt` handed to [`GameState::tick`], and the
//! piece sequence comes from a seeded generator or any caller-supplied
//! iterator. The same inputs always replay the same game.
//!
//! # Module Structure
//!
//! - [`field`]: the grid of locked cells, placement checks and line clearing
//! - [`pieces`]: canonical shapes, rotation and wall kicks
//! - [`rng`]: seeded uniform and bag piece generators
//! - [`scoring`]: line-clear points, leveling and gravity speed
//! - [`config`]: construction-time parameters and their validation
//! - [`game_state`]: the session itself
//! - [`snapshot`]: detached copies of the state for rendering
//!
//! # Game Rules
//!
//! - A new piece spawns horizontally centered with its top block on row 0;
//!   if it does not fit, the session is over.
//! - Rotation is clockwise only. A blocked rotation tries the offsets in
//!   [`KICK_OFFSETS`] in order.
//! - Soft drop moves one row and never locks. Hard drop locks immediately.
//! - Gravity moves the piece one row per interval and locks it when blocked.
//! - Clearing `n` lines at once scores `n * n * 100`.
//! - Every `lines_per_level` lines raise the level, pause play for 500ms and
//!   shorten the gravity interval by 20ms (never below 50ms).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use termtris_core::{GameConfig, GameState};
//! use termtris_core::types::{Action, Phase};
//!
//! let mut game = GameState::new(GameConfig::default().with_seed(12345)).unwrap();
//!
//! game.tick(Duration::from_millis(16), Some(Action::MoveRight));
//! game.tick(Duration::from_millis(16), Some(Action::Rotate));
//! let event = game.tick(Duration::from_millis(16), Some(Action::HardDrop));
//!
//! assert!(event.is_some());
//! assert_eq!(game.phase(), Phase::Running);
//! assert_eq!(game.score(), 0);
//! ```

pub mod config;
pub mod field;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use termtris_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig};
pub use field::Field;
pub use game_state::{GameState, LockEvent, LEVEL_UP_PAUSE};
pub use pieces::{canonical_shape, try_rotate, Piece, Shape, KICK_OFFSETS};
pub use rng::{GeneratorPolicy, PieceGenerator, SimpleRng};
pub use scoring::{gravity_interval, level_for_lines, line_clear_score};
pub use snapshot::GameSnapshot;
