//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the input layer and the terminal renderer alike.
//!
//! # Field Dimensions
//!
//! The classic playfield is 10 columns by 20 rows. Both are only defaults: a
//! session picks its own dimensions at construction time.
//!
//! # Timing Constants
//!
//! All timing values are whole milliseconds and are applied as
//! [`std::time::Duration`]s, so accumulating tick deltas is exact.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_GRAVITY_MS` | 300 | Gravity interval at level 1 |
//! | `GRAVITY_STEP_MS` | 20 | Interval reduction per level |
//! | `MIN_GRAVITY_MS` | 50 | Gravity floor (reached at level 14) |
//! | `LEVEL_UP_PAUSE_MS` | 500 | Pause shown after a level-up |
//! | `FRAME_MS` | 10 | Terminal frame pacing |
//! | `WIPE_STEP_MS` | 50 | One step of the game-over wipe |
//!
//! # Examples
//!
//! ```
//! use termtris_types::{Action, PieceKind, DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH};
//!
//! let kind = PieceKind::from_char('t').unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.as_char(), 'T');
//!
//! assert_eq!(Action::from_str("hardDrop"), Some(Action::HardDrop));
//!
//! assert_eq!(DEFAULT_FIELD_WIDTH, 10);
//! assert_eq!(DEFAULT_FIELD_HEIGHT, 20);
//! ```

/// Default field width in cells
pub const DEFAULT_FIELD_WIDTH: u16 = 10;

/// Default field height in cells
pub const DEFAULT_FIELD_HEIGHT: u16 = 20;

/// Gravity interval at level 1 (300ms per row)
pub const BASE_GRAVITY_MS: u64 = 300;

/// Gravity speed-up per level
pub const GRAVITY_STEP_MS: u64 = 20;

/// Fastest gravity interval
pub const MIN_GRAVITY_MS: u64 = 50;

/// Duration of the level-up pause
pub const LEVEL_UP_PAUSE_MS: u64 = 500;

/// Default number of cleared lines needed to advance one level
pub const DEFAULT_LINES_PER_LEVEL: u32 = 1;

/// Base points for a line clear; a clear of `n` lines scores `n * n * LINE_CLEAR_BASE`
pub const LINE_CLEAR_BASE: u32 = 100;

/// Terminal frame pacing
pub const FRAME_MS: u64 = 10;

/// Delay between game-over wipe steps
pub const WIPE_STEP_MS: u64 = 50;

/// The seven piece kinds
///
/// Colors used by the terminal view:
/// - **I**: cyan
/// - **O**: yellow
/// - **T**: magenta
/// - **J**: blue
/// - **L**: orange
/// - **S**: green
/// - **Z**: red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse a piece kind from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use termtris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('i'), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_char('O'), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter for this kind
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
        }
    }
}

/// Discrete player actions, at most one of which is applied per tick
///
/// Actions come from the input layer; the engine never reads the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Shift the active piece one column left
    MoveLeft,
    /// Shift the active piece one column right
    MoveRight,
    /// Move the active piece one row down (never forces a lock)
    SoftDrop,
    /// Drop to the ghost row and lock immediately
    HardDrop,
    /// Rotate 90° clockwise, with wall kicks
    Rotate,
}

impl Action {
    /// Parse an action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use termtris_types::Action;
    ///
    /// assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
    /// assert_eq!(Action::from_str("ROTATE"), Some(Action::Rotate));
    /// assert_eq!(Action::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "softdrop" => Some(Action::SoftDrop),
            "harddrop" => Some(Action::HardDrop),
            "rotate" => Some(Action::Rotate),
            _ => None,
        }
    }

    /// camelCase name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "moveLeft",
            Action::MoveRight => "moveRight",
            Action::SoftDrop => "softDrop",
            Action::HardDrop => "hardDrop",
            Action::Rotate => "rotate",
        }
    }
}

/// Session phase
///
/// `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Running,
    LevelUp,
    GameOver,
}

/// A cell on the field or inside a piece shape
///
/// - `None`: empty
/// - `Some(PieceKind)`: filled with the given kind
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_kind_letters_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
            assert_eq!(
                PieceKind::from_char(kind.as_char().to_ascii_lowercase()),
                Some(kind)
            );
        }
    }

    #[test]
    fn action_names_roundtrip() {
        for action in [
            Action::MoveLeft,
            Action::MoveRight,
            Action::SoftDrop,
            Action::HardDrop,
            Action::Rotate,
        ] {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_GRAVITY_MS, 300);
        assert_eq!(GRAVITY_STEP_MS, 20);
        assert_eq!(MIN_GRAVITY_MS, 50);
        assert_eq!(LEVEL_UP_PAUSE_MS, 500);
        assert_eq!(DEFAULT_LINES_PER_LEVEL, 1);
    }

    #[test]
    fn phase_defaults_to_running() {
        assert_eq!(Phase::default(), Phase::Running);
    }
}
