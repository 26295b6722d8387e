//! Render-facing snapshot of a session
//!
//! A [`GameSnapshot`] owns copies of everything a frontend draws. Mutating the
//! session afterwards never changes a snapshot already taken. Frontends that
//! render every frame should keep one snapshot around and refresh it with
//! [`GameState::snapshot_into`](crate::GameState::snapshot_into) so the row
//! buffers are reused.

use std::time::Duration;

use crate::pieces::Piece;
use crate::types::{Cell, Phase};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    /// Locked cells, `grid[y][x]`, top row first
    pub grid: Vec<Vec<Cell>>,
    pub active: Option<Piece>,
    pub next: Option<Piece>,
    /// Landing row of the active piece
    pub ghost_y: Option<i32>,
    pub level: u32,
    pub score: u32,
    pub cleared_lines: u32,
    pub phase: Phase,
    pub elapsed: Duration,
}

impl GameSnapshot {
    /// Locked cell at (x, y); `None` outside the grid or when empty
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 {
            return None;
        }
        self.grid
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Ghost piece: the active piece moved down to its landing row
    pub fn ghost(&self) -> Option<Piece> {
        let active = self.active.as_ref()?;
        let y = self.ghost_y?;
        (y != active.y).then(|| Piece {
            y,
            ..active.clone()
        })
    }
}
