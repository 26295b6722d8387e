//! Field module - the grid of locked cells
//!
//! The field is a `width x height` grid stored as one flat row-major vector.
//! Coordinates are (x, y): x grows left to right, y grows top to bottom.
//! Rows with negative y lie above the visible top; placement queries accept
//! them so pieces can spawn partially hidden, but nothing is ever stored there.

use crate::pieces::{Piece, Shape};
use crate::types::{Cell, PieceKind};

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: i32,
    height: i32,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field
    ///
    /// Dimensions are validated by `GameConfig`; a zero-sized field is legal
    /// here but rejects every placement.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Get cell at (x, y); `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set cell at (x, y); returns false when out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether (x, y) is inside the grid and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether `shape` anchored at (x, y) is a legal placement
    ///
    /// Every block must lie within `[0, width)` horizontally and above the
    /// bottom edge. Blocks in visible rows must not hit a locked cell; blocks
    /// in negative rows are never checked against the grid.
    pub fn fits(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.blocks().all(|(col, row, _)| {
            let (bx, by) = (x + col, y + row);
            if bx < 0 || bx >= self.width || by >= self.height {
                return false;
            }
            by < 0 || !self.is_occupied(bx, by)
        })
    }

    /// Check whether `piece` shifted by (dx, dy) is a legal placement
    pub fn can_place(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        self.fits(&piece.shape, piece.x + dx, piece.y + dy)
    }

    /// Write the piece's blocks into the grid
    ///
    /// Blocks outside the visible grid (typically above the top at game over)
    /// are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        for (col, row, kind) in piece.shape.blocks() {
            self.set(piece.x + col, piece.y + row, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i32) -> bool {
        if y < 0 || y >= self.height || self.width == 0 {
            return false;
        }
        self.row(y as usize).iter().all(|cell| cell.is_some())
    }

    /// Remove every full row and return how many were removed
    ///
    /// Remaining rows keep their order and settle at the bottom; the same
    /// number of empty rows appear at the top. Two-pointer pass, no allocation.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y as i32) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Row `y` as a slice (caller guarantees `y < height`)
    fn row(&self, y: usize) -> &[Cell] {
        let width = self.width as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        // `max(1)` keeps `chunks` happy on a zero-width field.
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Copy the grid into `out` as rows x columns, reusing its allocations
    pub fn write_rows_into(&self, out: &mut Vec<Vec<Cell>>) {
        out.resize_with(self.height as usize, Vec::new);
        for (y, dst) in out.iter_mut().enumerate() {
            dst.clear();
            dst.extend_from_slice(self.row(y));
        }
    }

    /// The grid as freshly allocated rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let mut rows = Vec::new();
        self.write_rows_into(&mut rows);
        rows
    }

    /// Get the flat row-major cell storage
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a field from text rows (`.` empty, piece letters filled)
    ///
    /// Returns `None` on ragged rows or unknown letters.
    pub fn from_text(rows: &[&str]) -> Option<Self> {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            for c in row.chars() {
                cells.push(match c {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_char(other)?),
                });
            }
        }
        Some(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }
}
