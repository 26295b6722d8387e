//! Pieces module - canonical shapes, rotation and wall kicks
//!
//! Every piece kind has one canonical shape: a small rectangular matrix of
//! cells. Rotation is a pure matrix transform (reverse rows, then transpose),
//! so a rotated shape is always a fresh value and the piece itself only changes
//! when the caller commits the result.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind};

/// Largest shape extent in either direction
pub const MAX_SHAPE_SIDE: usize = 4;

/// Kick offsets tried in order when a rotated shape collides: (dx, dy)
pub const KICK_OFFSETS: [(i32, i32); 6] = [(0, 0), (1, 0), (-1, 0), (2, 0), (-2, 0), (0, -1)];

/// A rectangular matrix of cells, row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: ArrayVec<Cell, { MAX_SHAPE_SIDE * MAX_SHAPE_SIDE }>,
}

impl Shape {
    /// Build a shape from text rows; `.` and ` ` are empty, letters are filled
    ///
    /// Returns `None` if the rows are ragged, empty, larger than 4x4, hold no
    /// block, or contain an unknown letter.
    pub fn parse(rows: &[&str]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.chars().count();
        if height == 0 || width == 0 || height > MAX_SHAPE_SIDE || width > MAX_SHAPE_SIDE {
            return None;
        }

        let mut cells = ArrayVec::new();
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            for c in row.chars() {
                let cell = match c {
                    '.' | ' ' => None,
                    other => Some(PieceKind::from_char(other)?),
                };
                cells.push(cell);
            }
        }
        if cells.iter().all(Option::is_none) {
            return None;
        }

        Some(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    /// Column extent
    pub fn width(&self) -> i32 {
        self.width as i32
    }

    /// Row extent
    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// Cell at (col, row), `None` outside the matrix
    pub fn get(&self, col: i32, row: i32) -> Option<Cell> {
        if col < 0 || row < 0 || col >= self.width() || row >= self.height() {
            return None;
        }
        Some(self.cells[(row * self.width() + col) as usize])
    }

    /// Iterate the filled cells as (col, row, kind), row by row
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32, PieceKind)> + '_ {
        let width = self.width();
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|kind| ((i as i32) % width, (i as i32) / width, kind))
        })
    }

    /// Rows of the matrix, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Index of the first row holding a block
    pub fn top_padding(&self) -> i32 {
        self.blocks().map(|(_, row, _)| row).min().unwrap_or(0)
    }

    /// The shape turned 90° clockwise over its bounding box
    ///
    /// The new matrix is `width x height` swapped, with
    /// `new[r][c] = old[height - 1 - c][r]`.
    pub fn rotated(&self) -> Shape {
        let (w, h) = (self.width(), self.height());
        let mut cells = ArrayVec::new();
        for r in 0..w {
            for c in 0..h {
                cells.push(self.cells[((h - 1 - c) * w + r) as usize]);
            }
        }
        Shape {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Canonical shape for a piece kind
pub fn canonical_shape(kind: PieceKind) -> Shape {
    let rows: &[&str] = match kind {
        PieceKind::I => &["....", "####", "...."],
        PieceKind::O => &["##", "##"],
        PieceKind::T => &[".#.", "###"],
        PieceKind::J => &["..#", "###"],
        PieceKind::L => &["#..", "###"],
        PieceKind::S => &["##.", ".##"],
        PieceKind::Z => &[".##", "##."],
    };
    Shape {
        width: rows[0].len() as u8,
        height: rows.len() as u8,
        cells: rows
            .iter()
            .flat_map(|row| row.bytes())
            .map(|b| (b == b'#').then_some(kind))
            .collect(),
    }
}

/// A positioned, rotatable shape instance
///
/// `x`/`y` is the column/row of the shape matrix's top-left corner.
/// Negative rows are allowed: they sit above the visible field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece with its canonical shape at (0, 0)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: canonical_shape(kind),
            x: 0,
            y: 0,
        }
    }

    /// Create a piece with its canonical shape at (x, y)
    pub fn at(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::new(kind)
        }
    }

    pub fn width(&self) -> i32 {
        self.shape.width()
    }

    pub fn height(&self) -> i32 {
        self.shape.height()
    }

    /// Candidate shape after a clockwise turn; the piece is left untouched
    pub fn rotate(&self) -> Shape {
        self.shape.rotated()
    }

    /// Absolute (x, y) of every block
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .blocks()
            .map(move |(col, row, _)| (self.x + col, self.y + row))
    }
}

/// Try to rotate a piece with wall kicks
///
/// `fits(shape, x, y)` reports whether `shape` anchored at `(x, y)` is a legal
/// placement. Returns the rotated shape and the first accepted kick offset, or
/// `None` if every offset collides.
pub fn try_rotate(
    piece: &Piece,
    fits: impl Fn(&Shape, i32, i32) -> bool,
) -> Option<(Shape, (i32, i32))> {
    let rotated = piece.rotate();
    let kick = KICK_OFFSETS
        .iter()
        .copied()
        .find(|&(dx, dy)| fits(&rotated, piece.x + dx, piece.y + dy))?;
    Some((rotated, kick))
}
