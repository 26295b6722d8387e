//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout: the bordered playfield (2 terminal columns per cell), and to its
//! right a side panel with level, score, lines, a 4x4 next-piece preview and
//! the elapsed time. Level-up and game-over messages are drawn over the middle
//! of the playfield.

use std::time::Duration;

use crate::core::{GameSnapshot, Piece};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Phase, PieceKind, WIPE_STEP_MS};

/// Side length of the next-piece preview, in cells
const PREVIEW_CELLS: u16 = 4;

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Game-over wipe: rows fill with `#` bottom to top, then clear top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wipe {
    rows: u32,
    step: u32,
}

impl Wipe {
    /// Time between two steps
    pub const STEP: Duration = Duration::from_millis(WIPE_STEP_MS);

    pub fn new(rows: u16) -> Self {
        Self {
            rows: rows as u32,
            step: 0,
        }
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.step >= 2 * self.rows
    }

    /// Move to the next step; false once the wipe has finished
    pub fn advance(&mut self) -> bool {
        if self.is_done() {
            return false;
        }
        self.step += 1;
        true
    }

    /// Whether field row `row` is covered at the current step
    pub fn is_filled(&self, row: u16) -> bool {
        let row = row as u32;
        if row >= self.rows {
            return false;
        }
        if self.step <= self.rows {
            row + self.step >= self.rows
        } else {
            row >= self.step - self.rows
        }
    }
}

/// Screen position of the playfield frame
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal view of a session.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport when needed.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::new(PANEL_BG, PANEL_BG).glyph(' '));

        let layout = self.layout(snap, viewport);
        let field_style = Style::new(Rgb::new(80, 80, 90), FIELD_BG);

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.frame_w - 2,
            layout.frame_h - 2,
            ' ',
            field_style,
        );
        draw_border(
            fb,
            layout.x,
            layout.y,
            layout.frame_w,
            layout.frame_h,
            Style::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        // Locked cells.
        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(kind) = cell {
                    self.field_cell(fb, &layout, snap, x as i32, y as i32, '█', kind_style(*kind));
                }
            }
        }

        if snap.phase == Phase::Running {
            if let Some(ghost) = snap.ghost() {
                let style = Style::new(Rgb::new(140, 140, 140), FIELD_BG).dim();
                self.draw_piece(fb, &layout, snap, &ghost, '░', style);
            }
        }

        if let Some(active) = &snap.active {
            self.draw_piece(fb, &layout, snap, active, '█', kind_style(active.kind).bold());
        }

        self.draw_side_panel(fb, snap, &layout);

        match snap.phase {
            Phase::LevelUp => {
                let text = format!("LEVEL {}!", snap.level);
                draw_overlay_text(fb, &layout, &text);
            }
            Phase::GameOver => draw_overlay_text(fb, &layout, "GAME OVER"),
            Phase::Running => {}
        }
    }

    /// Render one frame of the game-over wipe
    pub fn render_wipe_into(
        &self,
        snap: &GameSnapshot,
        wipe: &Wipe,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        self.render_into(snap, viewport, fb);

        let layout = self.layout(snap, viewport);
        let style = Style::new(Rgb::new(160, 160, 160), FIELD_BG);
        for y in 0..snap.height.max(0) {
            if wipe.is_filled(y as u16) {
                for x in 0..snap.width {
                    self.field_cell(fb, &layout, snap, x, y, '#', style);
                }
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let frame_w = to_u16(snap.width).saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = to_u16(snap.height).saturating_add(2);
        let total_w = frame_w
            .saturating_add(2)
            .saturating_add(self.preview_w());
        Layout {
            x: viewport.width.saturating_sub(total_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Width of the preview box including its border
    fn preview_w(&self) -> u16 {
        PREVIEW_CELLS * self.cell_w + 2
    }

    /// Paint field cell (x, y); rows above the visible field are skipped
    fn field_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        snap: &GameSnapshot,
        x: i32,
        y: i32,
        ch: char,
        style: Style,
    ) {
        if x < 0 || y < 0 || x >= snap.width || y >= snap.height {
            return;
        }
        let px = layout
            .x
            .saturating_add(1)
            .saturating_add(to_u16(x).saturating_mul(self.cell_w));
        let py = layout.y.saturating_add(1).saturating_add(to_u16(y));
        if px >= fb.width() || py >= fb.height() {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        snap: &GameSnapshot,
        piece: &Piece,
        ch: char,
        style: Style,
    ) {
        for (x, y) in piece.cells() {
            self.field_cell(fb, layout, snap, x, y, ch, style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= fb.width() {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = layout.y;
        for (name, n) in [
            ("LEVEL", snap.level),
            ("SCORE", snap.score),
            ("LINES", snap.cleared_lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        let box_h = PREVIEW_CELLS + 2;
        draw_border(fb, panel_x, y, self.preview_w(), box_h, value);
        if let Some(next) = &snap.next {
            self.draw_preview(fb, panel_x.saturating_add(1), y + 1, next);
        }
        y += box_h + 1;

        fb.put_str(panel_x, y, "TIME", label);
        let tenths = (snap.elapsed.as_millis() / 100).min(u32::MAX as u128) as u32;
        let x = fb.put_u32(panel_x, y + 1, tenths / 10, value);
        fb.put_char(x, y + 1, '.', value);
        fb.put_u32(x + 1, y + 1, tenths % 10, value);
    }

    /// Draw `piece` centered inside the preview box whose inside starts at (x, y)
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Piece) {
        let style = kind_style(piece.kind).bold();
        let ox = (PREVIEW_CELLS as i32 - piece.width()).max(0) / 2;
        let oy = (PREVIEW_CELLS as i32 - piece.height()).max(0) / 2;
        for (col, row, _) in piece.shape.blocks() {
            let px = x.saturating_add(to_u16(ox + col).saturating_mul(self.cell_w));
            let py = y.saturating_add(to_u16(oy + row));
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }

    let right = x.saturating_add(w - 1);
    let bottom = y.saturating_add(h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x.saturating_add(dx), y, '─', style);
        fb.put_char(x.saturating_add(dx), bottom, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y.saturating_add(dy), '│', style);
        fb.put_char(right, y.saturating_add(dy), '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: &Layout, text: &str) {
    let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let mid_y = layout.y.saturating_add(layout.frame_h / 2);
    fb.put_str_centered(layout.x, layout.frame_w, mid_y, text, style);
}

fn kind_style(kind: PieceKind) -> Style {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
    };
    Style::new(fg, FIELD_BG)
}

fn to_u16(v: i32) -> u16 {
    v.clamp(0, u16::MAX as i32) as u16
}
