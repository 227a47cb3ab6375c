//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, left to right: the board frame, then a side panel with the next
//! piece, the counters, the highscore list and the key bindings. Panels that do
//! not fit the viewport are skipped.

use crate::core::{shape_of, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, PieceKind, Rotation, EMPTY};

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const GAME_OVER_FG: Rgb = Rgb::new(110, 110, 110);

const HELP: [&str; 8] = [
    "\u{2190}\u{2192}  move",
    "\u{2191}   rotate",
    "\u{2193}   drop",
    "SPC hard drop",
    "N   skip",
    "P   pause (Esc)",
    "R   restart (Enter)",
    "Q   quit",
];

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

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_ghost: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            show_ghost: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is resized to the
    /// viewport when needed.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).cell(' '));

        let board_px_w = (snap.width() as u16) * self.cell_w;
        let board_px_h = (snap.height() as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;
        let panel_w = 20u16;

        let start_x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG),
        );

        self.draw_cells(fb, snap, start_x, start_y);

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        match snap.status {
            GameStatus::Paused => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
                self.draw_overlay_hint(fb, start_x, start_y, frame_w, frame_h, "P to play");
            }
            GameStatus::GameOver => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
                self.draw_overlay_hint(fb, start_x, start_y, frame_w, frame_h, "R to restart");
            }
            GameStatus::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_cells(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, start_x: u16, start_y: u16) {
        let game_over = snap.is_game_over();
        for y in 0..snap.height() as i32 {
            for x in 0..snap.width() as i32 {
                let (cx, cy) = (x as u16, y as u16);
                let value = snap.display_cell(x, y);
                if value != EMPTY {
                    let fg = if game_over {
                        GAME_OVER_FG
                    } else {
                        cell_color(value)
                    };
                    let style = CellStyle::new(fg, BOARD_BG).bold();
                    self.fill_cell_rect(fb, start_x, start_y, cx, cy, '█', style);
                } else if self.show_ghost && snap.is_ghost_cell(x, y) {
                    let style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
                    self.fill_cell_rect(fb, start_x, start_y, cx, cy, '░', style);
                } else {
                    let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
                    self.fill_cell_rect(fb, start_x, start_y, cx, cy, '·', style);
                }
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        y += self.draw_preview(fb, snap.next, panel_x, y) + 1;

        for (name, v) in [
            ("SCORE", snap.score),
            ("BEST", snap.best_score()),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x + 7, y, v, value);
            y += 1;
        }
        y += 1;

        if !snap.highscores.is_empty() {
            fb.put_str(panel_x, y, "HIGHSCORES", label);
            y += 1;
            for (rank, entry) in snap.highscores.iter().enumerate() {
                if y >= viewport.height {
                    return;
                }
                let w = fb.put_u32(panel_x, y, rank as u32 + 1, dim);
                fb.put_char(panel_x + w, y, '.', dim);
                fb.put_u32(panel_x + 3, y, entry.score, value);
                fb.put_str(panel_x + 10, y, &entry.date, dim);
                y += 1;
            }
            y += 1;
        }

        fb.put_str(panel_x, y, snap.status.as_str(), label);
        y += 2;
        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }

    /// Draw the spawn orientation of `kind`; returns the rows used.
    fn draw_preview(&self, fb: &mut FrameBuffer, kind: PieceKind, x: u16, y: u16) -> u16 {
        let shape = shape_of(kind, Rotation::Up);
        let mut rows_used = 0u16;
        let mut top: Option<i32> = None;
        for (col, row, v) in shape.filled() {
            let first = *top.get_or_insert(row);
            let dy = (row - first) as u16;
            let style = CellStyle::new(cell_color(v), PANEL_BG).bold();
            fb.fill_rect(x + col as u16 * 2, y + dy, 2, 1, '█', style);
            rows_used = rows_used.max(dy + 1);
        }
        rows_used
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }

    fn draw_overlay_hint(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let y = start_y.saturating_add(frame_h / 2 + 1);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));
    }
}

fn cell_color(value: u8) -> Rgb {
    match PieceKind::from_color(value) {
        Some(PieceKind::I) => Rgb::new(80, 220, 220),
        Some(PieceKind::J) => Rgb::new(80, 120, 220),
        Some(PieceKind::L) => Rgb::new(255, 165, 0),
        Some(PieceKind::O) => Rgb::new(240, 220, 80),
        Some(PieceKind::S) => Rgb::new(100, 220, 120),
        Some(PieceKind::T) => Rgb::new(200, 120, 220),
        Some(PieceKind::Z) => Rgb::new(220, 80, 80),
        None => Rgb::new(200, 200, 200),
    }
}
