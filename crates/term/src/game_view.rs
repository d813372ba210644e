//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O) and can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::palette;
use crate::types::{Block, Piece, BOARD_HEIGHT, BOARD_WIDTH};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the board frame ended up, for callers drawing next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

/// A lightweight terminal renderer for the game scene.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Position of the board frame for a viewport.
    pub fn frame(&self, viewport: Viewport) -> BoardFrame {
        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        BoardFrame { x, y, w, h }
    }

    /// Render a game into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the
    /// viewport when needed.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            palette::PLAYFIELD,
        );
        draw_border(fb, frame, palette::BORDER);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (x, y) = (x as u16, y as u16);
                match cell {
                    Some(block) => self.draw_block(fb, frame, x, y, *block),
                    None => self.fill_cell(fb, frame, x, y, '·', palette::GRID_DOT),
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            for (x, y) in piece_cells(active.piece, active.rotation, active.x, ghost_y) {
                self.fill_cell(fb, frame, x, y, '░', palette::GHOST);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in piece_cells(active.piece, active.rotation, active.x, active.y) {
                self.draw_block(fb, frame, x, y, active.piece.block());
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused {
            draw_overlay_text(fb, frame, "PAUSED");
        } else if snap.game_over {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: BoardFrame, x: u16, y: u16, block: Block) {
        let (ch, style) = palette::block_glyph(block);
        self.fill_cell(fb, frame, x, y, ch, style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: BoardFrame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        frame: BoardFrame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = palette::LABEL;
        let value = palette::VALUE;

        let mut y = frame.y;
        fb.put_str(panel_x, y, snap.mode.label(), label.bold());
        y = y.saturating_add(2);

        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        if let Some(remaining) = snap.lines_until_item {
            fb.put_str(panel_x, y, "BOMB IN", label);
            y = y.saturating_add(1);
            let text = if remaining == 1 {
                "1 line".to_string()
            } else {
                format!("{remaining} lines")
            };
            fb.put_str(panel_x, y, &text, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for piece in &snap.next {
            if y >= viewport.height {
                break;
            }
            let (_, style) = palette::block_glyph(piece.block());
            fb.put_str(panel_x, y, piece.kind.letter(), style);
            y = y.saturating_add(1);
        }
    }
}

/// On-board cells of a piece, clipped to the board.
fn piece_cells(
    piece: Piece,
    rotation: crate::types::Rotation,
    x: i8,
    y: i8,
) -> impl Iterator<Item = (u16, u16)> {
    get_shape(piece.kind, rotation)
        .into_iter()
        .map(move |(dx, dy)| (x + dx, y + dy))
        .filter(|&(cx, cy)| {
            (0..BOARD_WIDTH as i8).contains(&cx) && (0..BOARD_HEIGHT as i8).contains(&cy)
        })
        .map(|(cx, cy)| (cx as u16, cy as u16))
}

fn draw_border(fb: &mut FrameBuffer, frame: BoardFrame, style: CellStyle) {
    let BoardFrame { x, y, w, h } = frame;
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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: BoardFrame, text: &str) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str_centered(frame.x, frame.w, frame.y + frame.h / 2, text, style);
}
