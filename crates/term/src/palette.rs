//! Colors and glyphs shared by every scene.

use crate::fb::{CellStyle, Rgb};
use crate::types::{Block, ItemKind, PieceKind};

const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const FIELD_BG: Rgb = Rgb::new(30, 30, 40);

pub const PLAYFIELD: CellStyle = CellStyle::new(Rgb::new(80, 80, 90), FIELD_BG);
pub const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
pub const GRID_DOT: CellStyle = CellStyle::new(Rgb::new(60, 60, 72), FIELD_BG);
pub const GHOST: CellStyle = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG);
pub const LABEL: CellStyle = CellStyle::new(Rgb::new(140, 140, 150), PANEL_BG);
pub const VALUE: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);
pub const TITLE: CellStyle = CellStyle::new(Rgb::new(240, 220, 80), PANEL_BG).bold();
pub const HIGHLIGHT: CellStyle = CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(80, 220, 220)).bold();
pub const HINT: CellStyle = CellStyle::new(Rgb::new(110, 110, 120), PANEL_BG);
pub const BOMB_TEXT: CellStyle = CellStyle::new(Rgb::new(255, 90, 60), PANEL_BG).bold();

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

/// Glyph and style for a board block.
pub fn block_glyph(block: Block) -> (char, CellStyle) {
    match block {
        Block::Normal(kind) => ('█', CellStyle::new(piece_color(kind), FIELD_BG)),
        Block::Item(ItemKind::Bomb) => (
            '●',
            CellStyle::new(Rgb::new(255, 90, 60), Rgb::new(60, 20, 20)).bold(),
        ),
    }
}
