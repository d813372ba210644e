//! Read-only view of a game, as consumed by the renderer.

use arrayvec::ArrayVec;

use crate::game_state::ActivePiece;
use crate::types::{Cell, GameMode, Piece, Rotation, BOARD_HEIGHT, BOARD_WIDTH, NEXT_PREVIEW_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            piece: value.piece,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: ArrayVec<Piece, NEXT_PREVIEW_LEN>,
    pub mode: GameMode,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Item mode only.
    pub lines_until_item: Option<u32>,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub line_clear_ms: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: ArrayVec::new(),
            mode: GameMode::Normal,
            score: 0,
            level: 0,
            lines: 0,
            lines_until_item: None,
            started: false,
            paused: false,
            game_over: false,
            line_clear_ms: 0,
        }
    }
}
