//! Terminal rendering for the game and its menus.
//!
//! Scenes render into a plain framebuffer instead of going through a widget
//! toolkit, and [`TerminalRenderer`] flushes only what changed between
//! frames. Board cells are two columns wide to keep them roughly square.

pub mod fb;
pub mod game_view;
pub mod menu_view;
pub mod palette;
pub mod renderer;

pub use item_tetris_core as core;
pub use item_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardFrame, GameView, Viewport};
pub use menu_view::{
    render_game_over_into, render_high_scores_into, render_menu_into, GameOverSummary, MenuScreen,
    ScoreRow,
};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
