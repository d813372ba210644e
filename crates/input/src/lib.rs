//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s and menu
//! commands, and provides a DAS/ARR input handler suitable for terminal
//! environments (including terminals without key-release events).

pub mod handler;
pub mod map;

pub use item_tetris_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, is_back_to_menu, menu_command, should_quit, MenuCommand};
