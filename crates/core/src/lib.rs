//! Core game logic - pure, deterministic, and testable
//!
//! Everything that decides what happens in a game lives here: the board and
//! its line clears, tetromino shapes and rotation, the piece generator, the
//! item-mode trigger and scoring. There is no terminal or file I/O; the only
//! side channel is `tracing` events.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, row-full detection, masked row clears, bomb detonation
//! - [`pieces`]: shape table and rotation with wall kicks
//! - [`generator`]: seeded uniform (or 7-bag) piece generation with forced items
//! - [`items`]: counts cleared lines and decides when a bomb is due
//! - [`scoring`]: line, combo, drop and bomb points; gravity by level
//! - [`game_state`]: active piece, timers, locking and the game lifecycle
//! - [`snapshot`]: read-only copy of a game for rendering
//!
//! # Example
//!
//! ```
//! use item_tetris_core::{GameOptions, GameState};
//! use item_tetris_types::{GameAction, GameMode};
//!
//! let options = GameOptions::default().with_mode(GameMode::Item).with_seed(12345);
//! let mut game = GameState::new(options);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.lines_until_item(), Some(10));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed time (normally `TICK_MS`). Gravity depends on the level, soft drop
//! is 10x faster and grounded pieces lock after 450ms.

pub mod board;
pub mod game_state;
pub mod generator;
pub mod items;
pub mod pieces;
pub mod scoring;
pub mod snapshot;

pub use item_tetris_types as types;

pub use board::{Board, RowMask};
pub use game_state::{ActivePiece, GameOptions, GameState, LockEvent};
pub use generator::PieceGenerator;
pub use items::ItemManager;
pub use pieces::{get_shape, try_rotate};
pub use scoring::{calculate_drop_score, calculate_line_score, get_drop_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
