//! Item Tetris (workspace facade crate).
//!
//! Game rules, input mapping and rendering live in dedicated crates under
//! `crates/` and are re-exported here as `item_tetris::{core,input,term,types}`.
//! This crate adds what the binary needs around them: scenes, config, the
//! high-score file and logging.

pub use item_tetris_core as core;
pub use item_tetris_input as input;
pub use item_tetris_term as term;
pub use item_tetris_types as types;

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod scores;
