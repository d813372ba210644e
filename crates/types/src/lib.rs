//! Core types module - shared data structures and constants
//!
//! Everything here is plain data, so the same definitions are used by the
//! game logic, the input layer, the renderer and the config file.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: (3, 0)
//!
//! # Game Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 0 |
//! | `SOFT_DROP_MULTIPLIER` | 10 | Soft drop is 10x faster |
//! | `SOFT_DROP_GRACE_MS` | 150 | Soft drop state timeout |
//! | `LOCK_DELAY_MS` | 450 | Time before a grounded piece locks |
//! | `LOCK_RESET_LIMIT` | 15 | Max lock timer resets per piece |
//! | `LINE_CLEAR_PAUSE_MS` | 180 | Pause duration after a line clear |
//!
//! # Item Mode
//!
//! In [`GameMode::Item`] every `interval` cleared lines force the next piece
//! to be [`Piece::BOMB`]. The interval is configurable; the two presets are
//! [`ITEM_INTERVAL_QUICK`] (2) and [`ITEM_INTERVAL_DEFAULT`] (10).
//!
//! # Examples
//!
//! ```
//! use item_tetris_types::{Block, GameMode, Piece, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! let bomb = Piece::BOMB;
//! assert!(bomb.is_item());
//! assert_eq!(bomb.block(), Block::Item(item_tetris_types::ItemKind::Bomb));
//!
//! assert_eq!(GameMode::from_str("item"), Some(GameMode::Item));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Base gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Soft drop speed multiplier.
pub const SOFT_DROP_MULTIPLIER: u32 = 10;

/// Soft drop state timeout; the soft drop flag is held this long after the last key press.
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Lock delay when piece is grounded.
pub const LOCK_DELAY_MS: u32 = 450;

/// Maximum number of lock timer resets per piece.
pub const LOCK_RESET_LIMIT: u8 = 15;

/// Pause duration after clearing lines.
pub const LINE_CLEAR_PAUSE_MS: u32 = 180;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Soft drop DAS in milliseconds.
pub const SOFT_DROP_DAS_MS: u32 = 0;

/// Soft drop ARR in milliseconds.
pub const SOFT_DROP_ARR_MS: u32 = 50;

/// Terminals without key-release events auto-release a held key after this long.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8+
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Per-level decrease applied past the end of [`DROP_INTERVALS`].
pub const DROP_INTERVAL_STEP_MS: u32 = 10;

/// Absolute minimum drop interval.
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Highest selectable start level.
pub const MAX_START_LEVEL: u32 = 20;

/// Number of upcoming pieces shown in the preview.
pub const NEXT_PREVIEW_LEN: usize = 5;

/// Default number of cleared lines between bomb pieces in item mode.
pub const ITEM_INTERVAL_DEFAULT: u32 = 10;

/// Short item interval, handy for practice and demos.
pub const ITEM_INTERVAL_QUICK: u32 = 2;

/// Chebyshev radius of a bomb explosion around each bomb cell.
pub const BOMB_RADIUS: i8 = 1;

/// Spawn position for new pieces (x, y).
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Combo scoring base value (50 points per combo step)
pub const COMBO_BASE: u32 = 50;

/// Points per cell destroyed by a bomb, multiplied by (level + 1).
pub const BOMB_CELL_SCORE: u32 = 10;


/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position of this kind in [`PieceKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use item_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.letter().eq_ignore_ascii_case(s))
    }

    /// Single upper-case letter used in the HUD and in logs.
    pub fn letter(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation states
///
/// The rotation cycle goes: North → East → South → West → North.
/// North is the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Position in the clockwise cycle starting at North.
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use item_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// ```
    /// use item_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Item tags a piece or a locked cell can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Clears the surrounding cells when it locks.
    Bomb,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Bomb => "bomb",
        }
    }
}

/// A piece as produced by the generator: a shape plus an optional item tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub item: Option<ItemKind>,
}

impl Piece {
    /// The bomb variant: an O tetromino whose four cells are all bombs.
    pub const BOMB: Piece = Piece {
        kind: PieceKind::O,
        item: Some(ItemKind::Bomb),
    };

    /// A regular, untagged piece.
    pub const fn normal(kind: PieceKind) -> Self {
        Self { kind, item: None }
    }

    pub fn is_item(&self) -> bool {
        self.item.is_some()
    }

    /// The block this piece leaves on the board when it locks.
    pub fn block(&self) -> Block {
        match self.item {
            Some(item) => Block::Item(item),
            None => Block::Normal(self.kind),
        }
    }
}

/// Content of a filled board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    /// Regular block, colored by the piece it came from.
    Normal(PieceKind),
    /// Item-tagged block.
    Item(ItemKind),
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Filled cell
pub type Cell = Option<Block>;

/// Game actions that can be applied to modify game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Instantly drop piece to lowest valid position
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Restart the game with the same options
    Restart,
}

/// Which rule set a game is played with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Normal,
    /// Bomb pieces are forced every N cleared lines.
    Item,
}

impl GameMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Some(GameMode::Normal),
            "item" => Some(GameMode::Item),
            _ => None,
        }
    }

    /// Stable lowercase name, used in the score file.
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Normal => "normal",
            GameMode::Item => "item",
        }
    }

    /// Human-readable label for menus and the HUD.
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Normal => "NORMAL",
            GameMode::Item => "ITEM",
        }
    }
}

/// Strategy the generator uses to pick regular pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    /// Every draw is independent and uniform over the seven kinds.
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds.
    #[serde(alias = "7bag", alias = "7-bag")]
    Bag,
}

impl Randomizer {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Some(Randomizer::Uniform),
            "bag" | "7bag" | "7-bag" => Some(Randomizer::Bag),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Randomizer::Uniform => "uniform",
            Randomizer::Bag => "bag",
        }
    }
}
