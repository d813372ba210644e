//! Game state module - manages the complete game state
//!
//! Ties together the board, the piece generator, the item manager and
//! scoring. Handles timing, movement, rotation, locking, bomb detonation,
//! line clears and the game lifecycle.

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::generator::PieceGenerator;
use crate::items::ItemManager;
use crate::pieces::{get_shape, try_rotate, PieceShape};
use crate::scoring::{
    calculate_bomb_score, calculate_combo_bonus, calculate_drop_score, calculate_line_score,
    get_drop_interval_ms,
};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Settings fixed for the lifetime of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    pub mode: GameMode,
    pub seed: u64,
    pub randomizer: Randomizer,
    /// Cleared lines per bomb piece; only used in item mode.
    pub item_interval: u32,
    pub start_level: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            mode: GameMode::Normal,
            seed: 1,
            randomizer: Randomizer::Uniform,
            item_interval: ITEM_INTERVAL_DEFAULT,
            start_level: 0,
        }
    }
}

impl GameOptions {
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub piece: Piece,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A piece at the spawn position, facing north.
    pub fn new(piece: Piece) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self {
            piece,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    pub fn shape(&self) -> PieceShape {
        get_shape(self.piece.kind, self.rotation)
    }

    /// Whether the piece fits at its position shifted by (dx, dy).
    pub fn fits(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.shape()
            .iter()
            .all(|&(mx, my)| board.is_valid(self.x + mx + dx, self.y + my + dy))
    }

    pub fn is_valid(&self, board: &Board) -> bool {
        self.fits(board, 0, 0)
    }

    /// Resting on the floor or the stack.
    pub fn is_grounded(&self, board: &Board) -> bool {
        !self.fits(board, 0, 1)
    }
}

/// What happened when the last piece locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub piece: Piece,
    pub lines_cleared: u32,
    /// Regular blocks destroyed by a bomb.
    pub cells_destroyed: u32,
    /// Points earned by the clear and the explosion (drop points excluded).
    pub score: u32,
    /// The item manager queued a bomb for the next spawn.
    pub item_triggered: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    options: GameOptions,
    board: Board,
    active: Option<ActivePiece>,
    generator: PieceGenerator,
    /// Present only in item mode.
    items: Option<ItemManager>,
    /// Increments on restart; also offsets the seed so each restart deals a new sequence.
    episode: u32,
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    pieces_locked: u32,
    bombs_detonated: u32,
    drop_timer_ms: u32,
    lock_timer_ms: u32,
    lock_reset_count: u8,
    line_clear_timer_ms: u32,
    paused: bool,
    game_over: bool,
    started: bool,
    is_soft_dropping: bool,
}

impl GameState {
    pub fn new(options: GameOptions) -> Self {
        Self::for_episode(options, 0)
    }

    fn for_episode(options: GameOptions, episode: u32) -> Self {
        let seed = options.seed.wrapping_add(episode as u64);
        let items = match options.mode {
            GameMode::Item => Some(ItemManager::new(options.item_interval)),
            GameMode::Normal => None,
        };

        Self {
            options,
            board: Board::new(),
            active: None,
            generator: PieceGenerator::new(seed, options.randomizer),
            items,
            episode,
            last_event: None,
            score: 0,
            level: options.start_level,
            lines: 0,
            combo: 0,
            pieces_locked: 0,
            bombs_detonated: 0,
            drop_timer_ms: 0,
            lock_timer_ms: 0,
            lock_reset_count: 0,
            line_clear_timer_ms: 0,
            paused: false,
            game_over: false,
            started: false,
            is_soft_dropping: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            mode = self.options.mode.as_str(),
            seed = self.generator.seed(),
            "game started"
        );
        self.spawn_piece();
    }

    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn mode(&self) -> GameMode {
        self.options.mode
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn bombs_detonated(&self) -> u32 {
        self.bombs_detonated
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access, for setting up positions.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn generator(&self) -> &PieceGenerator {
        &self.generator
    }

    pub fn items(&self) -> Option<&ItemManager> {
        self.items.as_ref()
    }

    /// Lines left until the next bomb, in item mode.
    pub fn lines_until_item(&self) -> Option<u32> {
        self.items.as_ref().map(ItemManager::lines_until_item)
    }

    pub fn line_clear_pending(&self) -> bool {
        self.line_clear_timer_ms > 0
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.generator.preview();
        out.mode = self.options.mode;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.lines_until_item = self.lines_until_item();
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.line_clear_ms = self.line_clear_timer_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the next piece from the generator.
    ///
    /// Ends the game and returns false when the spawn area is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        if self.board.is_spawn_blocked() {
            self.end_game();
            return false;
        }

        let piece = ActivePiece::new(self.generator.next_piece());
        if !piece.is_valid(&self.board) {
            self.end_game();
            return false;
        }

        if piece.piece.is_item() {
            debug!("bomb piece spawned");
        }
        self.active = Some(piece);
        self.drop_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_reset_count = 0;
        true
    }

    fn end_game(&mut self) {
        self.game_over = true;
        self.active = None;
        info!(
            score = self.score,
            lines = self.lines,
            level = self.level,
            "game over"
        );
    }

    /// Current drop interval, accounting for soft drop.
    pub fn drop_interval_ms(&self) -> u32 {
        let base = get_drop_interval_ms(self.level);
        if self.is_soft_dropping {
            (base / SOFT_DROP_MULTIPLIER).max(1)
        } else {
            base
        }
    }

    /// Try to move the active piece by (dx, dy).
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !active.fits(&self.board, dx, dy) {
            return false;
        }

        self.active = Some(ActivePiece {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });

        // Stepping down restarts the lock timer for free; moving on the
        // ground spends one of the limited resets.
        if dy > 0 {
            self.lock_timer_ms = 0;
        } else if self.is_grounded() {
            self.reset_lock_timer();
        }
        true
    }

    /// Try to rotate the active piece, kicking off walls if needed.
    pub fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let result = try_rotate(
            active.kind(),
            active.rotation,
            active.x,
            active.y,
            clockwise,
            |x, y| self.board.is_valid(x, y),
        );

        let Some((rotation, (dx, dy))) = result else {
            return false;
        };
        self.active = Some(ActivePiece {
            rotation,
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        self.reset_lock_timer();
        true
    }

    fn reset_lock_timer(&mut self) {
        if self.lock_reset_count < LOCK_RESET_LIMIT {
            self.lock_timer_ms = 0;
            self.lock_reset_count += 1;
        }
    }

    /// Drop the active piece to the bottom and lock it.
    ///
    /// Returns the drop points earned (already added to the score).
    pub fn hard_drop(&mut self) -> u32 {
        let Some(ghost_y) = self.ghost_y() else {
            return 0;
        };
        let Some(active) = self.active else {
            return 0;
        };

        let distance = (ghost_y - active.y) as u32;
        self.active = Some(ActivePiece { y: ghost_y, ..active });
        let points = calculate_drop_score(distance, true);
        self.score = self.score.saturating_add(points);
        self.lock_piece();
        points
    }

    /// Lock the active piece, detonate bombs, clear lines and spawn the next piece.
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let shape = active.shape();
        let piece = active.piece;
        if !self
            .board
            .lock_piece(&shape, active.x, active.y, piece.block())
        {
            warn!(?piece, x = active.x, y = active.y, "lock position was not free");
            self.end_game();
            return;
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let cells_destroyed = if piece.is_item() {
            let destroyed = self.board.detonate_items(BOMB_RADIUS);
            self.bombs_detonated += 1;
            debug!(destroyed, "bomb detonated");
            destroyed
        } else {
            0
        };

        let cleared = self.board.clear_full_rows();
        let lines_cleared = cleared.len() as u32;

        let mut gained = calculate_bomb_score(cells_destroyed, self.level);
        if lines_cleared > 0 {
            self.combo += 1;
            gained = gained
                .saturating_add(calculate_line_score(cleared.len(), self.level))
                .saturating_add(calculate_combo_bonus(self.combo));
            self.lines += lines_cleared;
            self.level = self.options.start_level + self.lines / LINES_PER_LEVEL;
            debug!(rows = ?cleared.as_slice(), lines = self.lines, "lines cleared");
        } else {
            self.combo = 0;
        }
        self.score = self.score.saturating_add(gained);

        let item_triggered = self
            .items
            .as_mut()
            .is_some_and(|items| items.on_lines_cleared(lines_cleared));
        if item_triggered {
            self.generator.force_item();
        }

        if lines_cleared > 0 || cells_destroyed > 0 {
            self.line_clear_timer_ms = LINE_CLEAR_PAUSE_MS;
        }

        self.last_event = Some(LockEvent {
            piece,
            lines_cleared,
            cells_destroyed,
            score: gained,
            item_triggered,
        });

        if !self.game_over {
            self.spawn_piece();
        }
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn is_grounded(&self) -> bool {
        self.active
            .is_some_and(|piece| piece.is_grounded(&self.board))
    }

    /// Row the active piece would land on.
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut distance: i8 = 0;
        while active.fits(&self.board, 0, distance + 1) {
            distance += 1;
        }
        Some(active.y + distance)
    }

    /// Advance timers by `elapsed_ms` and apply gravity / lock delay.
    ///
    /// Returns true when the piece moved down or locked.
    pub fn tick(&mut self, elapsed_ms: u32, soft_drop: bool) -> bool {
        if self.paused || self.game_over || !self.started {
            return false;
        }

        if self.line_clear_timer_ms > 0 {
            self.line_clear_timer_ms = self.line_clear_timer_ms.saturating_sub(elapsed_ms);
            return false;
        }

        if self.active.is_none() {
            return false;
        }

        if soft_drop != self.is_soft_dropping {
            self.is_soft_dropping = soft_drop;
            // Apply the new speed from the next tick on.
            self.drop_timer_ms = 0;
        }

        if self.is_grounded() {
            self.lock_timer_ms += elapsed_ms;
            if self.lock_timer_ms >= LOCK_DELAY_MS {
                self.lock_piece();
                return true;
            }
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms < self.drop_interval_ms() {
            return false;
        }
        self.drop_timer_ms = 0;
        if !self.try_move(0, 1) {
            return false;
        }
        if self.is_soft_dropping {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
        }
        true
    }

    /// Apply a game action.
    ///
    /// Only `Pause` and `Restart` are honoured while paused, and only
    /// `Restart` once the game is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                return true;
            }
            GameAction::Pause if self.started && !self.game_over => {
                self.paused = !self.paused;
                return true;
            }
            _ => {}
        }

        if self.paused || self.game_over || !self.started {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::SoftDrop => {
                let moved = self.try_move(0, 1);
                if moved {
                    self.score = self.score.saturating_add(calculate_drop_score(1, false));
                }
                moved
            }
            GameAction::HardDrop => {
                self.hard_drop();
                true
            }
            GameAction::RotateCw => self.try_rotate(true),
            GameAction::RotateCcw => self.try_rotate(false),
            GameAction::Pause | GameAction::Restart => false,
        }
    }

    /// Throw away the current game and start a new one with the same options.
    pub fn restart(&mut self) {
        let episode = self.episode.wrapping_add(1);
        *self = Self::for_episode(self.options, episode);
        self.start();
    }

    /// Check if the active piece can move by (dx, dy).
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        self.active
            .is_some_and(|piece| piece.fits(&self.board, dx, dy))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameOptions::default())
    }
}
