//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds a [`Block`].
//! Cells live in a flat row-major array; nothing here allocates.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).

use arrayvec::ArrayVec;

use crate::types::{Block, Cell, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_POSITION};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// One flag per row, index 0 is the top row.
pub type RowMask = [bool; HEIGHT];

/// Row indices returned by a line clear, bottom to top.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty.
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Within bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row as a slice of cells.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    /// Check if a row is completely filled. Rows outside the board are never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Mask of every full row.
    pub fn full_rows(&self) -> RowMask {
        let mut mask = [false; HEIGHT];
        for (y, flag) in mask.iter_mut().enumerate() {
            *flag = self.is_row_full(y);
        }
        mask
    }

    /// Remove every row flagged in `mask` and compact the rest downward.
    ///
    /// Surviving rows keep their relative order; the vacated rows at the top
    /// are emptied. Returns the number of removed rows.
    pub fn clear_rows(&mut self, mask: &RowMask) -> usize {
        let mut write_y = HEIGHT;
        let mut removed = 0;

        for read_y in (0..HEIGHT).rev() {
            if mask[read_y] {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
        removed
    }

    /// Clear all full rows; returns the cleared row indices, bottom to top.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mask = self.full_rows();
        let cleared: ClearedRows = (0..HEIGHT).rev().filter(|&y| mask[y]).collect();
        if !cleared.is_empty() {
            self.clear_rows(&mask);
        }
        cleared
    }

    /// Lock a shape onto the board at (x, y).
    ///
    /// All-or-nothing: returns false and leaves the board untouched if any
    /// cell is out of bounds or already occupied.
    pub fn lock_piece(&mut self, shape: &[(i8, i8)], x: i8, y: i8, block: Block) -> bool {
        if !shape.iter().all(|&(dx, dy)| self.is_valid(x + dx, y + dy)) {
            return false;
        }
        for &(dx, dy) in shape {
            self.set(x + dx, y + dy, Some(block));
        }
        true
    }

    /// Detonate every item block on the board.
    ///
    /// All cells within `radius` (Chebyshev distance) of an item block are
    /// emptied, the item blocks included. Rows are not shifted afterwards.
    /// Returns how many regular blocks were destroyed.
    pub fn detonate_items(&mut self, radius: i8) -> u32 {
        let mut blast = [false; BOARD_SIZE];
        let mut found = false;

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if !matches!(self.get(x, y), Some(Some(Block::Item(_)))) {
                    continue;
                }
                found = true;
                for by in (y - radius)..=(y + radius) {
                    for bx in (x - radius)..=(x + radius) {
                        if let Some(idx) = Self::index(bx, by) {
                            blast[idx] = true;
                        }
                    }
                }
            }
        }

        if !found {
            return 0;
        }

        let mut destroyed = 0;
        for (cell, hit) in self.cells.iter_mut().zip(blast) {
            if !hit {
                continue;
            }
            if matches!(cell, Some(Block::Normal(_))) {
                destroyed += 1;
            }
            *cell = None;
        }
        destroyed
    }

    /// Whether any item block is present.
    pub fn has_items(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| matches!(cell, Some(Block::Item(_))))
    }

    /// Quick game-over check: the three middle cells of the spawn row are taken.
    pub fn is_spawn_blocked(&self) -> bool {
        let (x, y) = SPAWN_POSITION;
        !(x..x + 3).all(|sx| self.is_valid(sx, y))
    }

    /// Number of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into a row-major 2D grid.
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * WIDTH;
            row.copy_from_slice(&self.cells[start..start + WIDTH]);
        }
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// `.` is empty, `*` a bomb and any piece letter a block of that kind.
    /// Handy for setting up positions in tests.
    pub fn from_rows(rows: &[&str]) -> Self {
        use crate::types::{ItemKind, PieceKind};

        let mut board = Self::new();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, line) in rows.iter().take(HEIGHT).enumerate() {
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                let cell = match ch {
                    '*' => Some(Block::Item(ItemKind::Bomb)),
                    '.' | ' ' => None,
                    other => PieceKind::from_str(&other.to_string()).map(Block::Normal),
                };
                board.set(x as i8, (offset + i) as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
