//! Scoring module - classic line scores plus combo, drop and bomb points.

use crate::types::{
    BOMB_CELL_SCORE, COMBO_BASE, DROP_INTERVALS, DROP_INTERVAL_MIN_MS, DROP_INTERVAL_STEP_MS,
    LINE_SCORES,
};

/// Points for clearing `lines` rows at `level` (0-based). More than four rows
/// at once scores like four.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_SCORES[lines.min(4)].saturating_mul(level + 1)
}

/// Combo bonus for consecutive clearing locks.
///
/// `combo` counts clearing locks in a row; the first clear of a chain (1)
/// earns nothing, each further one earns `COMBO_BASE * (combo - 1)`.
pub fn calculate_combo_bonus(combo: u32) -> u32 {
    COMBO_BASE.saturating_mul(combo.saturating_sub(1))
}

/// Points for dropping a piece `distance` rows: 2 per row for hard drops, 1 for soft drops.
pub fn calculate_drop_score(distance: u32, hard: bool) -> u32 {
    if hard {
        distance.saturating_mul(2)
    } else {
        distance
    }
}

/// Points for regular blocks destroyed by a bomb.
pub fn calculate_bomb_score(cells: u32, level: u32) -> u32 {
    cells
        .saturating_mul(BOMB_CELL_SCORE)
        .saturating_mul(level + 1)
}

/// Gravity interval for a level in milliseconds.
///
/// Follows [`DROP_INTERVALS`], then keeps shrinking by
/// `DROP_INTERVAL_STEP_MS` per level down to `DROP_INTERVAL_MIN_MS`.
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let last = DROP_INTERVALS.len() - 1;
    match DROP_INTERVALS.get(level as usize) {
        Some(&ms) => ms,
        None => {
            let extra = level - last as u32;
            DROP_INTERVALS[last]
                .saturating_sub(extra.saturating_mul(DROP_INTERVAL_STEP_MS))
                .max(DROP_INTERVAL_MIN_MS)
        }
    }
}
