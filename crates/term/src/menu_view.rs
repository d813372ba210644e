//! Menu, high-score and game-over screens.
//!
//! Like [`crate::game_view`], these only draw into a [`FrameBuffer`]; scene
//! state lives with the caller.

use crate::fb::{CellStyle, FrameBuffer};
use crate::game_view::Viewport;
use crate::palette;
use crate::types::GameMode;

/// A vertical list of selectable entries.
#[derive(Debug, Clone, Copy)]
pub struct MenuScreen<'a> {
    pub title: &'a str,
    pub entries: &'a [&'a str],
    pub selected: usize,
    pub footer: &'a str,
}

/// One line of the high-score table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRow {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}

/// Final numbers of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub mode: GameMode,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub bombs_detonated: u32,
    /// 1-based position in the high-score table, if the score made it in.
    pub rank: Option<usize>,
}

const ENTRY_WIDTH: u16 = 20;

pub fn render_menu_into(menu: &MenuScreen<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
    reset(fb, viewport);

    let block_h = 4 + menu.entries.len() as u16 * 2;
    let mut y = viewport.height.saturating_sub(block_h) / 2;
    fb.put_str_centered(0, viewport.width, y, menu.title, palette::TITLE);
    y = y.saturating_add(3);

    let entry_x = viewport.width.saturating_sub(ENTRY_WIDTH) / 2;
    for (i, entry) in menu.entries.iter().enumerate() {
        let style = if i == menu.selected {
            palette::HIGHLIGHT
        } else {
            palette::VALUE
        };
        if i == menu.selected {
            fb.fill_rect(entry_x, y, ENTRY_WIDTH, 1, ' ', style);
        }
        fb.put_str_centered(entry_x, ENTRY_WIDTH, y, entry, style);
        y = y.saturating_add(2);
    }

    footer(fb, viewport, menu.footer);
}

pub fn render_high_scores_into(
    normal: &[ScoreRow],
    item: &[ScoreRow],
    viewport: Viewport,
    fb: &mut FrameBuffer,
) {
    reset(fb, viewport);
    fb.put_str_centered(0, viewport.width, 1, "HIGH SCORES", palette::TITLE);

    // Two columns when there is room, stacked otherwise.
    let col_w = 24u16;
    if viewport.width >= col_w * 2 + 4 {
        let left = viewport.width / 2 - col_w - 2;
        let right = viewport.width / 2 + 2;
        score_column(fb, left, 3, GameMode::Normal, normal);
        score_column(fb, right, 3, GameMode::Item, item);
    } else {
        let x = viewport.width.saturating_sub(col_w) / 2;
        let next = score_column(fb, x, 3, GameMode::Normal, normal);
        score_column(fb, x, next.saturating_add(1), GameMode::Item, item);
    }

    footer(fb, viewport, "Esc: back");
}

/// Draws one mode's table and returns the row below it.
fn score_column(fb: &mut FrameBuffer, x: u16, y: u16, mode: GameMode, rows: &[ScoreRow]) -> u16 {
    fb.put_str(x, y, mode.label(), palette::LABEL.bold());
    fb.put_str(x, y + 1, " #   SCORE  LINES LV", palette::LABEL);
    let mut y = y + 2;
    if rows.is_empty() {
        fb.put_str(x, y, " no scores yet", palette::HINT);
        return y + 1;
    }
    for (i, row) in rows.iter().enumerate() {
        let line = format!(
            "{:>2} {:>7} {:>6} {:>2}",
            i + 1,
            row.score,
            row.lines,
            row.level
        );
        fb.put_str(x, y, &line, palette::VALUE);
        y += 1;
    }
    y
}

pub fn render_game_over_into(summary: &GameOverSummary, viewport: Viewport, fb: &mut FrameBuffer) {
    reset(fb, viewport);

    let mut y = viewport.height.saturating_sub(12) / 2;
    fb.put_str_centered(0, viewport.width, y, "GAME OVER", palette::TITLE);
    y = y.saturating_add(2);
    fb.put_str_centered(0, viewport.width, y, summary.mode.label(), palette::LABEL);
    y = y.saturating_add(2);

    let mut stats = vec![
        format!("SCORE  {:>8}", summary.score),
        format!("LINES  {:>8}", summary.lines),
        format!("LEVEL  {:>8}", summary.level),
    ];
    if summary.mode == GameMode::Item {
        stats.push(format!("BOMBS  {:>8}", summary.bombs_detonated));
    }
    for line in &stats {
        fb.put_str_centered(0, viewport.width, y, line, palette::VALUE);
        y = y.saturating_add(1);
    }

    if let Some(rank) = summary.rank {
        y = y.saturating_add(1);
        let text = format!("NEW HIGH SCORE  #{rank}");
        fb.put_str_centered(0, viewport.width, y, &text, palette::BOMB_TEXT);
    }

    footer(fb, viewport, "Enter: menu   R: retry");
}

fn reset(fb: &mut FrameBuffer, viewport: Viewport) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::default().cell(' '));
}

fn footer(fb: &mut FrameBuffer, viewport: Viewport, text: &str) {
    if viewport.height > 0 {
        fb.put_str_centered(0, viewport.width, viewport.height - 1, text, palette::HINT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selected_entry_is_highlighted() {
        let menu = MenuScreen {
            title: "TITLE",
            entries: &["One", "Two"],
            selected: 1,
            footer: "",
        };
        let mut fb = FrameBuffer::new(40, 20);
        render_menu_into(&menu, Viewport::new(40, 20), &mut fb);

        let row_of = |needle: &str| (0..20).find(|&y| fb.row_text(y).contains(needle)).unwrap();
        let two_y = row_of("Two");
        let one_y = row_of("One");
        let x = fb.row_text(two_y).find("Two").unwrap() as u16;
        assert_eq!(fb.get(x, two_y).unwrap().style, palette::HIGHLIGHT);
        let x = fb.row_text(one_y).find("One").unwrap() as u16;
        assert_eq!(fb.get(x, one_y).unwrap().style, palette::VALUE);
    }

    #[test]
    fn empty_tables_show_placeholder() {
        let mut fb = FrameBuffer::new(80, 24);
        render_high_scores_into(&[], &[], Viewport::new(80, 24), &mut fb);
        assert!(fb.contains_text("NORMAL"));
        assert!(fb.contains_text("ITEM"));
        assert!(fb.contains_text("no scores yet"));
    }

    #[test]
    fn game_over_shows_rank_only_when_ranked() {
        let mut summary = GameOverSummary {
            mode: GameMode::Item,
            score: 1234,
            lines: 12,
            level: 1,
            bombs_detonated: 1,
            rank: None,
        };
        let mut fb = FrameBuffer::new(60, 24);
        render_game_over_into(&summary, Viewport::new(60, 24), &mut fb);
        assert!(fb.contains_text("1234"));
        assert!(fb.contains_text("BOMBS"));
        assert!(!fb.contains_text("NEW HIGH SCORE"));

        summary.rank = Some(2);
        render_game_over_into(&summary, Viewport::new(60, 24), &mut fb);
        assert!(fb.contains_text("NEW HIGH SCORE  #2"));
    }
}
