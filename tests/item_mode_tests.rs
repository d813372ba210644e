//! Item mode tests - line counting, forced bombs and detonation in a running game

use item_tetris::core::{Board, GameOptions, GameState, ItemManager};
use item_tetris::types::{Block, GameAction, GameMode, Piece, PieceKind, BOARD_WIDTH};

fn item_game(interval: u32) -> GameState {
    let mut game = GameState::new(GameOptions {
        mode: GameMode::Item,
        item_interval: interval,
        ..GameOptions::default().with_seed(2024)
    });
    game.start();
    game
}

/// A full bottom row that the next lock will clear.
fn prime_full_row(board: &mut Board) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, 19, Some(Block::Normal(PieceKind::Z)));
    }
}

#[test]
fn test_item_manager_triggers_every_interval() {
    let mut items = ItemManager::new(10);
    assert!(!items.on_lines_cleared(4));
    assert!(!items.on_lines_cleared(4));
    assert_eq!(items.lines_until_item(), 2);
    assert!(items.on_lines_cleared(2));
    assert_eq!(items.lines_since_item(), 0);
    assert_eq!(items.lines_until_item(), 10);
}

#[test]
fn test_item_manager_drops_surplus_lines() {
    let mut items = ItemManager::new(3);
    assert!(!items.on_lines_cleared(2));
    // 2 + 4 crosses the threshold once; the extra lines do not carry over.
    assert!(items.on_lines_cleared(4));
    assert_eq!(items.lines_since_item(), 0);
}

#[test]
fn test_item_manager_zero_lines_never_triggers() {
    let mut items = ItemManager::new(1);
    assert!(!items.on_lines_cleared(0));
    assert!(items.on_lines_cleared(1));
}

#[test]
fn test_normal_mode_never_forces_items() {
    let mut game = GameState::new(GameOptions::default().with_seed(2024));
    game.start();
    assert_eq!(game.lines_until_item(), None);

    for _ in 0..3 {
        prime_full_row(game.board_mut());
        game.apply_action(GameAction::HardDrop);
        let event = game.take_last_event().unwrap();
        assert!(event.lines_cleared >= 1);
        assert!(!event.item_triggered);
        assert!(!game.active().unwrap().piece.is_item());
    }
}

#[test]
fn test_clearing_interval_lines_forces_a_bomb() {
    let mut game = item_game(2);
    assert_eq!(game.lines_until_item(), Some(2));

    prime_full_row(game.board_mut());
    game.apply_action(GameAction::HardDrop);
    assert!(!game.take_last_event().unwrap().item_triggered);
    assert_eq!(game.lines_until_item(), Some(1));

    prime_full_row(game.board_mut());
    game.apply_action(GameAction::HardDrop);
    let event = game.take_last_event().unwrap();
    assert!(event.item_triggered);
    assert_eq!(game.active().unwrap().piece, Piece::BOMB);
    assert_eq!(game.lines_until_item(), Some(2));
}

#[test]
fn test_bomb_piece_detonates_when_it_lands() {
    let mut game = item_game(1);
    prime_full_row(game.board_mut());
    game.apply_action(GameAction::HardDrop);
    assert_eq!(game.active().unwrap().piece, Piece::BOMB);
    assert!(game.board().filled_count() > 0);

    // Every spawn shape covers column 4, so the bomb lands on the previous piece.
    game.apply_action(GameAction::HardDrop);
    let event = game.take_last_event().unwrap();
    assert_eq!(event.piece, Piece::BOMB);
    assert!(event.cells_destroyed >= 1);
    assert!(!game.board().has_items());
    assert_eq!(game.bombs_detonated(), 1);
    assert!(event.score > 0);
}

#[test]
fn test_snapshot_reports_item_countdown() {
    let mut game = item_game(1);
    let snap = game.snapshot();
    assert_eq!(snap.lines_until_item, Some(1));

    prime_full_row(game.board_mut());
    game.apply_action(GameAction::HardDrop);
    // The forced bomb spawns straight away and leaves the preview regular.
    let snap = game.snapshot();
    assert_eq!(snap.active.unwrap().piece, Piece::BOMB);
    assert!(!game.generator().item_pending());
    assert!(snap.next.iter().all(|p| !p.is_item()));
    assert_eq!(snap.lines_until_item, Some(1));
}
