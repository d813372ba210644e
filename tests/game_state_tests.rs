//! Game state integration tests through the public API

use item_tetris::core::{GameOptions, GameState};
use item_tetris::types::{
    Block, GameAction, GameMode, PieceKind, Randomizer, BASE_DROP_MS, BOARD_WIDTH,
    LINE_CLEAR_PAUSE_MS, SPAWN_POSITION, TICK_MS,
};

fn started(seed: u64) -> GameState {
    let mut game = GameState::new(GameOptions::default().with_seed(seed));
    game.start();
    game
}

#[test]
fn test_game_starts_with_piece_at_spawn() {
    let game = started(1);
    let active = game.active().unwrap();
    assert_eq!((active.x, active.y), SPAWN_POSITION);
    assert!(!game.game_over());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_actions_ignored_before_start() {
    let mut game = GameState::new(GameOptions::default());
    assert!(!game.apply_action(GameAction::MoveLeft));
    assert!(!game.apply_action(GameAction::Pause));
    assert!(!game.tick(BASE_DROP_MS * 2, false));
}

#[test]
fn test_gravity_over_fixed_ticks() {
    let mut game = started(9);
    let y0 = game.active().unwrap().y;
    let ticks = BASE_DROP_MS.div_ceil(TICK_MS);
    for _ in 0..ticks {
        game.tick(TICK_MS, false);
    }
    assert_eq!(game.active().unwrap().y, y0 + 1);
}

#[test]
fn test_soft_drop_is_faster_and_scores() {
    let mut game = started(9);
    let y0 = game.active().unwrap().y;
    for _ in 0..10 {
        game.tick(TICK_MS * 7, true);
    }
    assert!(game.active().unwrap().y >= y0 + 5);
    assert!(game.score() >= 5);
}

#[test]
fn test_hard_drop_locks_and_spawns_next() {
    let mut game = started(31);
    let next = game.generator().preview()[0];
    assert!(game.apply_action(GameAction::HardDrop));
    assert_eq!(game.pieces_locked(), 1);
    assert_eq!(game.board().filled_count(), 4);
    assert_eq!(game.active().unwrap().piece, next);
}

#[test]
fn test_full_row_clear_scores_and_pauses() {
    let mut game = started(5);
    for x in 0..BOARD_WIDTH as i8 {
        game.board_mut().set(x, 19, Some(Block::Normal(PieceKind::L)));
    }
    game.apply_action(GameAction::HardDrop);

    let event = game.take_last_event().unwrap();
    assert_eq!(event.lines_cleared, 1);
    assert_eq!(game.lines(), 1);
    assert!(game.score() >= 40);
    assert!(game.line_clear_pending());

    // The next piece waits out the clear pause before falling.
    let y0 = game.active().unwrap().y;
    game.tick(LINE_CLEAR_PAUSE_MS, false);
    assert!(!game.line_clear_pending());
    assert_eq!(game.active().unwrap().y, y0);
}

#[test]
fn test_combo_bonus_on_consecutive_clears() {
    let mut game = started(5);
    // 40 for a single, then 40 plus a 50 point combo bonus.
    for (combo, expected) in [(1u32, 40u32), (2, 90)] {
        for x in 0..BOARD_WIDTH as i8 {
            game.board_mut().set(x, 19, Some(Block::Normal(PieceKind::L)));
        }
        game.apply_action(GameAction::HardDrop);
        assert_eq!(game.combo(), combo);
        assert_eq!(game.take_last_event().unwrap().score, expected);
    }

    game.apply_action(GameAction::HardDrop);
    assert_eq!(game.combo(), 0);
}

#[test]
fn test_stack_reaching_spawn_ends_game() {
    let mut game = started(77);
    for y in 2..20i8 {
        for x in 1..BOARD_WIDTH as i8 {
            game.board_mut().set(x, y, Some(Block::Normal(PieceKind::T)));
        }
    }
    game.apply_action(GameAction::HardDrop);
    assert!(game.game_over());
    assert!(game.active().is_none());
    assert!(!game.apply_action(GameAction::MoveLeft));
    assert!(!game.tick(1000, false));
}

#[test]
fn test_restart_after_game_over() {
    let mut game = started(77);
    for x in 0..BOARD_WIDTH as i8 {
        game.board_mut().set(x, 0, Some(Block::Normal(PieceKind::T)));
    }
    game.spawn_piece();
    assert!(game.game_over());

    assert!(game.apply_action(GameAction::Restart));
    assert!(!game.game_over());
    assert!(game.active().is_some());
    assert_eq!(game.board().filled_count(), 0);
}

#[test]
fn test_restart_deals_a_different_sequence() {
    let mut a = started(123);
    let first: Vec<_> = a.generator().preview().to_vec();
    a.restart();
    let second: Vec<_> = a.generator().preview().to_vec();
    assert_ne!(first, second);
}

#[test]
fn test_options_carry_mode_and_randomizer() {
    let options = GameOptions {
        mode: GameMode::Item,
        randomizer: Randomizer::Bag,
        start_level: 4,
        ..GameOptions::default()
    };
    let game = GameState::new(options);
    assert_eq!(game.mode(), GameMode::Item);
    assert_eq!(game.generator().randomizer(), Randomizer::Bag);
    assert_eq!(game.level(), 4);
}
