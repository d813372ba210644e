//! Board tests - row detection, row clearing and bomb detonation

use item_tetris::core::{Board, RowMask};
use item_tetris::types::{Block, ItemKind, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, BOMB_RADIUS};

const J: Option<Block> = Some(Block::Normal(PieceKind::J));

fn fill_row(board: &mut Board, y: i8, except: Option<i8>) {
    for x in 0..BOARD_WIDTH as i8 {
        if Some(x) != except {
            board.set(x, y, J);
        }
    }
}

#[test]
fn test_board_new_is_20_by_10_and_empty() {
    let board = Board::new();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert_eq!(board.cells().len(), 200);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({x}, {y}) should be empty");
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(!board.is_valid(-1, 5));
}

#[test]
fn test_full_row_detected_on_every_row() {
    for y in 0..BOARD_HEIGHT as i8 {
        let mut board = Board::new();
        fill_row(&mut board, y, None);
        assert!(board.is_row_full(y as usize), "row {y} should be full");
    }
}

#[test]
fn test_row_missing_any_cell_is_not_full() {
    for y in [0i8, 7, 19] {
        for gap in 0..BOARD_WIDTH as i8 {
            let mut board = Board::new();
            fill_row(&mut board, y, Some(gap));
            assert!(!board.is_row_full(y as usize), "row {y} gap {gap}");
        }
    }
}

#[test]
fn test_bomb_cells_count_toward_full_rows() {
    let mut board = Board::new();
    fill_row(&mut board, 19, Some(4));
    board.set(4, 19, Some(Block::Item(ItemKind::Bomb)));
    assert!(board.is_row_full(19));
}

#[test]
fn test_clear_row_shifts_rows_above_down() {
    let mut board = Board::new();
    // A marker in every row above the cleared one, unique per row.
    let kinds = PieceKind::ALL;
    for y in 0..12i8 {
        board.set(0, y, Some(Block::Normal(kinds[y as usize % 7])));
    }
    fill_row(&mut board, 12, None);
    board.set(3, 15, J);

    let mut mask: RowMask = [false; BOARD_HEIGHT as usize];
    mask[12] = true;
    assert_eq!(board.clear_rows(&mask), 1);

    assert_eq!(board.get(0, 0), Some(None));
    for y in 0..12i8 {
        assert_eq!(
            board.get(0, y + 1),
            Some(Some(Block::Normal(kinds[y as usize % 7]))),
            "row {y} should have moved to {}",
            y + 1
        );
    }
    // Rows below the cleared one stay put.
    assert_eq!(board.get(3, 15), Some(J));
}

#[test]
fn test_clear_multiple_non_adjacent_rows() {
    let mut board = Board::from_rows(&[
        "T.........",
        "IIIIIIIIII",
        "S.........",
        "ZZZZZZZZZZ",
    ]);
    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19, 17]);
    assert_eq!(board.filled_count(), 2);
    assert_eq!(board.get(0, 19), Some(Some(Block::Normal(PieceKind::S))));
    assert_eq!(board.get(0, 18), Some(Some(Block::Normal(PieceKind::T))));
}

#[test]
fn test_clear_rows_with_empty_mask_is_noop() {
    let mut board = Board::from_rows(&["LLLL......"]);
    let before = board.clone();
    assert_eq!(board.clear_rows(&[false; BOARD_HEIGHT as usize]), 0);
    assert_eq!(board, before);
}

#[test]
fn test_detonation_clears_square_around_bomb_without_shifting() {
    let mut board = Board::from_rows(&[
        "OOOOOOOOOO",
        "OOOO*OOOOO",
        "OOOOOOOOOO",
    ]);
    let destroyed = board.detonate_items(BOMB_RADIUS);

    assert_eq!(destroyed, 8);
    assert!(!board.has_items());
    for y in 17..20i8 {
        for x in 3..=5i8 {
            assert_eq!(board.get(x, y), Some(None), "({x}, {y}) should be blasted");
        }
        assert!(board.is_occupied(2, y));
        assert!(board.is_occupied(6, y));
    }
    assert_eq!(board.filled_count(), 30 - 9);
}

#[test]
fn test_detonation_at_edge_clips_to_board() {
    let mut board = Board::from_rows(&["*OO", "OOO"]);
    assert_eq!(board.detonate_items(BOMB_RADIUS), 3);
    assert_eq!(board.get(2, 18), Some(Some(Block::Normal(PieceKind::O))));
    assert_eq!(board.get(2, 19), Some(Some(Block::Normal(PieceKind::O))));
}

#[test]
fn test_detonation_without_items_does_nothing() {
    let mut board = Board::from_rows(&["IIII......"]);
    assert_eq!(board.detonate_items(BOMB_RADIUS), 0);
    assert_eq!(board.filled_count(), 4);
}
