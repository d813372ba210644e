use criterion::{black_box, criterion_group, criterion_main, Criterion};
use item_tetris::core::{Board, GameOptions, GameState, PieceGenerator};
use item_tetris::term::{GameView, Viewport};
use item_tetris::types::{
    Block, GameAction, GameMode, ItemKind, PieceKind, Randomizer, BOMB_RADIUS,
};

fn item_game() -> GameState {
    let options = GameOptions::default()
        .with_mode(GameMode::Item)
        .with_seed(12345);
    let mut state = GameState::new(options);
    state.start();
    state
}

fn bench_tick(c: &mut Criterion) {
    let mut state = item_game();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.restart();
            }
            state.tick(black_box(16), false);
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(Block::Normal(PieceKind::I)));
                }
            }
            board.clear_full_rows()
        })
    });
}

fn bench_detonation(c: &mut Criterion) {
    c.bench_function("detonate_two_bombs", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 10..20 {
                for x in 0..9 {
                    board.set(x, y, Some(Block::Normal(PieceKind::T)));
                }
            }
            board.set(2, 12, Some(Block::Item(ItemKind::Bomb)));
            board.set(6, 18, Some(Block::Item(ItemKind::Bomb)));
            board.detonate_items(black_box(BOMB_RADIUS))
        })
    });
}

fn bench_generator(c: &mut Criterion) {
    let mut uniform = PieceGenerator::new(12345, Randomizer::Uniform);
    c.bench_function("next_piece_uniform", |b| b.iter(|| uniform.next_piece()));

    let mut bag = PieceGenerator::new(12345, Randomizer::Bag);
    c.bench_function("next_piece_bag", |b| b.iter(|| bag.next_piece()));
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut state = item_game();

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if state.game_over() {
                state.restart();
            }
            state.apply_action(GameAction::HardDrop);
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let state = item_game();
    let snap = state.snapshot();
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = view.render(&snap, viewport);

    c.bench_function("render_game_view", |b| {
        b.iter(|| view.render_into(black_box(&snap), viewport, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_detonation,
    bench_generator,
    bench_hard_drop,
    bench_render
);
criterion_main!(benches);
