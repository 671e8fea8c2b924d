use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cosmic_tetris::core::{Board, ScriptedSource};
use cosmic_tetris::engine::{Player, SessionConfig};
use cosmic_tetris::types::{PieceKind, PlayerId};

fn bench_gravity_step(c: &mut Criterion) {
    let mut player = Player::new(PlayerId::One, &SessionConfig::default(), 12345);

    c.bench_function("gravity_step", |b| {
        b.iter(|| {
            if player.is_topped_out() {
                player.reset();
            }
            black_box(player.gravity_step());
            player.board_mut().take_events();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::standard(1);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            black_box(board.clear_lines());
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut board = Board::standard(12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            if board.is_topped_out() {
                board.reset();
            }
            black_box(board.hard_drop());
            board.take_events();
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut board = Board::standard(12345);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            black_box(board.move_left());
            black_box(board.move_right());
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut board = Board::new(10, 20, Box::new(ScriptedSource::new([PieceKind::T])));

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(board.rotate());
            board.take_events();
        })
    });
}

criterion_group!(
    benches,
    bench_gravity_step,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate
);
criterion_main!(benches);
