use criterion::{criterion_group, criterion_main, Criterion, black_box};
use checkerbot::perft::perft;
use checkerbot::{legal_moves, Board, Side};

fn bench_movegen(c: &mut Criterion) {
    let b = Board::startpos();
    c.bench_function("legal_moves_startpos", |ben| {
        ben.iter(|| black_box(legal_moves(black_box(&b), Side::White).len()))
    });
    c.bench_function("perft_5_startpos", |ben| {
        ben.iter(|| black_box(perft(black_box(&b), Side::White, 5)))
    });
}

criterion_group!(benches, bench_movegen);
criterion_main!(benches);
