//! Benchmarks for the N-queens counter.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use queens::{count_completions, preplace, solve, BoardSize, CompactBoard, SymmetryClass};

fn size(n: u8) -> BoardSize {
    BoardSize::new(n).expect("valid board size")
}

/// Benchmark the complete pipeline on a 10x10 board.
fn bench_solve(c: &mut Criterion) {
    c.bench_function("solve_10", |b| b.iter(|| solve(black_box(size(10)))));
}

/// Benchmark the ring preplacement generator alone.
fn bench_preplace(c: &mut Criterion) {
    let mut group = c.benchmark_group("preplace");
    group.sample_size(10);
    group.bench_function("preplace_12", |b| b.iter(|| preplace(black_box(size(12)))));
    group.finish();
}

/// Benchmark the completion counter on an empty board.
fn bench_count_empty(c: &mut Criterion) {
    let board = CompactBoard::empty(10);

    c.bench_function("count_empty_10", |b| {
        b.iter(|| count_completions(black_box(&board), 10))
    });
}

/// Benchmark completing the preplaced boards of one class sequentially.
fn bench_count_preplaced(c: &mut Criterion) {
    let preplacements = preplace(size(12));
    let boards = &preplacements[SymmetryClass::PointSymmetric];

    c.bench_function("count_point_symmetric_12", |b| {
        b.iter(|| {
            boards
                .iter()
                .map(|board| count_completions(black_box(board), 12))
                .sum::<u64>()
        })
    });
}

criterion_group!(
    benches,
    bench_solve,
    bench_preplace,
    bench_count_empty,
    bench_count_preplaced
);
criterion_main!(benches);
