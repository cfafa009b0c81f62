use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use minesweep_core::{Board, GameConfig, PartialShuffle, RejectionSampler};
use std::hint::black_box;

const TIERS: [(&str, u16, u16, u32); 4] = [
    ("beginner", 9, 9, 10),
    ("intermediate", 16, 16, 40),
    ("expert", 16, 30, 99),
    ("saturated", 30, 30, 880),
];

fn generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for (name, rows, cols, mines) in TIERS {
        let config = GameConfig::new(rows, cols, Some(mines)).expect("tier config is valid");

        group.bench_with_input(BenchmarkId::new("rejection", name), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(Board::generate(config, RejectionSampler::new(seed)))
            });
        });
        group.bench_with_input(BenchmarkId::new("shuffle", name), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(Board::generate(config, PartialShuffle::new(seed)))
            });
        });
    }

    group.finish();
}

fn flood_reveal(c: &mut Criterion) {
    let config = GameConfig::new(200, 200, Some(1)).expect("sparse config is valid");

    c.bench_function("reveal/sparse_200x200", |b| {
        b.iter_batched(
            || Board::generate(config, PartialShuffle::new(9)).expect("board generates"),
            |mut board| {
                let row = if board.mined_positions().contains(&(0, 0)) { 199 } else { 0 };
                black_box(board.reveal(row, 0))
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, generation, flood_reveal);
criterion_main!(benches);
