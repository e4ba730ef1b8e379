//! Criterion benchmarks for the deme search engine.
//!
//! Uses short seeded n-Queens runs to measure engine overhead with a
//! stable workload.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deme_search::deme::{SearchConfig, SearchRunner};
use deme_search::nqueens::{attacking_pairs, QueensEvaluator};

fn bench_queens_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("queens_search");
    group.sample_size(10);

    for (dim, demes, iters) in [(6usize, 4usize, 20usize), (8, 8, 20), (10, 10, 10)] {
        let config = SearchConfig::new(dim)
            .with_total_demes(demes)
            .with_tournament_size(2)
            .with_prune_size(1)
            .with_max_iterations(iters)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_m{}_i{}", dim, demes, iters), dim),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut runner = SearchRunner::new(config.clone()).unwrap();
                    let mut evaluator = QueensEvaluator::new();
                    let result = runner.run(black_box(&mut evaluator)).unwrap();
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_attacking_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("attacking_pairs");

    for &dim in &[8usize, 16, 32] {
        let board: Vec<usize> = (0..dim).collect();
        group.bench_with_input(BenchmarkId::from_parameter(dim), &board, |b, board| {
            b.iter(|| attacking_pairs(black_box(board)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_queens_search, bench_attacking_pairs);
criterion_main!(benches);
