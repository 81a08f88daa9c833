use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use decant::{
    puzzle::generate::{generate, GeneratorConfig},
    solver::engine::SearchEngine,
};

fn bench_generated_puzzles(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_generated");
    for colors in [3usize, 4, 5] {
        let config = GeneratorConfig {
            colors,
            capacity: 4,
            empty_bottles: 2,
            scramble_steps: 48,
        };
        let (board, _) = generate(&config, 2024).expect("bench config is valid");
        group.bench_with_input(
            BenchmarkId::from_parameter(colors),
            &board,
            |b, board| {
                b.iter(|| {
                    let engine = SearchEngine::new();
                    black_box(engine.solve(black_box(board)))
                })
            },
        );
    }
    group.finish();
}

fn bench_canonical_key(c: &mut Criterion) {
    let config = GeneratorConfig {
        colors: 8,
        capacity: 4,
        empty_bottles: 2,
        scramble_steps: 64,
    };
    let (board, _) = generate(&config, 7).expect("bench config is valid");
    c.bench_function("canonical_key", |b| {
        b.iter(|| black_box(&board).canonical_key())
    });
}

criterion_group!(benches, bench_generated_puzzles, bench_canonical_key);
criterion_main!(benches);
