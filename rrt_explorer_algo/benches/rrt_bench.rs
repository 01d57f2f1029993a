//! Benchmark RRT planning on random circle worlds.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rrt_explorer_algo::prelude::*;

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("rrt_plan");
    let start = Configuration::new(50.0, 50.0);

    for budget in [250usize, 1000] {
        let config = RrtConfig {
            seed: Some(42),
            max_iterations: budget,
            ..Default::default()
        };
        let world = WorldConfig {
            seed: Some(42),
            ..Default::default()
        };
        let field = random_world(&world, &config, &start, None).unwrap();
        let planner = RrtPlanner::new(&field, config).unwrap();

        group.bench_with_input(BenchmarkId::new("explore", budget), &budget, |b, _| {
            b.iter(|| black_box(planner.plan(black_box(start), None).unwrap()))
        });
    }

    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let config = RrtConfig {
        seed: Some(7),
        max_iterations: 2000,
        ..Default::default()
    };
    let field = ObstacleField::empty(config.margin());
    let planner = RrtPlanner::new(&field, config).unwrap();
    let tree = planner.plan(Configuration::new(50.0, 50.0), None).unwrap().tree;

    c.bench_function("tree_nearest_2000", |b| {
        b.iter(|| black_box(tree.nearest(black_box(&Configuration::new(12.5, 87.5)))))
    });
}

criterion_group!(benches, bench_plan, bench_nearest);
criterion_main!(benches);
