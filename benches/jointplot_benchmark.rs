//! Benchmark for jointplot panel rendering.

#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jointgrid::prelude::*;

fn jointplot_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("jointplot");

    for size in [100, 1_000, 10_000, 100_000] {
        let x_data: Vec<f32> = (0..size).map(|i| (i as f32 * 0.013).sin()).collect();
        let y_data: Vec<f32> = (0..size).map(|i| (i as f32 * 0.007).cos()).collect();

        group.bench_with_input(BenchmarkId::new("density", size), &size, |b, _| {
            b.iter(|| {
                let plot = JointPlot::new()
                    .x(black_box(&x_data))
                    .y(black_box(&y_data))
                    .dimensions(800, 600)
                    .build()
                    .unwrap();

                plot.to_framebuffer().unwrap()
            });
        });

        group.bench_with_input(BenchmarkId::new("scatter", size), &size, |b, _| {
            let config = JointConfig {
                kind: JointKind::Scatter,
                ..JointConfig::default()
            };
            b.iter(|| {
                let plot = JointPlot::new()
                    .x(black_box(&x_data))
                    .y(black_box(&y_data))
                    .dimensions(800, 600)
                    .config(config.clone())
                    .build()
                    .unwrap();

                plot.to_framebuffer().unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, jointplot_benchmark);
criterion_main!(benches);
