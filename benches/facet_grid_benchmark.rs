//! Benchmark for facet grid composition.

#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jointgrid::prelude::*;

fn build_frame(rows: usize, cols: usize, per_facet: usize) -> DataFrame {
    let mut row_keys = Vec::new();
    let mut col_keys = Vec::new();
    let mut xs = Vec::new();
    let mut ys = Vec::new();

    for r in 0..rows {
        for c in 0..cols {
            for k in 0..per_facet {
                row_keys.push(r as f32);
                col_keys.push(c as f32);
                xs.push((k as f32 * 0.17).sin() + r as f32);
                ys.push((k as f32 * 0.29).cos() + c as f32);
            }
        }
    }

    let mut df = DataFrame::new();
    df.add_column_f32("row", &row_keys);
    df.add_column_f32("col", &col_keys);
    df.add_column_f32("x", &xs);
    df.add_column_f32("y", &ys);
    df
}

fn facet_grid_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("facet_grid");
    group.sample_size(10);

    for (rows, cols) in [(2, 2), (2, 3), (4, 4)] {
        let df = build_frame(rows, cols, 200);
        let label = format!("{rows}x{cols}");

        group.bench_with_input(BenchmarkId::from_parameter(&label), &df, |b, df| {
            b.iter(|| {
                FacetGrid::new(black_box(df.clone()), "row", "col", "x", "y")
                    .dimensions(600, 600)
                    .build()
                    .unwrap()
                    .to_framebuffer()
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, facet_grid_benchmark);
criterion_main!(benches);
