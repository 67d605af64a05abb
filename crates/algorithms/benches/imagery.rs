//! Benchmarks for the vegetation index and health analysis

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array3;
use vegwatch_algorithms::health::{analyze, AnalyzerParams};
use vegwatch_algorithms::imagery::{rgb_vegetation_index, VisibleBandNir};
use vegwatch_algorithms::timeseries::{SampleOrigin, TimePoint, TimeSeries};
use vegwatch_core::PixelGrid;

fn create_grid(size: usize, seed: usize) -> PixelGrid {
    let data = Array3::from_shape_fn((size, size, 3), |(row, col, c)| {
        ((row * 7 + col * 13 + c * 31 + seed) % 256) as u8
    });
    PixelGrid::from_array(data).unwrap()
}

fn bench_rgb_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("imagery/rgb_index");
    let model = VisibleBandNir::default();
    for size in [256, 512, 1024, 2048] {
        let grid = create_grid(size, 0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| rgb_vegetation_index(black_box(&grid), &model))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("health/analyze");
    let model = VisibleBandNir::default();
    for months in [6, 12, 24] {
        let start = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
        let points = (0..months)
            .map(|i| {
                let date = start + chrono::Months::new(i as u32);
                let index = rgb_vegetation_index(&create_grid(256, i * 17), &model);
                TimePoint::new(date, index, SampleOrigin::Fetched)
            })
            .collect();
        let series = TimeSeries::from_points(points).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(months), &months, |b, _| {
            b.iter(|| analyze(black_box(&series), &AnalyzerParams::default()).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rgb_index, bench_analyze);
criterion_main!(benches);
