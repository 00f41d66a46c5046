//! Criterion benchmarks for SpikeWatch hot paths.
//!
//! Benchmarks:
//! 1. Indicator engine over series of increasing length
//! 2. Full per-instrument pipeline (engine + spikes + fraud)

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use spikewatch_core::data::SyntheticLoader;
use spikewatch_core::domain::Series;
use spikewatch_core::engine::IndicatorEngine;
use spikewatch_core::Pipeline;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(years: i32) -> Series {
    let start = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    let end = NaiveDate::from_ymd_opt(2000 + years, 1, 3).unwrap();
    let points = SyntheticLoader::default().generate("BENCH", start, end);
    Series::new("BENCH", points).unwrap()
}

// ── 1. Indicator Engine ──────────────────────────────────────────────

fn bench_engine(c: &mut Criterion) {
    let engine = IndicatorEngine::standard();
    let mut group = c.benchmark_group("indicator_engine");
    for years in [2, 10, 25] {
        let series = make_series(years);
        group.bench_with_input(BenchmarkId::from_parameter(series.len()), &series, |b, s| {
            b.iter(|| engine.compute(black_box(s)))
        });
    }
    group.finish();
}

// ── 2. Full Pipeline ─────────────────────────────────────────────────

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = Pipeline::default();
    let mut group = c.benchmark_group("pipeline");
    for years in [2, 10, 25] {
        let series = make_series(years);
        group.bench_with_input(BenchmarkId::from_parameter(series.len()), &series, |b, s| {
            b.iter(|| pipeline.analyze(black_box(s)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine, bench_pipeline);
criterion_main!(benches);
