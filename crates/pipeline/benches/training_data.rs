//! Benchmarks for building training data
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic rating log so the benchmark runs without any dataset on disk.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{RatingLog, RatingRecord};
use pipeline::{RatingAggregator, SamplingConfig, TrainingDataPipeline, UserPartitioner};

const USERS: u32 = 2_000;
const ITEMS: u32 = 5_000;
const RATINGS_PER_USER: u32 = 50;

/// Deterministic pseudo-ratings in 0.5 steps between 0.5 and 5.0
fn synthetic_log() -> RatingLog {
    (0..USERS)
        .flat_map(|user| {
            (0..RATINGS_PER_USER).map(move |n| {
                let item = (user * 31 + n * 97) % ITEMS;
                let rating = ((user + n * 7 + item) % 10 + 1) as f64 / 2.0;
                RatingRecord::new(user.to_string(), item.to_string(), rating)
            })
        })
        .collect()
}

fn bench_compute_averages(c: &mut Criterion) {
    let log = synthetic_log();
    let aggregator = RatingAggregator::default();

    c.bench_function("compute_averages", |b| {
        b.iter(|| black_box(aggregator.compute_averages(black_box(log.records()))))
    });
}

fn bench_partition(c: &mut Criterion) {
    let log = synthetic_log();
    let averages = RatingAggregator::default().compute_averages(log.records());
    let partitioner = UserPartitioner::default();

    c.bench_function("partition", |b| {
        b.iter(|| black_box(partitioner.partition(black_box(log.records()), &averages)))
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let log = synthetic_log();
    let pipeline = TrainingDataPipeline::new(SamplingConfig::default());

    c.bench_function("build_training_data", |b| {
        b.iter(|| black_box(pipeline.run(black_box(&log))))
    });
}

criterion_group!(
    benches,
    bench_compute_averages,
    bench_partition,
    bench_full_pipeline
);
criterion_main!(benches);
