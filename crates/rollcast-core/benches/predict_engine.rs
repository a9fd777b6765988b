//! Criterion benchmarks for the prediction engine in `rollcast-core`.
//!
//! Every query recomputes its models from the full log, so these measure
//! the per-call cost at realistic log sizes.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rollcast_config::EngineConfig;
use rollcast_core::engine::{
    build_transition_matrix, evaluate_all, insights, predict, predict_multi_step, Observation,
    PatternMetrics,
};
use rollcast_core::Session;

fn log_of(n: usize) -> Vec<Observation> {
    let mut session = Session::default();
    for i in 0..n {
        let first = 6 + ((i * 17) % 49) as i64;
        let second = 6 + ((i * 29 + 11) % 49) as i64;
        let at = Utc
            .timestamp_millis_opt(1_700_000_000_000 + i as i64 * 1_000)
            .unwrap();
        session.append_at(first, second, at).unwrap();
    }
    session.snapshot().to_vec()
}

fn bench_predict(c: &mut Criterion) {
    let config = EngineConfig::default();
    let mut group = c.benchmark_group("engine/predict");

    for n in [20usize, 200, 1_000] {
        let log = log_of(n);
        group.bench_with_input(BenchmarkId::new("single", n), &log, |b, log| {
            b.iter(|| black_box(predict(black_box(log), &config, 1)));
        });
    }

    let log = log_of(200);
    group.bench_with_input(BenchmarkId::new("multi_step_10", 200), &log, |b, log| {
        b.iter(|| black_box(predict_multi_step(black_box(log), &config, 10)));
    });

    group.finish();
}

fn bench_models(c: &mut Criterion) {
    let config = EngineConfig::default();
    let log = log_of(200);
    let mut group = c.benchmark_group("engine/models");

    group.bench_function("transition_matrix", |b| {
        b.iter(|| black_box(build_transition_matrix(black_box(&log))));
    });
    group.bench_function("factors", |b| {
        b.iter(|| black_box(evaluate_all(black_box(&log), &config)));
    });
    group.bench_function("metrics", |b| {
        b.iter(|| black_box(PatternMetrics::compute(black_box(&log), 10)));
    });
    group.bench_function("insights", |b| {
        b.iter(|| black_box(insights(black_box(&log), &config)));
    });

    group.finish();
}

criterion_group!(benches, bench_predict, bench_models);
criterion_main!(benches);
