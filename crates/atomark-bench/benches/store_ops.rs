//! Criterion micro-benchmarks for creation, compaction, update and lookup.

use std::hint::black_box;

use atomark_bench::{churn_round, populated};
use atomark_store::Manager;
use atomark_test_utils::{Countdown, CountdownFactory};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: create 10K entities into an empty manager and refresh.
fn bench_create_refresh_10k(c: &mut Criterion) {
    c.bench_function("create_refresh_10k", |b| {
        b.iter(|| {
            let mut m = Manager::new();
            for i in 0..10_000 {
                black_box(m.create(Countdown::new(i)));
            }
            black_box(m.refresh());
        });
    });
}

/// Benchmark: replace 10% of a 10K population and refresh.
fn bench_churn_refresh_10k(c: &mut Criterion) {
    let (mut m, mut handles) = populated(10_000, 42);
    let mut factory = CountdownFactory::new(7);
    c.bench_function("churn_refresh_10k", |b| {
        b.iter(|| {
            black_box(churn_round(&mut m, &mut handles, 10, &mut factory));
        });
    });
}

/// Benchmark: one update pass over 10K visible entities.
fn bench_update_10k(c: &mut Criterion) {
    c.bench_function("update_10k", |b| {
        b.iter_batched(
            || populated(10_000, 42).0,
            |mut m| {
                let report = m.update(1.0 / 60.0);
                black_box(report.visited);
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: resolve 10K handles after relocations.
fn bench_handle_lookup_10k(c: &mut Criterion) {
    let (mut m, mut handles) = populated(10_000, 42);
    let mut factory = CountdownFactory::new(9);
    churn_round(&mut m, &mut handles, 3, &mut factory);
    c.bench_function("handle_lookup_10k", |b| {
        b.iter(|| {
            let mut total = 0i64;
            for &h in &handles {
                if let Some(e) = m.get(h) {
                    total += i64::from(e.health);
                }
            }
            black_box(total);
        });
    });
}

criterion_group!(
    benches,
    bench_create_refresh_10k,
    bench_churn_refresh_10k,
    bench_update_10k,
    bench_handle_lookup_10k
);
criterion_main!(benches);
