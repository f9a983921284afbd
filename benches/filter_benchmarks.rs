//! Criterion benchmarks for scoped-logging

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use scoped_logging::prelude::*;

// ============================================================================
// Filter Resolution Benchmarks
// ============================================================================

fn rule_set(rules: usize) -> FilterSet {
    let mut filters = FilterSet::new().with_min_level(LogLevel::Warning);
    for i in 0..rules {
        filters = filters.with_rule(FilterRule::new(
            Some(if i % 2 == 0 { "Green" } else { "Cyan" }),
            Some(format!("app.component{}", i)),
            LogLevel::Debug,
        ));
    }
    filters
}

fn bench_filter_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_resolution");
    group.throughput(Throughput::Elements(1));

    for rules in [4, 32, 128] {
        let filters = rule_set(rules);
        group.bench_function(format!("{}_rules", rules), |b| {
            b.iter(|| {
                filters.is_enabled(
                    black_box("Green"),
                    black_box("app.component3.worker"),
                    black_box(LogLevel::Information),
                )
            });
        });
    }

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let registry = LoggerRegistry::builder()
        .sink("Memory", MemorySink::new())
        .min_level(LogLevel::Trace)
        .build();
    let logger = registry.logger("bench.dispatch");

    group.bench_function("plain_message", |b| {
        b.iter(|| {
            logger.information(black_box("Benchmark message"));
        });
    });

    group.bench_function("template_message", |b| {
        b.iter(|| {
            logger.log_template(
                LogLevel::Information,
                black_box("Value is '{Value}'."),
                &[42.into()],
            );
        });
    });

    group.bench_function("disabled_level_early_out", |b| {
        let muted = LoggerRegistry::builder()
            .sink("Memory", MemorySink::new())
            .min_level(LogLevel::Critical)
            .build()
            .logger("bench.muted");
        b.iter(|| {
            muted.debug(black_box("never rendered"));
        });
    });

    group.finish();
}

// ============================================================================
// Scope Benchmarks
// ============================================================================

fn bench_scopes(c: &mut Criterion) {
    let mut group = c.benchmark_group("scopes");
    group.throughput(Throughput::Elements(1));

    let provider = ScopeProvider::new();

    group.bench_function("begin_and_drop", |b| {
        b.iter(|| {
            let guard = provider.begin_scope(LogState::new().with_field("k", 1));
            black_box(&guard);
        });
    });

    let _outer = provider.begin_scope(LogState::new().with_field("Key1", "A"));
    let _inner = provider.begin_scope(LogState::new().with_field("Key2", "B"));
    group.bench_function("snapshot_two_frames", |b| {
        b.iter(|| black_box(provider.snapshot()));
    });

    group.finish();
}

criterion_group!(benches, bench_filter_resolution, bench_dispatch, bench_scopes);
criterion_main!(benches);
