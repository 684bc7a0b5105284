//! Benchmarks for explore query building
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use influx_explore::{ExploreQueryBuilder, QueryKind, Tag, Target};

fn create_target(tag_count: usize) -> Target {
    Target::new("cpu").policy("one_week").tags((0..tag_count).map(|i| {
        if i % 2 == 0 {
            Tag::new(format!("tag_{}", i), format!("value_{}", i))
        } else {
            Tag::new(format!("tag_{}", i), format!("/value_{}.*/", i))
        }
    }))
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_explore_query");

    for size in [1, 10, 100] {
        let builder = ExploreQueryBuilder::with_database(create_target(size), "site");

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("tag_keys_{}", size), |b| {
            b.iter(|| builder.tag_keys())
        });

        group.bench_function(format!("tag_values_{}", size), |b| {
            b.iter(|| {
                builder
                    .build_explore_query(QueryKind::TagValues, black_box(Some("tag_0")), None)
                    .unwrap()
            })
        });

        group.bench_function(format!("measurements_{}", size), |b| {
            b.iter(|| builder.measurements(black_box(Some("cpu.*"))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build);
criterion_main!(benches);
