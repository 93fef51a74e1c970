//! Benchmarks for client-side entry filtering.
//!
//! These benchmarks measure filtering over generated entry lists of the size a
//! busy team accumulates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fake::{Fake, Faker};
use task_tracker::tracker::Entry;
use task_tracker::utils::filter::{filter_entries, FilterField};

fn entries(count: usize) -> Vec<Entry> {
    (0..count).map(|_| Faker.fake()).collect()
}

fn bench_filter_fields(c: &mut Criterion) {
    let entries = entries(1_000);
    let mut group = c.benchmark_group("filter_fields");
    for field in [FilterField::All, FilterField::Name, FilterField::Status] {
        group.bench_with_input(BenchmarkId::from_parameter(field.label()), &field, |b, field| {
            b.iter(|| filter_entries(black_box(&entries), black_box("an"), *field))
        });
    }
    group.finish();
}

fn bench_blank_query(c: &mut Criterion) {
    let entries = entries(1_000);
    c.bench_function("filter_blank_query", |b| {
        b.iter(|| filter_entries(black_box(&entries), black_box("   "), FilterField::All))
    });
}

fn bench_list_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_list_size");
    for size in [10, 100, 10_000] {
        let entries = entries(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| filter_entries(black_box(entries), black_box("progress"), FilterField::Status))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter_fields, bench_blank_query, bench_list_sizes);
criterion_main!(benches);
