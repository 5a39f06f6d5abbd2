//! Dynamic map and fixed index benchmarks

use collectable::collection::{ArrayCollection, Collectable, Collection, IndexCollection};
use collectable::common::{Comparison, Value};
use collectable_bench::config::BenchmarkConfig;
use collectable_bench::data_gen::{generate_names, generate_numbers, generate_records};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Array/Materialize");

    for size in BenchmarkConfig::new().record_counts.iter() {
        let numbers = generate_numbers(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("basic", size), &numbers, |b, numbers| {
            b.iter(|| {
                let values = numbers.clone();
                let collection = Collection::create(move || {
                    Ok(collectable::primitives::arr::list(values.iter().cloned()))
                });
                black_box(collection.count().unwrap())
            });
        });

        group.bench_with_input(BenchmarkId::new("index", size), &numbers, |b, numbers| {
            b.iter(|| {
                let collection = IndexCollection::from_values(numbers.clone());
                black_box(collection.count().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_where(c: &mut Criterion) {
    let mut group = c.benchmark_group("Array/Where");

    for size in BenchmarkConfig::new().record_counts.iter() {
        let records = generate_records(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("where", size), &records, |b, records| {
            b.iter_with_setup(
                || ArrayCollection::from_items(records.clone()),
                |collection| {
                    let filtered = collection
                        .where_("department", Comparison::Equal, "kernel")
                        .where_between("age", 30, 50);
                    black_box(filtered.count().unwrap())
                },
            );
        });

        group.bench_with_input(BenchmarkId::new("pluck", size), &records, |b, records| {
            b.iter_with_setup(
                || ArrayCollection::from_items(records.clone()),
                |collection| {
                    black_box(collection.pluck("email", Some("id".into())).count().unwrap())
                },
            );
        });
    }

    group.finish();
}

fn bench_set_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("Array/Set Algebra");

    for size in BenchmarkConfig::quick().record_counts.iter() {
        let left = ArrayCollection::from_items(generate_names(*size));
        let right = ArrayCollection::from_items(generate_names(*size));
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_function(BenchmarkId::new("difference", size), |b| {
            b.iter(|| black_box(left.difference(&[&right]).count().unwrap()));
        });

        group.bench_function(BenchmarkId::new("intersect", size), |b| {
            b.iter(|| black_box(left.intersect(&[&right]).count().unwrap()));
        });

        group.bench_function(BenchmarkId::new("unique", size), |b| {
            b.iter(|| black_box(left.unique().count().unwrap()));
        });
    }

    group.finish();
}

fn bench_index_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Index/Transforms");

    for size in BenchmarkConfig::new().record_counts.iter() {
        let collection = IndexCollection::from_values(generate_numbers(*size));
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_function(BenchmarkId::new("map", size), |b| {
            b.iter(|| {
                let doubled = collection.map(|_, value| Value::from(value.to_number() * 2.0));
                black_box(doubled.size().unwrap())
            });
        });

        group.bench_function(BenchmarkId::new("filter", size), |b| {
            b.iter(|| {
                let even = collection.filter(|_, value| value.as_int().is_some_and(|n| n % 2 == 0));
                black_box(even.size().unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_materialize,
    bench_where,
    bench_set_algebra,
    bench_index_transforms
);
criterion_main!(benches);
