use std::collections::BTreeSet;

use any_columns::{ColumnDefinition, Schema, find_best_matching_schemas};
use criterion::{Criterion, criterion_group, criterion_main};

const HEADER_COUNT: usize = 200;
const SCHEMA_COUNT: usize = 50;

fn generate_headers() -> BTreeSet<String> {
    (0..HEADER_COUNT).map(|i| format!("field_{i:03}")).collect()
}

fn exact_schemas() -> Vec<Schema> {
    (0..SCHEMA_COUNT)
        .map(|s| {
            let columns = (0..10).map(|c| {
                let column = ColumnDefinition::exact(format!("field_{:03}", (s * 3 + c) % 250));
                column.with_required(c < 3)
            });
            Schema::new(format!("exact_{s}"), columns)
        })
        .collect()
}

fn pattern_schemas() -> Vec<Schema> {
    (0..SCHEMA_COUNT)
        .map(|s| {
            let columns = (0..10).map(|c| {
                let pattern = format!("^field_{:03}$", (s * 3 + c) % 250);
                ColumnDefinition::pattern(&pattern)
                    .expect("valid pattern")
                    .with_required(c < 3)
            });
            Schema::new(format!("pattern_{s}"), columns)
        })
        .collect()
}

fn bench_ranking(c: &mut Criterion) {
    let headers = generate_headers();
    let exact = exact_schemas();
    let patterns = pattern_schemas();

    let mut group = c.benchmark_group("rank_schemas");

    group.bench_function("exact_columns", |b| {
        b.iter(|| find_best_matching_schemas(&exact, &headers).expect("rank exact"));
    });

    group.bench_function("pattern_columns", |b| {
        b.iter(|| find_best_matching_schemas(&patterns, &headers).expect("rank patterns"));
    });

    group.finish();
}

criterion_group!(benches, bench_ranking);
criterion_main!(benches);
