//! Glossary mapping benchmarks.
//!
//! Similarity scoring dominates mapping cost, so both are measured.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datadict::config::GlossaryConfig;
use datadict::glossary::{similarity_ratio, TermDefinition};
use datadict::{BusinessGlossary, TermMapper};

fn glossary(size: usize) -> BusinessGlossary {
    (0..size).fold(BusinessGlossary::new(), |g, i| {
        g.with_term(
            format!("field_{}_code", i),
            TermDefinition::new(format!("Business Field {}", i)).with_definition("Synthetic term"),
        )
    })
}

fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity_ratio");

    for (a, b) in [
        ("customer_id", "cust_id"),
        ("transaction_timestamp_utc", "txn_ts_utc"),
        ("a_rather_long_column_name_for_testing", "another_long_column_name_for_tests"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(a.len() + b.len()), &(a, b), |bench, (a, b)| {
            bench.iter(|| black_box(similarity_ratio(a, b)))
        });
    }

    group.finish();
}

fn bench_map_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_columns");
    let columns: Vec<String> = (0..50).map(|i| format!("fld_{}_cd", i)).collect();

    for size in [10, 100, 500].iter() {
        let mapper = TermMapper::new(glossary(*size), GlossaryConfig::default());
        group.bench_with_input(BenchmarkId::new("glossary_terms", size), &mapper, |b, mapper| {
            b.iter(|| black_box(mapper.map_columns(&columns)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_similarity, bench_map_columns);
criterion_main!(benches);
