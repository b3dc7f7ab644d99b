//! Benchmarks for testset-importer
//!
//! Run with: cargo bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use testset_importer::dataset::Row;
use testset_importer::store::{persist_test_set, Keyspace, MemoryStore};
use testset_importer::testset::build_test_cases;
use testset_importer::{TestSet, TestSetIdentity};

/// Roughly the size of the GSM8k test split, with every tenth row incomplete
fn sample_rows() -> Vec<Row> {
    (0..1319)
        .map(|i| {
            let question = format!(
                "Natalia sold clips to {} of her friends in April, and then she sold half as many \
                 clips in May. How many clips did Natalia sell altogether in April and May?",
                i
            );
            let answer = (i % 10 != 0).then(|| format!("#### {}", i + i / 2));
            Row::new(Some(&question), answer.as_deref())
        })
        .collect()
}

fn benchmark_build_test_cases(c: &mut Criterion) {
    let identity = TestSetIdentity::default();
    let rows = sample_rows();

    c.bench_function("build_test_cases_1319", |b| {
        b.iter(|| {
            let outcome = build_test_cases(&identity, black_box(&rows));
            black_box(outcome);
        })
    });
}

fn benchmark_persist(c: &mut Criterion) {
    let identity = TestSetIdentity::default();
    let outcome = build_test_cases(&identity, &sample_rows());
    let test_set = TestSet::new(&identity, outcome.tests, Utc::now());
    let keyspace = Keyspace::new("sz");

    c.bench_function("persist_test_set_memory", |b| {
        let mut store = MemoryStore::new();
        b.iter(|| {
            let persisted = persist_test_set(&mut store, &keyspace, black_box(&test_set)).unwrap();
            black_box(persisted);
        })
    });
}

criterion_group!(benches, benchmark_build_test_cases, benchmark_persist);
criterion_main!(benches);
