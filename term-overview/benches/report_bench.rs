//! Benchmarks for overview report generation.

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use term_overview::config::ReportConfig;
use term_overview::report::DataOverview;
use tokio::runtime::Runtime;

const REGIONS: [&str; 8] = [
    "north", "south", "east", "west", "central", "coast", "island", "mountain",
];

fn create_table(rows: usize) -> RecordBatch {
    let amount: Float64Array = (0..rows).map(|i| Some((i % 997) as f64 * 1.5)).collect();
    let quantity: Int64Array = (0..rows).map(|i| Some((i % 13) as i64)).collect();
    let region: StringArray = (0..rows).map(|i| Some(REGIONS[i % REGIONS.len()])).collect();
    let sku: StringArray = (0..rows).map(|i| Some(format!("sku-{}", i % 251))).collect();

    RecordBatch::try_from_iter(vec![
        ("amount", Arc::new(amount) as ArrayRef),
        ("quantity", Arc::new(quantity) as ArrayRef),
        ("region", Arc::new(region) as ArrayRef),
        ("sku", Arc::new(sku) as ArrayRef),
    ])
    .unwrap()
}

fn bench_report(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("data_overview");
    group.measurement_time(Duration::from_secs(8));

    for rows in [1_000usize, 10_000, 100_000] {
        let table = create_table(rows);
        group.throughput(Throughput::Elements(rows as u64));

        let ungrouped = DataOverview::new();
        group.bench_with_input(BenchmarkId::new("ungrouped", rows), &table, |b, table| {
            b.iter(|| rt.block_on(ungrouped.run(black_box(table))).unwrap());
        });

        let grouped = DataOverview::new().with_config(ReportConfig::new().with_group_by("region"));
        group.bench_with_input(BenchmarkId::new("grouped", rows), &table, |b, table| {
            b.iter(|| rt.block_on(grouped.run(black_box(table))).unwrap());
        });
    }

    group.finish();
}

fn bench_visualize(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let table = create_table(10_000);
    let report = rt
        .block_on(
            DataOverview::new()
                .with_config(ReportConfig::new().with_group_by("region"))
                .run(&table),
        )
        .unwrap();

    c.bench_function("visualize_json", |b| {
        b.iter(|| report.visualize(black_box("bench")).unwrap());
    });
}

criterion_group!(benches, bench_report, bench_visualize);
criterion_main!(benches);
