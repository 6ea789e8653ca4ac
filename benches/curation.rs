use std::fmt::Write as _;
use std::fs;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use kyva_analytics::curate::{run_ingestion, CurationOptions};
use kyva_analytics::export::{write_parquet, ParquetWriteOptions};
use kyva_analytics::ingestion::csv::{load_csv_from_path, CsvOptions};
use kyva_analytics::ingestion::parquet::load_parquet_from_path;
use kyva_analytics::layout::DataLayout;

const ROWS: usize = 50_000;

fn sample_csv() -> String {
    let mut out = String::from("member_id,name,visits,avg_minutes,active,joined\n");
    for i in 0..ROWS {
        let visits = if i % 7 == 0 { String::new() } else { (i % 40).to_string() };
        let _ = writeln!(
            out,
            "{i},member_{i},{visits},{:.2},{},2024-{:02}-{:02}",
            (i % 90) as f64 + 0.25,
            i % 2 == 0,
            i % 12 + 1,
            i % 28 + 1
        );
    }
    out
}

fn bench_curation(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("data");
    fs::create_dir_all(&data).expect("data dir");
    let source = data.join("attendance.csv");
    fs::write(&source, sample_csv()).expect("write sample");
    let layout = DataLayout::new(&data);

    c.bench_function("load_csv_50k", |b| {
        b.iter(|| load_csv_from_path(&source, &CsvOptions::default()).expect("load"))
    });

    let ds = load_csv_from_path(&source, &CsvOptions::default()).expect("load");
    let snapshot = dir.path().join("bench.parquet");
    c.bench_function("write_parquet_50k", |b| {
        b.iter(|| write_parquet(&ds, &snapshot, &ParquetWriteOptions::default()).expect("write"))
    });

    c.bench_function("load_parquet_50k", |b| {
        b.iter(|| load_parquet_from_path(&snapshot).expect("load"))
    });

    c.bench_function("run_ingestion_50k", |b| {
        b.iter_batched(
            CurationOptions::default,
            |opts| run_ingestion(&layout, &opts).expect("ingest"),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_curation);
criterion_main!(benches);
