use std::fs;
use std::path::Path;

use kyva_analytics::curate::{run_ingestion, select_source, CurationOptions, IngestOutcome};
use kyva_analytics::ingestion::csv::{load_csv_from_path, CsvOptions};
use kyva_analytics::ingestion::parquet::load_parquet_from_path;
use kyva_analytics::layout::DataLayout;

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

fn data_layout(root: &Path) -> DataLayout {
    let data = root.join("data");
    fs::create_dir_all(&data).unwrap();
    DataLayout::new(data)
}

#[test]
fn empty_data_dir_reports_none_found_and_writes_nothing() {
    let root = tempfile::tempdir().unwrap();
    let layout = data_layout(root.path());
    write(&layout.data_dir.join("notes.txt"), "not a csv");

    let outcome = run_ingestion(&layout, &CurationOptions::default()).unwrap();

    assert_eq!(
        outcome,
        IngestOutcome::NoSourceFiles {
            data_dir: layout.data_dir.clone()
        }
    );
    assert!(!layout.curated_dir.exists());
    let lines = outcome.message_lines(&layout);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("No CSV files found in"));
}

#[test]
fn missing_data_dir_counts_as_none_found() {
    let root = tempfile::tempdir().unwrap();
    let layout = DataLayout::new(root.path().join("nope"));

    let outcome = run_ingestion(&layout, &CurationOptions::default()).unwrap();
    assert!(matches!(outcome, IngestOutcome::NoSourceFiles { .. }));
}

#[test]
fn alphabetically_first_source_is_selected() {
    let root = tempfile::tempdir().unwrap();
    let layout = data_layout(root.path());
    write(&layout.data_dir.join("visits.csv"), "a\n1\n");
    write(&layout.data_dir.join("attendance.csv"), "b\n2\n");
    write(&layout.data_dir.join("members.csv"), "c\n3\n");
    // Only direct children count, and only the lowercase extension.
    fs::create_dir_all(layout.data_dir.join("archive")).unwrap();
    write(&layout.data_dir.join("archive").join("aaa.csv"), "z\n0\n");
    write(&layout.data_dir.join("AAA.CSV"), "z\n0\n");

    let selected = select_source(&layout).unwrap().unwrap();
    assert_eq!(selected, layout.data_dir.join("attendance.csv"));

    let IngestOutcome::Curated(report) = run_ingestion(&layout, &CurationOptions::default()).unwrap() else {
        panic!("expected a curated snapshot");
    };
    assert_eq!(report.source, layout.data_dir.join("attendance.csv"));
    assert_eq!(report.column_names, vec!["b"]);
}

#[test]
fn curated_path_is_source_stem_under_curated_dir() {
    let root = tempfile::tempdir().unwrap();
    let layout = data_layout(root.path());
    write(&layout.data_dir.join("kyva_2024.csv"), "x\n1\n");

    let IngestOutcome::Curated(report) = run_ingestion(&layout, &CurationOptions::default()).unwrap() else {
        panic!("expected a curated snapshot");
    };

    assert_eq!(report.output, layout.data_dir.join("curated").join("kyva_2024.parquet"));
    assert!(report.output.is_file());
    let lines = report.summary_lines(&layout);
    assert_eq!(
        lines.last().unwrap(),
        "Saved curated parquet → data/curated/kyva_2024.parquet"
    );
}

#[test]
fn snapshot_matches_source_shape_and_names() {
    let root = tempfile::tempdir().unwrap();
    let layout = data_layout(root.path());
    let source = layout.data_dir.join("attendance.csv");
    write(
        &source,
        "member_id,name,visits,avg_minutes,active,joined\n\
         1,Ada,12,45.5,true,2024-01-03\n\
         2,Grace,,30,false,\n\
         3,,7,NA,TRUE,2024-02-11\n",
    );

    let IngestOutcome::Curated(report) = run_ingestion(&layout, &CurationOptions::default()).unwrap() else {
        panic!("expected a curated snapshot");
    };
    assert_eq!(report.rows, 3);
    assert_eq!(report.columns, 6);

    let original = load_csv_from_path(&source, &CsvOptions::default()).unwrap();
    let snapshot = load_parquet_from_path(&report.output).unwrap();
    assert_eq!(snapshot.row_count(), original.row_count());
    assert_eq!(snapshot.column_count(), original.column_count());
    assert_eq!(snapshot.column_names(), original.column_names());
    assert_eq!(snapshot, original);
}

#[test]
fn rerunning_overwrites_the_snapshot() {
    let root = tempfile::tempdir().unwrap();
    let layout = data_layout(root.path());
    let source = layout.data_dir.join("a.csv");

    write(&source, "x\n1\n2\n");
    run_ingestion(&layout, &CurationOptions::default()).unwrap();
    write(&source, "x,y\n1,2\n");
    run_ingestion(&layout, &CurationOptions::default()).unwrap();

    let snapshot = load_parquet_from_path(layout.curated_path_for(&source)).unwrap();
    assert_eq!(snapshot.row_count(), 1);
    assert_eq!(snapshot.column_names(), vec!["x", "y"]);
}

#[test]
fn malformed_source_fails_without_a_snapshot() {
    let root = tempfile::tempdir().unwrap();
    let layout = data_layout(root.path());
    let source = layout.data_dir.join("broken.csv");
    write(&source, "a,b\n1,2\n3,4,5\n");

    assert!(run_ingestion(&layout, &CurationOptions::default()).is_err());
    assert!(!layout.curated_path_for(&source).exists());
}

#[test]
fn short_rows_are_curated_with_nulls() {
    let root = tempfile::tempdir().unwrap();
    let layout = data_layout(root.path());
    let source = layout.data_dir.join("a.csv");
    write(&source, "a,b\n1,2\n3\n");

    run_ingestion(&layout, &CurationOptions::default()).unwrap();

    let snapshot = load_parquet_from_path(layout.curated_path_for(&source)).unwrap();
    assert_eq!(snapshot.row_count(), 2);
    assert_eq!(snapshot.null_count(1), 1);
}

#[test]
fn console_lines_follow_the_report() {
    let root = tempfile::tempdir().unwrap();
    let layout = data_layout(root.path());
    write(&layout.data_dir.join("people.csv"), &fs::read_to_string("tests/fixtures/people.csv").unwrap());

    let outcome = run_ingestion(&layout, &CurationOptions::default()).unwrap();
    let lines = outcome.message_lines(&layout);
    assert_eq!(
        lines,
        vec![
            "Loading: people.csv".to_string(),
            "Rows: 2  |  Columns: 4".to_string(),
            "Columns: ['id', 'name', 'score', 'active']".to_string(),
            "Saved curated parquet → data/curated/people.parquet".to_string(),
        ]
    );
}
