//! Ingestion run: pick a source CSV, load it, write its curated Parquet snapshot.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{IngestionError, IngestionResult};
use crate::export::{write_parquet, ParquetWriteOptions};
use crate::ingestion::{
    load_from_path, severity_for_error, IngestionContext, IngestionFormat, IngestionOptions, IngestionStats,
};
use crate::layout::DataLayout;

/// How many column names the console summary lists before eliding the rest.
pub const SUMMARY_COLUMN_LIMIT: usize = 10;

/// Options for an ingestion run.
#[derive(Debug, Clone, Default)]
pub struct CurationOptions {
    /// How the source file is loaded (and who observes it).
    pub ingestion: IngestionOptions,
    /// How the snapshot is written.
    pub parquet: ParquetWriteOptions,
}

/// What a successful curation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurationReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
}

/// Result of [`run_ingestion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The data directory had no source files; nothing was written.
    NoSourceFiles { data_dir: PathBuf },
    /// The first source file was curated.
    Curated(CurationReport),
}

impl IngestOutcome {
    /// Console lines describing the outcome.
    pub fn message_lines(&self, layout: &DataLayout) -> Vec<String> {
        match self {
            IngestOutcome::NoSourceFiles { data_dir } => vec![no_sources_message(data_dir)],
            IngestOutcome::Curated(report) => {
                let mut lines = vec![loading_line(&report.source)];
                lines.extend(report.summary_lines(layout));
                lines
            }
        }
    }
}

impl CurationReport {
    /// Row/column counts, the first column names and the snapshot location.
    pub fn summary_lines(&self, layout: &DataLayout) -> Vec<String> {
        let shown: Vec<String> = self
            .column_names
            .iter()
            .take(SUMMARY_COLUMN_LIMIT)
            .map(|name| format!("'{name}'"))
            .collect();
        let mut columns_line = format!("Columns: [{}]", shown.join(", "));
        if self.column_names.len() > SUMMARY_COLUMN_LIMIT {
            columns_line.push_str(" ...");
        }

        vec![
            format!(
                "Rows: {}  |  Columns: {}",
                format_thousands(self.rows),
                self.columns
            ),
            columns_line,
            format!(
                "Saved curated parquet → {}",
                layout.display_path(&self.output)
            ),
        ]
    }
}

/// Message shown when there is nothing to ingest.
pub fn no_sources_message(data_dir: &Path) -> String {
    format!(
        "No CSV files found in {}. Drop your sample CSV there and re-run.",
        data_dir.display()
    )
}

/// `Loading: <file name>`.
pub fn loading_line(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    format!("Loading: {name}")
}

/// The source file an ingestion run would pick: the first in sorted order.
pub fn select_source(layout: &DataLayout) -> IngestionResult<Option<PathBuf>> {
    Ok(layout.source_files()?.into_iter().next())
}

/// Curate the first source file under `layout`, or report that there is none.
///
/// Nothing is written (not even the curated directory) when no source file exists.
pub fn run_ingestion(layout: &DataLayout, options: &CurationOptions) -> IngestionResult<IngestOutcome> {
    match select_source(layout)? {
        Some(source) => curate_file(layout, &source, options).map(IngestOutcome::Curated),
        None => {
            tracing::warn!(data_dir = %layout.data_dir.display(), "no source files found");
            Ok(IngestOutcome::NoSourceFiles {
                data_dir: layout.data_dir.clone(),
            })
        }
    }
}

/// Load `source` fully and write it to its curated path, overwriting any earlier snapshot.
pub fn curate_file(
    layout: &DataLayout,
    source: &Path,
    options: &CurationOptions,
) -> IngestionResult<CurationReport> {
    tracing::debug!(source = %source.display(), "loading source file");
    let dataset = load_from_path(source, &options.ingestion)?;

    let output = layout.curated_path_for(source);
    let ctx = IngestionContext {
        path: output.clone(),
        format: IngestionFormat::Parquet,
    };

    let written = layout
        .ensure_curated_dir()
        .map_err(IngestionError::from)
        .and_then(|()| write_parquet(&dataset, &output, &options.parquet));

    let stats = IngestionStats::of(&dataset);
    if let Some(obs) = options.ingestion.observer.as_ref() {
        match &written {
            Ok(()) => obs.on_curated(source, &ctx, stats),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.ingestion.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }
    written?;

    Ok(CurationReport {
        source: source.to_path_buf(),
        output,
        rows: stats.rows,
        columns: stats.columns,
        column_names: dataset.column_names(),
    })
}

/// `1234567` -> `1,234,567`.
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
