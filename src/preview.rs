//! Preview of a curated or source file: shape, first rows and a per-column summary.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::IngestionResult;
use crate::ingestion::{load_from_path, IngestionOptions};
use crate::layout::DataLayout;
use crate::types::{DataSet, DataType, Value};

/// Number of leading rows shown in a preview.
pub const PREVIEW_ROWS: usize = 25;

/// Where a previewable file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Parquet snapshot under the curated directory.
    Curated,
    /// CSV file under the data directory.
    Source,
}

/// A file offered for preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewFile {
    /// Path relative to the data directory (`curated/x.parquet`, `x.csv`). Unique per file.
    pub key: String,
    /// File name shown to the user.
    pub name: String,
    pub kind: FileKind,
    #[serde(skip)]
    pub path: PathBuf,
}

/// Curated snapshots first, then source files, each group sorted.
///
/// Without any curated snapshot this is just the source files.
pub fn list_preview_files(layout: &DataLayout) -> IngestionResult<Vec<PreviewFile>> {
    let curated = layout
        .curated_files()?
        .into_iter()
        .map(|p| (FileKind::Curated, p));
    let sources = layout
        .source_files()?
        .into_iter()
        .map(|p| (FileKind::Source, p));

    Ok(curated
        .chain(sources)
        .map(|(kind, path)| PreviewFile {
            key: layout
                .relative_key(&path)
                .unwrap_or_else(|| path.display().to_string()),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            kind,
            path,
        })
        .collect())
}

/// Look up a listed file by its key.
pub fn find_file<'a>(files: &'a [PreviewFile], key: &str) -> Option<&'a PreviewFile> {
    files.iter().find(|f| f.key == key)
}

/// Data type and null counts for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: DataType,
    pub non_null: usize,
    pub nulls: usize,
}

/// Everything the preview page shows for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub key: String,
    pub file_name: String,
    pub rows: usize,
    pub columns: usize,
    pub column_names: Vec<String>,
    /// The first [`PREVIEW_ROWS`] rows.
    pub head: Vec<Vec<Value>>,
    pub summary: Vec<ColumnSummary>,
}

impl Preview {
    pub fn from_dataset(file: &PreviewFile, ds: &DataSet) -> Self {
        let summary = ds
            .schema
            .fields
            .iter()
            .enumerate()
            .map(|(idx, f)| {
                let non_null = ds.non_null_count(idx);
                ColumnSummary {
                    name: f.name.clone(),
                    dtype: f.data_type,
                    non_null,
                    nulls: ds.row_count() - non_null,
                }
            })
            .collect();

        Self {
            key: file.key.clone(),
            file_name: file.name.clone(),
            rows: ds.row_count(),
            columns: ds.column_count(),
            column_names: ds.column_names(),
            head: ds.head(PREVIEW_ROWS).to_vec(),
            summary,
        }
    }
}

/// Load `file` fully and summarise it.
pub fn build_preview(file: &PreviewFile, options: &IngestionOptions) -> IngestionResult<Preview> {
    let ds = load_from_path(&file.path, options)?;
    Ok(Preview::from_dataset(file, &ds))
}
