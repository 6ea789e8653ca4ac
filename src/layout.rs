//! Filesystem layout: where source files live and where curated snapshots go.
//!
//! ```text
//! data/                 source CSV files (`*.csv`)
//! data/curated/         Parquet snapshots named `<source-stem>.parquet`
//! ```

use std::io;
use std::path::{Path, PathBuf};

use crate::error::IngestionResult;

/// Data directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";
/// Name of the curated subdirectory under the data directory.
pub const CURATED_SUBDIR: &str = "curated";
/// Extension of source files.
pub const SOURCE_EXTENSION: &str = "csv";
/// Extension of curated snapshots.
pub const CURATED_EXTENSION: &str = "parquet";

/// Resolved data and curated directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    /// Directory scanned for source files.
    pub data_dir: PathBuf,
    /// Directory holding curated snapshots.
    pub curated_dir: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl DataLayout {
    /// Layout rooted at `data_dir`, with snapshots under `data_dir/curated`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let curated_dir = data_dir.join(CURATED_SUBDIR);
        Self {
            data_dir,
            curated_dir,
        }
    }

    /// Source files directly under the data directory, sorted by path.
    ///
    /// A missing data directory yields an empty list.
    pub fn source_files(&self) -> IngestionResult<Vec<PathBuf>> {
        list_files(&self.data_dir, SOURCE_EXTENSION)
    }

    /// Curated snapshots, sorted by path. Empty when the curated directory does not exist.
    pub fn curated_files(&self) -> IngestionResult<Vec<PathBuf>> {
        list_files(&self.curated_dir, CURATED_EXTENSION)
    }

    /// Snapshot path for a source file: `<curated_dir>/<stem>.parquet`.
    pub fn curated_path_for(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or(source.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(CURATED_EXTENSION);
        self.curated_dir.join(name)
    }

    /// Create the curated directory (and parents) if absent.
    pub fn ensure_curated_dir(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.curated_dir)
    }

    /// `path` relative to the data directory's parent, e.g. `data/curated/x.parquet`.
    pub fn display_path(&self, path: &Path) -> String {
        let base = self.data_dir.parent().unwrap_or(Path::new(""));
        path.strip_prefix(base)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// `path` relative to the data directory with `/` separators, e.g. `curated/x.parquet`.
    ///
    /// Returns `None` for paths outside the data directory.
    pub fn relative_key(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.data_dir).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(parts.join("/"))
    }
}

fn list_files(dir: &Path, extension: &str) -> IngestionResult<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*.{extension}",
        glob::Pattern::escape(&dir.to_string_lossy())
    );
    let entries =
        glob::glob(&pattern).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(io::Error::from)?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
