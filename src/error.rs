use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by loading, inference and curation functions.
///
/// This is a single error enum shared across CSV and Parquet reading and Parquet writing.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied, disk full).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read error (malformed quoting, invalid UTF-8).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parquet read or write error.
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// The input does not conform to the expected schema (missing columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A CSV record has more cells than the header row.
    #[error("malformed csv: expected {expected} fields in line {line}, saw {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The file extension does not map to a supported format.
    #[error("unsupported format for path ({})", path.display())]
    UnsupportedFormat { path: PathBuf },
}
