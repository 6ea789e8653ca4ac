//! Loading entrypoints and implementations.
//!
//! Most callers should use [`load_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - loads the whole file into an in-memory [`crate::types::DataSet`]
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`parquet`]

pub mod csv;
pub mod observability;
pub mod parquet;
pub mod unified;

pub use self::csv::CsvOptions;
pub use observability::{
    CompositeObserver, FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats,
    TracingObserver,
};
pub use unified::{load_from_path, severity_for_error, IngestionFormat, IngestionOptions};
