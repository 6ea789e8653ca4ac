//! `kyva-analytics` turns source CSV files into curated Parquet snapshots and previews them in
//! the browser.
//!
//! ## Layout
//!
//! Source files live in a data directory (default `data/`); snapshots go to `data/curated/`
//! as `<source-stem>.parquet`. See [`layout::DataLayout`].
//!
//! ## Ingestion
//!
//! [`curate::run_ingestion`] picks the alphabetically-first `*.csv`, loads it fully with type
//! sniffing ([`ingestion::load_from_path`]), and writes the snapshot
//! ([`export::write_parquet`]). With no source files it reports so and writes nothing.
//!
//! ```no_run
//! use kyva_analytics::curate::{run_ingestion, CurationOptions};
//! use kyva_analytics::layout::DataLayout;
//!
//! # fn main() -> Result<(), kyva_analytics::IngestionError> {
//! let layout = DataLayout::new("data");
//! let outcome = run_ingestion(&layout, &CurationOptions::default())?;
//! for line in outcome.message_lines(&layout) {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Preview
//!
//! [`preview::list_preview_files`] lists curated snapshots first, then source files;
//! [`preview::build_preview`] loads one and returns its shape, first 25 rows and a
//! per-column dtype/null summary. [`dashboard`] serves that as a page.
//!
//! ## Type sniffing
//!
//! CSV columns load as [`types::DataType::Int64`], [`types::DataType::Float64`],
//! [`types::DataType::Bool`] or [`types::DataType::Utf8`], whichever is the narrowest type that
//! fits every non-null cell. Empty cells and the usual NA tokens load as [`types::Value::Null`].
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV/Parquet loading and observer hooks
//! - [`export`]: Parquet writing
//! - [`layout`]: data/curated directory conventions and discovery
//! - [`curate`]: the ingestion run
//! - [`preview`]: preview model
//! - [`dashboard`]: web preview
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: error types

pub mod curate;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod layout;
pub mod logging;
pub mod preview;
pub mod types;

pub use error::{IngestionError, IngestionResult};
