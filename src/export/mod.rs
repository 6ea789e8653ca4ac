//! Writing datasets back to disk.
//!
//! Curated snapshots are Parquet; see [`parquet::write_parquet`].

pub mod parquet;

pub use self::parquet::{write_parquet, ParquetWriteOptions};
