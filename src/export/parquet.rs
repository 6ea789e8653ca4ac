//! Parquet writing implementation.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use parquet::basic::{Compression, ConvertedType, Repetition, Type as PhysicalType};
use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::types::{Type, TypePtr};

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Schema, Value};

/// Options controlling Parquet output.
#[derive(Debug, Clone, Copy)]
pub struct ParquetWriteOptions {
    /// Page compression codec.
    pub compression: Compression,
}

impl Default for ParquetWriteOptions {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
        }
    }
}

/// Write a [`DataSet`] to `path` as a single-row-group Parquet file, replacing any existing file.
///
/// Every column is OPTIONAL so nulls survive; [`DataType::Utf8`] columns are UTF8-annotated
/// byte arrays. A non-null value whose variant does not match its column type is an error.
pub fn write_parquet(
    dataset: &DataSet,
    path: impl AsRef<Path>,
    opts: &ParquetWriteOptions,
) -> IngestionResult<()> {
    let schema = Arc::new(parquet_schema_for(&dataset.schema)?);
    let props = Arc::new(
        WriterProperties::builder()
            .set_compression(opts.compression)
            .build(),
    );
    let file = File::create(path)?;
    let mut writer = SerializedFileWriter::new(file, schema, props)?;

    let mut rg = writer.next_row_group()?;
    let mut col_idx: usize = 0;
    while let Some(mut col) = rg.next_column()? {
        write_column(dataset, col_idx, col.untyped())?;
        col.close()?;
        col_idx += 1;
    }
    rg.close()?;
    writer.close()?;
    Ok(())
}

/// Build the Parquet message type for a [`Schema`].
pub fn parquet_schema_for(schema: &Schema) -> IngestionResult<Type> {
    let fields = schema
        .fields
        .iter()
        .map(|f| {
            let (physical, converted) = match f.data_type {
                DataType::Int64 => (PhysicalType::INT64, ConvertedType::NONE),
                DataType::Float64 => (PhysicalType::DOUBLE, ConvertedType::NONE),
                DataType::Bool => (PhysicalType::BOOLEAN, ConvertedType::NONE),
                DataType::Utf8 => (PhysicalType::BYTE_ARRAY, ConvertedType::UTF8),
            };
            Type::primitive_type_builder(&f.name, physical)
                .with_repetition(Repetition::OPTIONAL)
                .with_converted_type(converted)
                .build()
                .map(Arc::new)
        })
        .collect::<Result<Vec<TypePtr>, _>>()?;

    Ok(Type::group_type_builder("schema").with_fields(fields).build()?)
}

fn write_column(dataset: &DataSet, idx: usize, writer: &mut ColumnWriter<'_>) -> IngestionResult<()> {
    let field = dataset
        .schema
        .fields
        .get(idx)
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("parquet writer asked for column {idx} beyond the schema"),
        })?;

    match writer {
        ColumnWriter::Int64ColumnWriter(w) => {
            let (values, defs) = leveled(dataset, idx, field.data_type, &field.name, |v| match v {
                Value::Int64(x) => Some(*x),
                _ => None,
            })?;
            w.write_batch(&values, Some(defs.as_slice()), None)?;
        }
        ColumnWriter::DoubleColumnWriter(w) => {
            let (values, defs) = leveled(dataset, idx, field.data_type, &field.name, |v| match v {
                Value::Float64(x) => Some(*x),
                _ => None,
            })?;
            w.write_batch(&values, Some(defs.as_slice()), None)?;
        }
        ColumnWriter::BoolColumnWriter(w) => {
            let (values, defs) = leveled(dataset, idx, field.data_type, &field.name, |v| match v {
                Value::Bool(x) => Some(*x),
                _ => None,
            })?;
            w.write_batch(&values, Some(defs.as_slice()), None)?;
        }
        ColumnWriter::ByteArrayColumnWriter(w) => {
            let (values, defs) = leveled(dataset, idx, field.data_type, &field.name, |v| match v {
                Value::Utf8(s) => Some(ByteArray::from(s.as_str())),
                _ => None,
            })?;
            w.write_batch(&values, Some(defs.as_slice()), None)?;
        }
        _ => {
            return Err(IngestionError::SchemaMismatch {
                message: format!("unexpected parquet column writer for column '{}'", field.name),
            });
        }
    }
    Ok(())
}

/// Split a column into non-null values plus definition levels (0 = null, 1 = present).
fn leveled<T>(
    dataset: &DataSet,
    idx: usize,
    data_type: DataType,
    column: &str,
    extract: impl Fn(&Value) -> Option<T>,
) -> IngestionResult<(Vec<T>, Vec<i16>)> {
    let mut values = Vec::with_capacity(dataset.row_count());
    let mut defs = Vec::with_capacity(dataset.row_count());
    for (row_idx0, v) in dataset.column(idx).enumerate() {
        if v.is_null() {
            defs.push(0);
            continue;
        }
        let x = extract(v).ok_or_else(|| IngestionError::ParseError {
            row: row_idx0 + 1,
            column: column.to_string(),
            raw: v.to_string(),
            message: format!("value does not match column type {data_type}"),
        })?;
        values.push(x);
        defs.push(1);
    }
    Ok((values, defs))
}
