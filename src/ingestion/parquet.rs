//! Parquet reading implementation.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use parquet::basic::{ConvertedType, Type as PhysicalType};
use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field;
use parquet::schema::types::Type;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field as SchemaField, Schema, Value};

/// Load a Parquet file using the schema stored in the file itself.
pub fn load_parquet_from_path(path: impl AsRef<Path>) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let schema = parquet_schema_from_path(path)?;
    ingest_parquet_from_path(path, &schema)
}

/// Derive a [`Schema`] from the top-level fields of a Parquet file.
///
/// Booleans map to [`DataType::Bool`], plain or integer-annotated INT32/INT64 to
/// [`DataType::Int64`], FLOAT/DOUBLE to [`DataType::Float64`]. Everything else (strings, dates,
/// decimals, nested groups) is read as [`DataType::Utf8`] text.
pub fn parquet_schema_from_path(path: impl AsRef<Path>) -> IngestionResult<Schema> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;
    let root = reader.metadata().file_metadata().schema_descr().root_schema();
    let fields = root
        .get_fields()
        .iter()
        .map(|t| SchemaField::new(t.name(), data_type_for(t)))
        .collect();
    Ok(Schema::new(fields))
}

fn data_type_for(t: &Type) -> DataType {
    if !t.is_primitive() {
        return DataType::Utf8;
    }
    let converted = t.get_basic_info().converted_type();
    match t.get_physical_type() {
        PhysicalType::BOOLEAN => DataType::Bool,
        PhysicalType::INT32 | PhysicalType::INT64 => match converted {
            ConvertedType::NONE
            | ConvertedType::INT_8
            | ConvertedType::INT_16
            | ConvertedType::INT_32
            | ConvertedType::INT_64
            | ConvertedType::UINT_8
            | ConvertedType::UINT_16
            | ConvertedType::UINT_32
            | ConvertedType::UINT_64 => DataType::Int64,
            _ => DataType::Utf8,
        },
        PhysicalType::FLOAT | PhysicalType::DOUBLE => DataType::Float64,
        _ => DataType::Utf8,
    }
}

/// Ingest a Parquet file into an in-memory `DataSet` using a caller-provided schema.
///
/// Notes:
/// - Validates that all schema fields exist as top-level Parquet columns
/// - Uses the Parquet record API (`RowIter`)
pub fn ingest_parquet_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let available_columns = parquet_top_level_columns(&reader);
    for field in &schema.fields {
        if !available_columns.contains(field.name.as_str()) {
            return Err(IngestionError::SchemaMismatch {
                message: format!("missing required column '{}'", field.name),
            });
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let row = row_res?;

        let map: HashMap<&str, &Field> = row
            .get_column_iter()
            .map(|(name, field)| (name.as_str(), field))
            .collect();

        let mut out_row: Vec<Value> = Vec::with_capacity(schema.len());
        for f in &schema.fields {
            let v = map.get(f.name.as_str()).ok_or_else(|| IngestionError::SchemaMismatch {
                message: format!("row {row_num} missing required column '{}'", f.name),
            })?;
            out_row.push(convert_parquet_field(row_num, &f.name, f.data_type, v)?);
        }
        rows.push(out_row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn parquet_top_level_columns<R: ChunkReader + 'static>(
    reader: &SerializedFileReader<R>,
) -> HashSet<String> {
    reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .root_schema()
        .get_fields()
        .iter()
        .map(|t| t.name().to_string())
        .collect()
}

fn convert_parquet_field(
    row: usize,
    column: &str,
    data_type: DataType,
    f: &Field,
) -> IngestionResult<Value> {
    if matches!(f, Field::Null) {
        return Ok(Value::Null);
    }

    let mismatch = |message: &str| IngestionError::ParseError {
        row,
        column: column.to_string(),
        raw: f.to_string(),
        message: message.to_string(),
    };

    match data_type {
        DataType::Utf8 => match f {
            Field::Str(s) => Ok(Value::Utf8(s.clone())),
            Field::Bytes(b) => Ok(Value::Utf8(String::from_utf8_lossy(b.data()).into_owned())),
            other => Ok(Value::Utf8(other.to_string())),
        },
        DataType::Bool => match f {
            Field::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(mismatch("expected bool")),
        },
        DataType::Int64 => match f {
            Field::Byte(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Short(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Int(v) => Ok(Value::Int64(i64::from(*v))),
            Field::Long(v) => Ok(Value::Int64(*v)),
            Field::UByte(v) => Ok(Value::Int64(i64::from(*v))),
            Field::UShort(v) => Ok(Value::Int64(i64::from(*v))),
            Field::UInt(v) => Ok(Value::Int64(i64::from(*v))),
            Field::ULong(v) => i64::try_from(*v)
                .map(Value::Int64)
                .map_err(|_| mismatch("u64 out of range for i64")),
            _ => Err(mismatch("expected integer")),
        },
        DataType::Float64 => match f {
            Field::Float(v) => Ok(Value::Float64(f64::from(*v))),
            Field::Double(v) => Ok(Value::Float64(*v)),
            _ => Err(mismatch("expected number")),
        },
    }
}
