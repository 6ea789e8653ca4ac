//! CSV loading with type sniffing.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Cell contents treated as missing values (after trimming).
pub const DEFAULT_NULL_VALUES: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "-NaN", "nan", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Options controlling CSV reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Cell values (compared after trimming) that load as [`Value::Null`].
    pub null_values: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CsvOptions {
    /// A reader builder configured with these options. CSV must have headers.
    ///
    /// The reader is flexible: record width is checked by [`load_csv_from_reader`], which
    /// accepts short rows and rejects rows wider than the header.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter);
        builder
    }

    fn is_null(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        trimmed.is_empty() || self.null_values.iter().any(|n| n == trimmed)
    }
}

/// Load a CSV file into a [`DataSet`], inferring the schema from its contents.
///
/// The whole file is read into memory. Every non-null cell of a column takes part in type
/// sniffing (see [`infer_column_type`]). Header cells are normalised by [`normalize_headers`].
/// Rows with fewer cells than the header are padded with nulls; a row with more cells is an
/// [`IngestionError::MalformedRow`].
pub fn load_csv_from_path(path: impl AsRef<Path>, opts: &CsvOptions) -> IngestionResult<DataSet> {
    let mut rdr = opts.reader_builder().from_path(path)?;
    load_csv_from_reader(&mut rdr, opts)
}

/// Load CSV data with schema inference from an existing CSV reader.
pub fn load_csv_from_reader<R: Read>(
    rdr: &mut csv::Reader<R>,
    opts: &CsvOptions,
) -> IngestionResult<DataSet> {
    let headers = normalize_headers(rdr.headers()?);
    if headers.is_empty() {
        return Err(IngestionError::SchemaMismatch {
            message: "no columns to parse from file".to_string(),
        });
    }

    let records = rdr.records().collect::<Result<Vec<_>, _>>()?;
    for record in &records {
        if record.len() > headers.len() {
            return Err(IngestionError::MalformedRow {
                line: record.position().map_or(0, |p| p.line()),
                expected: headers.len(),
                found: record.len(),
            });
        }
    }

    let fields = headers
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let column = records.iter().map(|r| r.get(idx).unwrap_or(""));
            Field::new(name, infer_column_type(column, opts))
        })
        .collect();
    let schema = Schema::new(fields);

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());
    for (row_idx0, record) in records.iter().enumerate() {
        let user_row = row_idx0 + 2;
        let mut row = Vec::with_capacity(schema.len());
        for (idx, field) in schema.fields.iter().enumerate() {
            let raw = record.get(idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw, opts)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema, rows))
}

/// Turn raw header cells into unique column names.
///
/// Blank headers become `Unnamed: <idx>`; repeated names get `.1`, `.2`, ... suffixes.
pub fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut out = Vec::with_capacity(headers.len());
    for (idx, raw) in headers.iter().enumerate() {
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            raw.to_owned()
        };
        let mut name = base.clone();
        let mut n = 0;
        while taken.contains(&name) {
            n += 1;
            name = format!("{base}.{n}");
        }
        taken.insert(name.clone());
        out.push(name);
    }
    out
}

/// Sniff the narrowest type that fits every non-null cell of a column.
///
/// Order of preference: Int64, Float64, Bool (`true`/`false`, any case), Utf8.
/// A column with no non-null cells is Utf8.
pub fn infer_column_type<'a>(
    cells: impl IntoIterator<Item = &'a str>,
    opts: &CsvOptions,
) -> DataType {
    let mut seen = false;
    let mut int = true;
    let mut float = true;
    let mut boolean = true;

    for raw in cells {
        if opts.is_null(raw) {
            continue;
        }
        seen = true;
        let trimmed = raw.trim();
        if int && trimmed.parse::<i64>().is_err() {
            int = false;
        }
        if float && trimmed.parse::<f64>().is_err() {
            float = false;
        }
        if boolean && parse_bool(trimmed).is_none() {
            boolean = false;
        }
        if !(int || float || boolean) {
            break;
        }
    }

    match (seen, int, float, boolean) {
        (false, ..) => DataType::Utf8,
        (true, true, _, _) => DataType::Int64,
        (true, false, true, _) => DataType::Float64,
        (true, false, false, true) => DataType::Bool,
        _ => DataType::Utf8,
    }
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
    opts: &CsvOptions,
) -> IngestionResult<Value> {
    if opts.is_null(raw) {
        return Ok(Value::Null);
    }
    let trimmed = raw.trim();

    let parse_error = |message: String| IngestionError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Bool => parse_bool(trimmed)
            .map(Value::Bool)
            .ok_or_else(|| parse_error("expected bool (true/false)".to_string())),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
