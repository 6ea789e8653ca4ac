use kyva_analytics::ingestion::csv::{load_csv_from_path, load_csv_from_reader, CsvOptions};
use kyva_analytics::types::{DataType, Field, Schema, Value};

fn people_schema() -> Schema {
    Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("name", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("active", DataType::Bool),
    ])
}

fn load_str(input: &str) -> kyva_analytics::IngestionResult<kyva_analytics::types::DataSet> {
    let opts = CsvOptions::default();
    let mut rdr = opts.reader_builder().from_reader(input.as_bytes());
    load_csv_from_reader(&mut rdr, &opts)
}

#[test]
fn load_csv_from_path_sniffs_types() {
    let ds = load_csv_from_path("tests/fixtures/people.csv", &CsvOptions::default()).unwrap();

    assert_eq!(ds.schema, people_schema());
    assert_eq!(ds.row_count(), 2);
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Int64(1),
            Value::Utf8("Ada".to_string()),
            Value::Float64(98.5),
            Value::Bool(true),
        ]
    );
    assert_eq!(ds.rows[1][2], Value::Null);
}

#[test]
fn na_tokens_load_as_null_and_do_not_block_numeric_types() {
    let ds = load_str("visits,ratio\n3,NA\nN/A,0.5\n,nan\n").unwrap();
    assert_eq!(ds.schema.fields[0].data_type, DataType::Int64);
    assert_eq!(ds.schema.fields[1].data_type, DataType::Float64);
    assert_eq!(ds.null_count(0), 2);
    assert_eq!(ds.null_count(1), 2);
}

#[test]
fn mixed_columns_fall_back_to_text() {
    let ds = load_str("code\n10\nA7\n").unwrap();
    assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
    assert_eq!(ds.rows[0][0], Value::Utf8("10".to_string()));
}

#[test]
fn duplicate_and_blank_headers_are_renamed() {
    let ds = load_str("name,,name\nx,y,z\n").unwrap();
    assert_eq!(ds.column_names(), vec!["name", "Unnamed: 1", "name.1"]);
}

#[test]
fn header_only_file_has_columns_but_no_rows() {
    let ds = load_str("a,b\n").unwrap();
    assert_eq!(ds.row_count(), 0);
    assert_eq!(ds.column_count(), 2);
}

#[test]
fn empty_input_is_an_error() {
    let err = load_str("").unwrap_err();
    assert!(err.to_string().contains("no columns to parse"));
}

#[test]
fn short_rows_are_padded_with_nulls() {
    let ds = load_str("a,b\n1,2\n3\n").unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.schema.fields[1].data_type, DataType::Int64);
    assert_eq!(ds.rows[1], vec![Value::Int64(3), Value::Null]);
}

#[test]
fn rows_wider_than_the_header_are_an_error() {
    let err = load_str("a,b\n1,2\n3,4,5\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "malformed csv: expected 2 fields in line 3, saw 3"
    );
}

#[test]
fn bool_columns_accept_only_true_and_false() {
    let ds = load_str("flag\ntrue\nFALSE\n").unwrap();
    assert_eq!(ds.rows[1][0], Value::Bool(false));

    let ds = load_str("flag\ntrue\nyes\n").unwrap();
    assert_eq!(ds.schema.fields[0].data_type, DataType::Utf8);
}

#[test]
fn semicolon_delimiter_is_configurable() {
    let opts = CsvOptions {
        delimiter: b';',
        ..Default::default()
    };
    let mut rdr = opts.reader_builder().from_reader("a;b\n1;2\n".as_bytes());
    let ds = load_csv_from_reader(&mut rdr, &opts).unwrap();
    assert_eq!(ds.column_names(), vec!["a", "b"]);
    assert_eq!(ds.rows[0], vec![Value::Int64(1), Value::Int64(2)]);
}
