//! Dataset ingestion.
//!
//! Turns the two supported inputs into a polars [`DataFrame`]:
//! - uploaded CSV content ([`load_csv_bytes`])
//! - a single inline key/value record ([`dataset_from_record`])
//!
//! The rest of the engine only ever sees the resulting `DataFrame`.

use crate::error::{QualityError, Result};
use crate::utils::string_values;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Cursor;
use tracing::{debug, warn};

/// Cell markers read as missing in addition to empty fields.
pub const MISSING_MARKERS: [&str; 6] = ["NA", "N/A", "NaN", "null", "NULL", "None"];

/// A value of an inline record.
///
/// Integers are tried before floats so `10` stays an integer column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordValue {
    Int(i64),
    Float(f64),
    String(String),
}

impl RecordValue {
    fn to_series(&self, name: &str) -> Series {
        match self {
            RecordValue::Int(v) => Series::new(name.into(), &[*v]),
            RecordValue::Float(v) => Series::new(name.into(), &[*v]),
            RecordValue::String(v) => Series::new(name.into(), &[v.as_str()]),
        }
    }
}

/// Build a single-row dataset from an inline record.
///
/// An empty record yields a dataset with no columns.
pub fn dataset_from_record(record: &BTreeMap<String, RecordValue>) -> Result<DataFrame> {
    let columns: Vec<Column> = record
        .iter()
        .map(|(name, value)| Column::from(value.to_series(name)))
        .collect();

    let df = DataFrame::new(columns)
        .map_err(|e| QualityError::Validation(format!("Invalid record: {}", e)))?;
    debug!("Record dataset built: {:?}", df.shape());
    Ok(df)
}

/// Reject uploads that are not CSV files.
pub fn validate_csv_filename(filename: &str) -> Result<()> {
    if filename.to_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        warn!("Rejected upload '{}': not a .csv file", filename);
        Err(QualityError::Validation(format!(
            "Unsupported file '{}': please upload a .csv file",
            filename
        )))
    }
}

/// Parse uploaded CSV content into a dataset.
///
/// The first line must be a header. Schema inference scans every row so the
/// numeric/categorical split never depends on where a value happens to sit.
/// A header-only file is valid and yields zero rows.
pub fn load_csv_bytes(filename: &str, bytes: &[u8]) -> Result<DataFrame> {
    validate_csv_filename(filename)?;

    if bytes.is_empty() {
        return Err(QualityError::EmptyUpload(filename.to_string()));
    }

    let content = std::str::from_utf8(bytes).map_err(|e| {
        QualityError::Validation(format!("File '{}' is not valid UTF-8: {}", filename, e))
    })?;

    if content.trim().is_empty() {
        return Err(QualityError::EmptyUpload(filename.to_string()));
    }

    let null_values = NullValues::AllColumns(
        MISSING_MARKERS
            .iter()
            .map(|marker| (*marker).into())
            .collect(),
    );

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .into_reader_with_file_handle(Cursor::new(content.as_bytes().to_vec()))
        .finish()
        .map_err(|e| {
            warn!("Could not parse '{}': {}", filename, e);
            QualityError::Validation(format!("Could not parse CSV '{}': {}", filename, e))
        })?;

    let duplicates = duplicate_headers(content.as_bytes()).map_err(|e| {
        QualityError::Validation(format!("Could not read header of '{}': {}", filename, e))
    })?;
    if !duplicates.is_empty() {
        warn!("Rejected '{}': duplicate columns {:?}", filename, duplicates);
        return Err(QualityError::Validation(format!(
            "File '{}' has duplicate column names: {}",
            filename,
            duplicates.join(", ")
        )));
    }

    debug!("Loaded '{}': {:?}", filename, df.shape());
    Ok(df)
}

/// Header names that occur more than once, in order of first repetition.
///
/// The polars reader renames repeated headers, so the raw header row is
/// read on its own to see the names as written.
fn duplicate_headers(bytes: &[u8]) -> PolarsResult<Vec<String>> {
    let header = CsvReadOptions::default()
        .with_has_header(false)
        .with_n_rows(Some(1))
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for column in header.get_columns() {
        for name in string_values(column.as_materialized_series())?.into_iter().flatten() {
            if !seen.insert(name.clone()) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
    }
    Ok(duplicates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_value_deserialization() {
        let record: BTreeMap<String, RecordValue> =
            serde_json::from_str(r#"{"a": 10, "b": 2.5, "c": "x"}"#).unwrap();
        assert_eq!(record["a"], RecordValue::Int(10));
        assert_eq!(record["b"], RecordValue::Float(2.5));
        assert_eq!(record["c"], RecordValue::String("x".to_string()));
    }

    #[test]
    fn test_record_rejects_unsupported_values() {
        let result: std::result::Result<BTreeMap<String, RecordValue>, _> =
            serde_json::from_str(r#"{"a": [1, 2]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_dataset_from_record() {
        let record = BTreeMap::from([
            ("feature1".to_string(), RecordValue::Int(10)),
            ("feature2".to_string(), RecordValue::Float(20.5)),
            ("label".to_string(), RecordValue::String("yes".to_string())),
        ]);

        let df = dataset_from_record(&record).unwrap();
        assert_eq!(df.shape(), (1, 3));
        assert_eq!(df.column("feature1").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("feature2").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("label").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_dataset_from_empty_record() {
        let df = dataset_from_record(&BTreeMap::new()).unwrap();
        assert_eq!(df.width(), 0);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_load_csv_bytes_infers_types_and_missing() {
        let csv = b"age,city\n10,A\n,B\n30,NA\n";
        let df = load_csv_bytes("people.csv", csv).unwrap();

        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("age").unwrap().null_count(), 1);
        assert_eq!(df.column("city").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_csv_bytes_header_only() {
        let df = load_csv_bytes("empty.csv", b"a,b,c\n").unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_load_csv_bytes_rejects_wrong_extension() {
        let err = load_csv_bytes("data.xlsx", b"a\n1\n").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_load_csv_bytes_rejects_empty_content() {
        assert_eq!(
            load_csv_bytes("data.csv", b"").unwrap_err().error_code(),
            "EMPTY_UPLOAD"
        );
        assert_eq!(
            load_csv_bytes("data.csv", b"  \n\n").unwrap_err().error_code(),
            "EMPTY_UPLOAD"
        );
    }

    #[test]
    fn test_load_csv_bytes_rejects_invalid_utf8() {
        let err = load_csv_bytes("data.csv", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_load_csv_bytes_rejects_duplicate_headers() {
        let err = load_csv_bytes("dup.csv", b"a,a,b\n1,2,3\n4,5,6\n").unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("duplicate column names: a"));
    }

    #[test]
    fn test_load_csv_bytes_quoted_header_names() {
        let df = load_csv_bytes("quoted.csv", b"\"a,b\",c\n1,2\n").unwrap();
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_validate_csv_filename_is_case_insensitive() {
        assert!(validate_csv_filename("DATA.CSV").is_ok());
        assert!(validate_csv_filename("notes.txt").is_err());
    }
}
