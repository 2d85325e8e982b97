use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{Dataset, Row, Value};

// Cell spellings treated as missing observations.
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "-"];

// Load and clean a CSV file into a dataset
pub fn load_csv(file_path: impl AsRef<Path>) -> Result<Dataset> {
    let file_path = file_path.as_ref();
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(file_path)?;

    let dataset = read_dataset(reader)?;
    info!(
        path = %file_path.display(),
        rows = dataset.len(),
        columns = dataset.columns().len(),
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Same as [`load_csv`] over any reader, mostly for in-memory CSV text.
pub fn load_reader<R: io::Read>(source: R) -> Result<Dataset> {
    let reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    read_dataset(reader)
}

/// `None` when no file was provided; the engine treats that as an absent dataset.
pub fn load_optional(file_path: Option<&Path>) -> Result<Option<Dataset>> {
    match file_path {
        Some(path) => load_csv(path).map(Some),
        None => {
            debug!("No dataset provided");
            Ok(None)
        }
    }
}

fn read_dataset<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut dataset = Dataset::new(headers.clone());
    for record in reader.records() {
        let record = record?;
        dataset.push_row(clean_record(&headers, &record));
    }
    Ok(dataset)
}

// Pad short rows with missing cells, drop cells beyond the header
fn clean_record(headers: &[String], record: &StringRecord) -> Row {
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let value = record.get(i).map(parse_cell).unwrap_or(Value::Missing);
            (header.clone(), value)
        })
        .collect()
}

pub(crate) fn parse_cell(raw: &str) -> Value {
    let raw = raw.trim();
    if MISSING_MARKERS.contains(&raw.to_ascii_lowercase().as_str()) {
        return Value::Missing;
    }
    if let Ok(v) = raw.parse::<i64>() {
        return Value::Int(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Value::Float(v),
        Ok(_) => Value::Missing,
        Err(_) => Value::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{numeric, COUNTRY, GINI, YEAR};

    #[test]
    fn parse_cell_infers_scalar_types() {
        assert_eq!(parse_cell("2021"), Value::Int(2021));
        assert_eq!(parse_cell("31.5"), Value::Float(31.5));
        assert_eq!(parse_cell(" Kenya "), Value::Text("Kenya".into()));
        assert_eq!(parse_cell(""), Value::Missing);
        assert_eq!(parse_cell("NaN"), Value::Missing);
        assert_eq!(parse_cell("N/A"), Value::Missing);
    }

    #[test]
    fn non_finite_numbers_are_missing() {
        assert_eq!(parse_cell("inf"), Value::Missing);
        assert_eq!(parse_cell("-Infinity"), Value::Missing);
        assert_eq!(parse_cell("1e400"), Value::Missing);
        assert_eq!(parse_cell("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn ragged_rows_are_padded_with_missing() {
        let csv = "country,year,gini\nKenya,2019,40.8\nKenya,2020\n";
        let dataset = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1].get(GINI), Some(&Value::Missing));
        assert_eq!(numeric(&dataset.rows()[0], GINI), Some(40.8));
    }

    #[test]
    fn headers_become_columns_even_without_rows() {
        let dataset = load_reader("country,year,gini\n".as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert!(dataset.has_column(COUNTRY));
        assert!(dataset.has_column(YEAR));
    }

    #[test]
    fn load_optional_without_path_is_absent() {
        assert!(load_optional(None).unwrap().is_none());
    }

    #[test]
    fn load_csv_reports_missing_file() {
        let err = load_csv("/definitely/not/here.csv").unwrap_err();
        assert!(err.to_string().contains("CSV error"));
    }
}
