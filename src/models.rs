use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const COUNTRY: &str = "country";
pub const YEAR: &str = "year";
pub const GINI: &str = "gini";
pub const UNEMPLOYMENT: &str = "unemployment";
pub const LIFE_EXPECTANCY: &str = "life_expectancy";
pub const CONTINENT: &str = "continent";
pub const LITERACY: &str = "literacy";
pub const GDP: &str = "gdp";
pub const POPULATION: &str = "population";

/// A single cell of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Missing,
}

impl Value {
    /// Numeric view of the cell. NaN floats read as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) if !v.is_nan() => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Float(v) if v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    /// Text view of the cell; numbers are rendered so that `"2021"` and `2021` compare equal.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(v.to_string()),
            Value::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

pub type Row = HashMap<String, Value>;

/// Ordered table of rows keyed by column name. No schema is enforced here;
/// each operation checks for the columns it needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a dataset from rows, collecting columns in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            let mut keys: Vec<&String> = row.keys().collect();
            keys.sort();
            for key in keys {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: Row) {
        for key in row.keys() {
            if !self.columns.contains(key) {
                self.columns.push(key.clone());
            }
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose `country` cell equals `country`.
    pub fn rows_for<'a>(&'a self, country: &'a str) -> impl Iterator<Item = &'a Row> + 'a {
        self.rows
            .iter()
            .filter(move |row| text(row, COUNTRY).as_deref() == Some(country))
    }

    /// New dataset holding clones of the rows accepted by `keep`. Columns are preserved.
    pub fn filter<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(&Row) -> bool,
    {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }
}

/// Numeric value of `column` in `row`, if present and numeric.
pub fn numeric(row: &Row, column: &str) -> Option<f64> {
    row.get(column).and_then(Value::as_f64)
}

pub fn text(row: &Row, column: &str) -> Option<String> {
    row.get(column).and_then(Value::as_text)
}

/// Per-country descriptive statistics of the Gini coefficient.
/// `None` means the country had no observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryStat {
    pub country_name: String,
    #[serde(rename = "Average")]
    pub average: Option<f64>,
    #[serde(rename = "Min")]
    pub min: Option<f64>,
    #[serde(rename = "Max")]
    pub max: Option<f64>,
}

impl CountryStat {
    pub fn empty(country_name: impl Into<String>) -> Self {
        Self {
            country_name: country_name.into(),
            average: None,
            min: None,
            max: None,
        }
    }

    pub fn has_data(&self) -> bool {
        self.average.is_some()
    }
}

impl fmt::Display for CountryStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} {:>8} {:>8} {:>8}",
            self.country_name,
            format_optional(self.average),
            format_optional(self.min),
            format_optional(self.max)
        )
    }
}

/// Flat forecast values. An empty result means there was not enough data.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ForecastResult(Vec<f64>);

impl ForecastResult {
    pub fn insufficient() -> Self {
        Self(Vec::new())
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<f64>> for ForecastResult {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl fmt::Display for ForecastResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("Not enough data");
        }
        let parts: Vec<String> = self.0.iter().map(|v| format_number(*v)).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Ordered narrative lines: headline first, context next, policy last.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct InsightReport(Vec<String>);

impl InsightReport {
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for InsightReport {
    fn from(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl fmt::Display for InsightReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.0 {
            writeln!(f, "- {}", line)?;
        }
        Ok(())
    }
}

/// Round to `digits` decimal places, ties to even (`30.125` becomes `30.12`).
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round_ties_even() / factor
}

/// Shortest decimal form, keeping one decimal for integral values (`31.0`, not `31`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "n/a".to_string())
}
