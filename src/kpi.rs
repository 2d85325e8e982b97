use serde::Serialize;
use statrs::statistics::Statistics;

use crate::dataset::{log_fallback, validate, DemoFallback, FallbackProvider, Validation};
use crate::models::{
    format_number, numeric, round_to, Dataset, GDP, GINI, LIFE_EXPECTANCY, LITERACY, POPULATION,
    UNEMPLOYMENT,
};

/// Headline indicator averages over a (filtered) dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    pub gini: Option<f64>,
    pub unemployment: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub literacy: Option<f64>,
    pub gdp: Option<f64>,
    pub population: Option<f64>,
}

impl KpiSummary {
    /// Display label and rendered value for each indicator, in card order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Avg Gini", render(self.gini, |v| format_number(round_to(v, 2)))),
            ("Unemployment (%)", render(self.unemployment, |v| format_number(round_to(v, 2)))),
            ("Life Expectancy", render(self.life_expectancy, |v| format!("{} yrs", v.round()))),
            ("Literacy Rate", render(self.literacy, |v| format!("{}%", format_number(round_to(v, 2))))),
            ("GDP", render(self.gdp, |v| format!("${}", compact(v)))),
            ("Population", render(self.population, compact)),
        ]
    }
}

fn render(value: Option<f64>, show: impl Fn(f64) -> String) -> String {
    value.map(show).unwrap_or_else(|| "n/a".to_string())
}

/// Compact magnitude: `19.01K`, `38.18M`, `1.2B`.
pub fn compact(value: f64) -> String {
    let (scaled, suffix) = match value.abs() {
        v if v >= 1e9 => (value / 1e9, "B"),
        v if v >= 1e6 => (value / 1e6, "M"),
        v if v >= 1e3 => (value / 1e3, "K"),
        _ => (value, ""),
    };
    format!("{}{}", round_to(scaled, 2), suffix)
}

fn column_mean(dataset: &Dataset, column: &str) -> Option<f64> {
    if !dataset.has_column(column) {
        return None;
    }
    let values: Vec<f64> = dataset
        .rows()
        .iter()
        .filter_map(|row| numeric(row, column))
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(round_to(values.mean(), 2))
    }
}

pub fn kpis(dataset: Option<&Dataset>) -> KpiSummary {
    kpis_with(dataset, &DemoFallback)
}

pub fn kpis_with(dataset: Option<&Dataset>, fallback: &dyn FallbackProvider) -> KpiSummary {
    let dataset = match validate(dataset, &[GINI]) {
        Validation::Valid(dataset) => dataset,
        Validation::Absent(reason) => {
            log_fallback("kpis", reason, fallback);
            return fallback.kpis();
        }
    };

    KpiSummary {
        gini: column_mean(dataset, GINI),
        unemployment: column_mean(dataset, UNEMPLOYMENT),
        life_expectancy: column_mean(dataset, LIFE_EXPECTANCY),
        literacy: column_mean(dataset, LITERACY),
        gdp: column_mean(dataset, GDP),
        population: column_mean(dataset, POPULATION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Row, Value};

    #[test]
    fn demo_cards_match_dashboard() {
        let entries = kpis(None).entries();
        let rendered: Vec<&str> = entries.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(
            rendered,
            vec!["23.23", "7.78", "73 yrs", "86.65%", "$19.01K", "38.18M"]
        );
    }

    #[test]
    fn compact_suffixes() {
        assert_eq!(compact(950.0), "950");
        assert_eq!(compact(19_010.0), "19.01K");
        assert_eq!(compact(38_180_000.0), "38.18M");
        assert_eq!(compact(1_200_000_000.0), "1.2B");
    }

    #[test]
    fn means_only_for_present_columns() {
        let mut a = Row::new();
        a.insert(GINI.to_string(), Value::Float(30.0));
        a.insert(GDP.to_string(), Value::Int(1000));
        let mut b = Row::new();
        b.insert(GINI.to_string(), Value::Float(35.0));
        b.insert(GDP.to_string(), Value::Missing);
        let summary = kpis(Some(&Dataset::from_rows(vec![a, b])));

        assert_eq!(summary.gini, Some(32.5));
        assert_eq!(summary.gdp, Some(1000.0));
        assert_eq!(summary.unemployment, None);
        assert_eq!(summary.entries()[1].1, "n/a");
    }

    #[test]
    fn nan_cells_are_left_out_of_means() {
        let mut a = Row::new();
        a.insert(GINI.to_string(), Value::Float(f64::NAN));
        a.insert(LITERACY.to_string(), Value::Float(f64::NAN));
        let mut b = Row::new();
        b.insert(GINI.to_string(), Value::Float(40.0));
        b.insert(LITERACY.to_string(), Value::Missing);
        let summary = kpis(Some(&Dataset::from_rows(vec![a, b])));

        assert_eq!(summary.gini, Some(40.0));
        assert_eq!(summary.literacy, None);
    }
}
