//! Dataset shape validation and the fallback providers used when a dataset
//! cannot serve an operation.

use std::fmt;

use tracing::debug;

use crate::kpi::KpiSummary;
use crate::models::{CountryStat, Dataset, InsightReport};

/// Outcome of checking a dataset against the columns an operation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Validation<'a> {
    Valid(&'a Dataset),
    Absent(AbsentReason<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentReason<'a> {
    NoDataset,
    MissingColumn(&'a str),
}

impl fmt::Display for AbsentReason<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsentReason::NoDataset => f.write_str("no dataset provided"),
            AbsentReason::MissingColumn(column) => write!(f, "missing column '{}'", column),
        }
    }
}

impl<'a> Validation<'a> {
    pub fn dataset(self) -> Option<&'a Dataset> {
        match self {
            Validation::Valid(dataset) => Some(dataset),
            Validation::Absent(_) => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Validation::Absent(_))
    }
}

/// Check that `dataset` exists and carries every column in `required`.
/// Never fails; callers branch on [`Validation::Absent`].
pub fn validate<'a>(dataset: Option<&'a Dataset>, required: &[&'a str]) -> Validation<'a> {
    let Some(dataset) = dataset else {
        return Validation::Absent(AbsentReason::NoDataset);
    };
    match required.iter().find(|column| !dataset.has_column(column)) {
        Some(column) => Validation::Absent(AbsentReason::MissingColumn(*column)),
        None => Validation::Valid(dataset),
    }
}

/// Substitute results handed out when validation reports an absent dataset.
pub trait FallbackProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Statistics table returned in place of a real aggregation.
    fn country_stats(&self, requested: &[String]) -> Vec<CountryStat>;

    /// Narrative returned in place of a real analysis of `country`.
    fn insights(&self, country: &str) -> InsightReport;

    fn kpis(&self) -> KpiSummary;
}

/// Canned demo values, reproduced verbatim from the original dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoFallback;

impl FallbackProvider for DemoFallback {
    fn name(&self) -> &'static str {
        "demo"
    }

    fn country_stats(&self, _requested: &[String]) -> Vec<CountryStat> {
        vec![
            CountryStat {
                country_name: "China".to_string(),
                average: Some(26.33),
                min: Some(23.22),
                max: Some(27.39),
            },
            CountryStat {
                country_name: "United States".to_string(),
                average: Some(25.16),
                min: Some(23.22),
                max: Some(26.02),
            },
        ]
    }

    fn insights(&self, country: &str) -> InsightReport {
        InsightReport::from(vec![
            format!("{}: Overall inequality appears moderate.", country),
            "Recommendation: Strengthen education and employment; track GDP vs. Gini.".to_string(),
        ])
    }

    fn kpis(&self) -> KpiSummary {
        KpiSummary {
            gini: Some(23.23),
            unemployment: Some(7.78),
            life_expectancy: Some(73.0),
            literacy: Some(86.65),
            gdp: Some(19_010.0),
            population: Some(38_180_000.0),
        }
    }
}

/// Honest empty state: one `n/a` row per requested country and a single
/// no-data line instead of invented numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFallback;

impl FallbackProvider for EmptyFallback {
    fn name(&self) -> &'static str {
        "empty"
    }

    fn country_stats(&self, requested: &[String]) -> Vec<CountryStat> {
        requested.iter().map(CountryStat::empty).collect()
    }

    fn insights(&self, country: &str) -> InsightReport {
        InsightReport::from(vec![format!(
            "No data for {}. Please upload a dataset including this country.",
            country
        )])
    }

    fn kpis(&self) -> KpiSummary {
        KpiSummary::default()
    }
}

pub(crate) fn log_fallback(operation: &str, reason: AbsentReason<'_>, provider: &dyn FallbackProvider) {
    debug!(
        operation,
        reason = %reason,
        fallback = provider.name(),
        "Dataset absent, using fallback"
    );
}
