//! Templated narrative insights for a single country.
//!
//! A report is built from a headline, a fixed caveat, an ordered table of
//! optional clauses keyed on the columns the dataset carries, and a closing
//! policy line.

use itertools::Itertools;
use statrs::statistics::Statistics;
use tracing::debug;

use crate::dataset::{log_fallback, validate, DemoFallback, FallbackProvider, Validation};
use crate::forecast::rows_by_year;
use crate::models::{
    format_number, numeric, round_to, Dataset, InsightReport, Row, COUNTRY, GINI,
    LIFE_EXPECTANCY, UNEMPLOYMENT,
};

pub const REQUIRED_COLUMNS: [&str; 2] = [COUNTRY, GINI];

const CAVEAT: &str = "If GDP rises while Gini worsens, growth may be unequal—pair with unemployment and literacy context.";
const POLICY: &str =
    "Policy ideas: social protection, progressive taxation, equitable education access.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Rising,
    Falling,
}

impl TrendDirection {
    /// Rising only when the mean successive difference is strictly positive.
    /// A flat series, or one with fewer than two observations, counts as falling.
    pub fn from_series(values: &[Option<f64>]) -> Self {
        let diffs: Vec<f64> = values
            .iter()
            .tuple_windows()
            .filter_map(|(prev, next)| Some((*next)? - (*prev)?))
            .collect();

        if diffs.mean() > 0.0 {
            TrendDirection::Rising
        } else {
            TrendDirection::Falling
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
        }
    }
}

/// An optional line, emitted when `applies` holds for the dataset.
struct Clause {
    applies: fn(&Dataset) -> bool,
    render: fn(&[&Row]) -> String,
}

// Evaluated in order; each clause appears at most once.
const CLAUSES: &[Clause] = &[
    Clause {
        applies: has_unemployment,
        render: unemployment_line,
    },
    Clause {
        applies: has_life_expectancy,
        render: life_expectancy_line,
    },
];

fn has_unemployment(dataset: &Dataset) -> bool {
    dataset.has_column(UNEMPLOYMENT)
}

fn unemployment_line(rows: &[&Row]) -> String {
    format!(
        "Unemployment averages ~ {}%. Consider targeted job creation.",
        column_mean(rows, UNEMPLOYMENT, 2)
    )
}

fn has_life_expectancy(dataset: &Dataset) -> bool {
    dataset.has_column(LIFE_EXPECTANCY)
}

fn life_expectancy_line(rows: &[&Row]) -> String {
    format!(
        "Life expectancy averages ~ {} years. Public health correlates with lower inequality.",
        column_mean(rows, LIFE_EXPECTANCY, 1)
    )
}

fn column_mean(rows: &[&Row], column: &str, digits: i32) -> String {
    let values: Vec<f64> = rows.iter().filter_map(|row| numeric(row, column)).collect();
    if values.is_empty() {
        return "n/a".to_string();
    }
    format_number(round_to(values.mean(), digits))
}

/// Narrative insights for `country`, using the demo fallback for absent datasets.
pub fn narrate(dataset: Option<&Dataset>, country: &str) -> InsightReport {
    narrate_with(dataset, country, &DemoFallback)
}

pub fn narrate_with(
    dataset: Option<&Dataset>,
    country: &str,
    fallback: &dyn FallbackProvider,
) -> InsightReport {
    let dataset = match validate(dataset, &REQUIRED_COLUMNS) {
        Validation::Valid(dataset) => dataset,
        Validation::Absent(reason) => {
            log_fallback("insights", reason, fallback);
            return fallback.insights(country);
        }
    };

    let rows = rows_by_year(dataset, country);
    let gini: Vec<Option<f64>> = rows.iter().map(|row| numeric(row, GINI)).collect();
    let observed: Vec<f64> = gini.iter().flatten().copied().collect();

    if observed.is_empty() {
        debug!(country, rows = rows.len(), "No Gini observations for country");
        return InsightReport::from(vec![format!(
            "No data for {}. Please upload a dataset including this country.",
            country
        )]);
    }

    let gini_avg = round_to(observed.mean(), 2);
    let trend = TrendDirection::from_series(&gini);

    let mut lines = vec![
        format!(
            "{}: Average Gini ≈ {} with a {} tendency.",
            country,
            format_number(gini_avg),
            trend.as_str()
        ),
        CAVEAT.to_string(),
    ];
    lines.extend(
        CLAUSES
            .iter()
            .filter(|clause| (clause.applies)(dataset))
            .map(|clause| (clause.render)(&rows)),
    );
    lines.push(POLICY.to_string());

    InsightReport::from(lines)
}
