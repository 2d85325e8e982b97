use itertools::Itertools;
use tracing::debug;

use crate::models::{text, Dataset, Value, CONTINENT, COUNTRY, YEAR};

pub const ALL: &str = "All";

pub const CONTINENTS: [&str; 6] = [ALL, "Africa", "America", "Asia", "Europe", "Oceania"];

/// Selector defaults used when the dataset cannot list its countries.
pub const COMPARE_DEFAULTS: [&str; 2] = ["United States", "China"];
pub const ANALYSIS_DEFAULTS: [&str; 1] = ["Afghanistan"];

/// Sidebar-style selection. `None`, `"All"` and empty strings mean no restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub year: Option<i64>,
    pub continent: Option<String>,
    pub country: Option<String>,
}

impl Filters {
    fn continent(&self) -> Option<&str> {
        self.continent
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL))
    }

    fn country(&self) -> Option<&str> {
        self.country.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Rows matching every active criterion. A criterion whose column the
    /// dataset lacks is skipped.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        let year = self.year.filter(|_| dataset.has_column(YEAR));
        let continent = self.continent().filter(|_| dataset.has_column(CONTINENT));
        let country = self.country().filter(|_| dataset.has_column(COUNTRY));

        let filtered = dataset.filter(|row| {
            year.map_or(true, |y| row.get(YEAR).and_then(Value::as_i64) == Some(y))
                && continent.map_or(true, |c| text(row, CONTINENT).as_deref() == Some(c))
                && country.map_or(true, |c| text(row, COUNTRY).as_deref() == Some(c))
        });
        debug!(
            ?year,
            ?continent,
            ?country,
            before = dataset.len(),
            after = filtered.len(),
            "Applied filters"
        );
        filtered
    }

    /// Ordered label/value pairs for reports.
    pub fn describe(&self) -> Vec<(String, String)> {
        vec![
            (
                "Year".to_string(),
                self.year.map(|y| y.to_string()).unwrap_or_else(|| ALL.to_string()),
            ),
            (
                "Continent".to_string(),
                self.continent().unwrap_or(ALL).to_string(),
            ),
            ("Country".to_string(), self.country().unwrap_or(ALL).to_string()),
        ]
    }
}

/// Sorted unique countries, or `defaults` when the dataset cannot provide them.
pub fn country_options(dataset: Option<&Dataset>, defaults: &[&str]) -> Vec<String> {
    match dataset.filter(|d| d.has_column(COUNTRY)) {
        Some(dataset) => dataset
            .rows()
            .iter()
            .filter_map(|row| text(row, COUNTRY))
            .unique()
            .sorted()
            .collect(),
        None => defaults.iter().map(|c| c.to_string()).collect(),
    }
}
