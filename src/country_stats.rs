use ndarray::Array1;
use ndarray_stats::QuantileExt;

use crate::dataset::{log_fallback, validate, DemoFallback, FallbackProvider, Validation};
use crate::models::{numeric, round_to, CountryStat, Dataset, COUNTRY, GINI};

pub const REQUIRED_COLUMNS: [&str; 2] = [COUNTRY, GINI];

/// Per-country mean/min/max of the Gini coefficient, one entry per requested
/// country in request order. Absent datasets get the demo table.
pub fn aggregate(dataset: Option<&Dataset>, countries: &[String]) -> Vec<CountryStat> {
    aggregate_with(dataset, countries, &DemoFallback)
}

pub fn aggregate_with(
    dataset: Option<&Dataset>,
    countries: &[String],
    fallback: &dyn FallbackProvider,
) -> Vec<CountryStat> {
    let dataset = match validate(dataset, &REQUIRED_COLUMNS) {
        Validation::Valid(dataset) => dataset,
        Validation::Absent(reason) => {
            log_fallback("country_stats", reason, fallback);
            return fallback.country_stats(countries);
        }
    };

    countries
        .iter()
        .map(|country| country_stat(dataset, country))
        .collect()
}

fn country_stat(dataset: &Dataset, country: &str) -> CountryStat {
    let gini: Array1<f64> = dataset
        .rows_for(country)
        .filter_map(|row| numeric(row, GINI))
        .collect();

    if gini.is_empty() {
        return CountryStat::empty(country);
    }

    CountryStat {
        country_name: country.to_string(),
        average: gini.mean().map(|v| round_to(v, 2)),
        min: gini.min().ok().map(|v| round_to(*v, 2)),
        max: gini.max().ok().map(|v| round_to(*v, 2)),
    }
}
