//! Naive trend forecast and the per-country trend view built on it.
//!
//! The forecast repeats the most recent trailing moving average. It is a
//! placeholder model and is kept flat on purpose; other models plug in through
//! [`Forecaster`].

use ndarray::ArrayView1;
use serde::Serialize;
use tracing::debug;

use crate::dataset::{validate, Validation};
use crate::models::{numeric, round_to, Dataset, ForecastResult, Row, Value, COUNTRY, GINI, YEAR};

pub const DEFAULT_WINDOW: usize = 3;
pub const DEFAULT_STEPS: usize = 3;

pub const TREND_COLUMNS: [&str; 3] = [COUNTRY, YEAR, GINI];

pub const TREND_UNAVAILABLE: &str =
    "Upload a CSV with columns: country, year, gini to enable interactive trends.";

/// A forecasting strategy over a time-ordered series.
pub trait Forecaster: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns `steps` values, or an empty result when the series is too short.
    fn forecast(&self, series: &[f64], window: usize, steps: usize) -> ForecastResult;
}

/// Flat-line extrapolation of the last trailing simple moving average.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovingAverageForecaster;

impl Forecaster for MovingAverageForecaster {
    fn name(&self) -> &'static str {
        "moving-average"
    }

    /// # Panics
    /// Panics if `window` is 0.
    fn forecast(&self, series: &[f64], window: usize, steps: usize) -> ForecastResult {
        assert!(window > 0, "forecast window must be > 0");

        if series.len() < window {
            debug!(len = series.len(), window, "Series shorter than forecast window");
            return ForecastResult::insufficient();
        }

        // Windows touching a gap (NaN) have no defined average.
        let last = ArrayView1::from(series)
            .windows(window)
            .into_iter()
            .filter_map(|w| w.mean())
            .filter(|m| !m.is_nan())
            .last();

        match last {
            Some(average) => ForecastResult::from(vec![round_to(average, 2); steps]),
            None => ForecastResult::insufficient(),
        }
    }
}

/// Forecast `steps` values from `series` with the moving-average placeholder.
pub fn forecast(series: &[f64], window: usize, steps: usize) -> ForecastResult {
    MovingAverageForecaster.forecast(series, window, steps)
}

/// Observed Gini series of one country plus its forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendView {
    Unavailable {
        message: String,
    },
    Ready {
        country: String,
        points: Vec<(i64, f64)>,
        forecast: ForecastResult,
    },
}

impl TrendView {
    pub fn forecast(&self) -> Option<&ForecastResult> {
        match self {
            TrendView::Ready { forecast, .. } => Some(forecast),
            TrendView::Unavailable { .. } => None,
        }
    }
}

/// Rows of `country` ordered by year. Rows without a year sort last, ties keep dataset order.
pub fn rows_by_year<'a>(dataset: &'a Dataset, country: &'a str) -> Vec<&'a Row> {
    let mut rows: Vec<&Row> = dataset.rows_for(country).collect();
    rows.sort_by_key(|row| match row.get(YEAR).and_then(Value::as_i64) {
        Some(year) => (0, year),
        None => (1, 0),
    });
    rows
}

pub fn country_trend(
    dataset: Option<&Dataset>,
    country: &str,
    forecaster: &dyn Forecaster,
    window: usize,
    steps: usize,
) -> TrendView {
    let dataset = match validate(dataset, &TREND_COLUMNS) {
        Validation::Valid(dataset) => dataset,
        Validation::Absent(reason) => {
            debug!(reason = %reason, "Trend view unavailable");
            return TrendView::Unavailable {
                message: TREND_UNAVAILABLE.to_string(),
            };
        }
    };

    let rows = rows_by_year(dataset, country);
    let points: Vec<(i64, f64)> = rows
        .iter()
        .filter_map(|row| {
            let year = row.get(YEAR).and_then(Value::as_i64)?;
            let gini = numeric(row, GINI)?;
            Some((year, gini))
        })
        .collect();

    // Missing observations stay in the series as gaps so windows do not span them.
    let series: Vec<f64> = rows
        .iter()
        .map(|row| numeric(row, GINI).unwrap_or(f64::NAN))
        .collect();
    let forecast = forecaster.forecast(&series, window, steps);
    debug!(
        country,
        forecaster = forecaster.name(),
        points = points.len(),
        forecast = forecast.len(),
        "Built trend view"
    );

    TrendView::Ready {
        country: country.to_string(),
        points,
        forecast,
    }
}
