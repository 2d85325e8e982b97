//! Inequality Explorer analytics engine
//!
//! Turns a country/year table of socio-economic indicators into:
//! - per-country Gini statistics ([`aggregate`])
//! - a naive moving-average trend forecast ([`forecast`])
//! - templated narrative insights ([`narrate`])
//!
//! Engine calls are pure functions of an in-memory [`Dataset`]. When the
//! dataset is missing or lacks the columns an operation needs, a
//! [`FallbackProvider`] answers instead of an error.

pub mod chart;
pub mod config;
pub mod country_stats;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filters;
pub mod forecast;
pub mod insights;
pub mod kpi;
pub mod load_clean;
pub mod models;

pub use config::{Config, FallbackMode};
pub use country_stats::{aggregate, aggregate_with};
pub use dataset::{validate, AbsentReason, DemoFallback, EmptyFallback, FallbackProvider, Validation};
pub use error::{Error, Result};
pub use filters::{country_options, Filters};
pub use forecast::{country_trend, forecast, Forecaster, MovingAverageForecaster, TrendView};
pub use insights::{narrate, narrate_with, TrendDirection};
pub use kpi::{kpis, kpis_with, KpiSummary};
pub use load_clean::{load_csv, load_optional, load_reader};
pub use models::{CountryStat, Dataset, ForecastResult, InsightReport, Row, Value};
