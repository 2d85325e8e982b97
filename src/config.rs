//! Explorer configuration
//!
//! Loaded from an optional TOML file and layered over built-in defaults:
//!
//! ```toml
//! [forecast]
//! window = 3
//! steps = 3
//!
//! [fallback]
//! mode = "demo"   # or "empty"
//!
//! [filters]
//! year = 2021
//! continent = "All"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::dataset::{DemoFallback, EmptyFallback, FallbackProvider};
use crate::error::{Error, Result};
use crate::forecast::{DEFAULT_STEPS, DEFAULT_WINDOW};

pub const MIN_YEAR: i64 = 2010;
pub const MAX_YEAR: i64 = 2025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackMode {
    #[default]
    Demo,
    Empty,
}

impl FallbackMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackMode::Demo => "demo",
            FallbackMode::Empty => "empty",
        }
    }

    pub fn provider(&self) -> Box<dyn FallbackProvider> {
        match self {
            FallbackMode::Demo => Box::new(DemoFallback),
            FallbackMode::Empty => Box::new(EmptyFallback),
        }
    }
}

impl std::str::FromStr for FallbackMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "demo" => Ok(FallbackMode::Demo),
            "empty" => Ok(FallbackMode::Empty),
            other => Err(Error::InvalidData(format!(
                "Unknown fallback mode '{}' (expected demo or empty)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub window: usize,
    pub steps: usize,
    pub fallback: FallbackMode,
    /// Filters applied when the command line leaves them unset.
    pub default_year: Option<i64>,
    pub default_continent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            steps: DEFAULT_STEPS,
            fallback: FallbackMode::Demo,
            default_year: None,
            default_continent: None,
        }
    }
}

impl Config {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                debug!(path = %path.display(), "Loaded config");
                parse_config(&content)
            }
            None => Ok(Self::default()),
        }
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    forecast: Option<RawForecast>,
    fallback: Option<RawFallback>,
    filters: Option<RawFilters>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawForecast {
    window: Option<usize>,
    steps: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFallback {
    mode: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFilters {
    year: Option<i64>,
    continent: Option<String>,
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = Config::default();

    if let Some(forecast) = raw.forecast {
        if let Some(window) = forecast.window {
            if window == 0 {
                return Err(Error::InvalidData(
                    "forecast.window must be at least 1".to_string(),
                ));
            }
            config.window = window;
        }
        if let Some(steps) = forecast.steps {
            config.steps = steps;
        }
    }

    if let Some(mode) = raw.fallback.and_then(|f| f.mode) {
        config.fallback = mode.parse()?;
    }

    if let Some(filters) = raw.filters {
        if let Some(year) = filters.year {
            if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
                return Err(Error::InvalidData(format!(
                    "filters.year must be between {} and {}",
                    MIN_YEAR, MAX_YEAR
                )));
            }
            config.default_year = Some(year);
        }
        config.default_continent = filters.continent;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse_config(
            r#"
            [forecast]
            window = 5

            [fallback]
            mode = "empty"

            [filters]
            year = 2015
            continent = "Asia"
            "#,
        )
        .unwrap();

        assert_eq!(config.window, 5);
        assert_eq!(config.steps, DEFAULT_STEPS);
        assert_eq!(config.fallback, FallbackMode::Empty);
        assert_eq!(config.default_year, Some(2015));
        assert_eq!(config.default_continent.as_deref(), Some("Asia"));
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = parse_config("[forecast]\nwindow = 0\n").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn unknown_fallback_mode_is_rejected() {
        assert!(parse_config("[fallback]\nmode = \"magic\"\n").is_err());
    }

    #[test]
    fn year_outside_slider_range_is_rejected() {
        assert!(parse_config("[filters]\nyear = 1990\n").is_err());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = parse_config("[forecast\nwindow = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[forecast]\nsteps = 4").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.steps, 4);
        assert_eq!(Config::load(None).unwrap(), Config::default());
    }

    #[test]
    fn fallback_mode_selects_provider() {
        assert_eq!(FallbackMode::Demo.provider().name(), "demo");
        assert_eq!(FallbackMode::Empty.provider().name(), "empty");
    }
}
