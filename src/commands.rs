//! Command implementations for the CLI

use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use inequality_explorer::export::{write_stats_csv, write_summary, SummaryInput};
use inequality_explorer::filters::{ANALYSIS_DEFAULTS, COMPARE_DEFAULTS};
use inequality_explorer::{
    aggregate_with, chart, country_options, country_trend, kpis_with, load_optional,
    narrate_with, Config, CountryStat, Dataset, FallbackProvider, Filters, Forecaster,
    MovingAverageForecaster, TrendView,
};

use crate::cli::FilterArgs;

/// Dataset, configuration and output mode shared by every command.
pub struct Session {
    pub dataset: Option<Dataset>,
    pub config: Config,
    pub fallback: Box<dyn FallbackProvider>,
    pub forecaster: Box<dyn Forecaster>,
    pub json: bool,
}

impl Session {
    pub fn open(data: Option<&Path>, config: Option<&Path>, json: bool) -> Result<Self> {
        let config = Config::load(config).context("Failed to load config")?;
        let dataset = load_optional(data)
            .with_context(|| format!("Failed to load dataset {:?}", data))?;
        let fallback = config.fallback.provider();
        debug!(fallback = config.fallback.as_str(), "Session ready");

        Ok(Self {
            dataset,
            config,
            fallback,
            forecaster: Box::new(MovingAverageForecaster),
            json,
        })
    }

    fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    fn filters(&self, args: &FilterArgs) -> Filters {
        Filters {
            year: args.year.or(self.config.default_year),
            continent: args
                .continent
                .clone()
                .or_else(|| self.config.default_continent.clone()),
            country: args.country.clone(),
        }
    }

    /// Filtered copy of the dataset; an absent dataset stays absent.
    fn filtered(&self, filters: &Filters) -> Option<Dataset> {
        self.dataset().map(|dataset| filters.apply(dataset))
    }

    /// The requested country, or the first selectable one.
    fn country_or_default(&self, country: Option<&str>) -> String {
        match country {
            Some(country) => country.to_string(),
            None => country_options(self.dataset(), &ANALYSIS_DEFAULTS)
                .into_iter()
                .next()
                .unwrap_or_else(|| ANALYSIS_DEFAULTS[0].to_string()),
        }
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

pub fn cmd_countries(session: &Session) -> Result<()> {
    let countries = country_options(session.dataset(), &COMPARE_DEFAULTS);
    if session.json {
        return session.print_json(&countries);
    }
    for country in countries {
        println!("{}", country);
    }
    Ok(())
}

pub fn cmd_stats(session: &Session, countries: &[String]) -> Result<()> {
    let countries = if countries.is_empty() {
        country_options(session.dataset(), &COMPARE_DEFAULTS)
            .into_iter()
            .take(2)
            .collect()
    } else {
        countries.to_vec()
    };

    let stats = aggregate_with(session.dataset(), &countries, session.fallback.as_ref());
    if session.json {
        return session.print_json(&stats);
    }
    print_stats_table(&stats);
    Ok(())
}

fn print_stats_table(stats: &[CountryStat]) {
    println!("{:<24} {:>8} {:>8} {:>8}", "country_name", "Average", "Min", "Max");
    for stat in stats {
        println!("{}", stat);
    }
}

pub fn cmd_trend(
    session: &Session,
    country: Option<&str>,
    window: Option<usize>,
    steps: Option<usize>,
    chart_path: Option<&Path>,
) -> Result<()> {
    let window = window.unwrap_or(session.config.window);
    let steps = steps.unwrap_or(session.config.steps);
    if window == 0 {
        anyhow::bail!("--window must be at least 1");
    }

    let country = session.country_or_default(country);
    let view = country_trend(
        session.dataset(),
        &country,
        session.forecaster.as_ref(),
        window,
        steps,
    );

    if let Some(path) = chart_path {
        chart::render_trend_chart(&view, path)
            .with_context(|| format!("Failed to render chart to {}", path.display()))?;
    }

    if session.json {
        return session.print_json(&view);
    }

    match &view {
        TrendView::Unavailable { message } => println!("{}", message),
        TrendView::Ready {
            country,
            points,
            forecast,
        } => {
            println!("Gini trend for {}", country);
            for (year, gini) in points {
                println!("  {}  {}", year, gini);
            }
            println!();
            println!("Forecast (naive moving average, window {})", window);
            println!("Projected Gini (next {}): {}", steps, forecast);
        }
    }
    Ok(())
}

pub fn cmd_insights(session: &Session, country: Option<&str>) -> Result<()> {
    let country = session.country_or_default(country);
    let report = narrate_with(session.dataset(), &country, session.fallback.as_ref());
    if session.json {
        return session.print_json(&report);
    }
    print!("{}", report);
    Ok(())
}

pub fn cmd_kpis(session: &Session, args: &FilterArgs) -> Result<()> {
    let filters = session.filters(args);
    let filtered = session.filtered(&filters);
    let summary = kpis_with(filtered.as_ref(), session.fallback.as_ref());

    if session.json {
        return session.print_json(&summary);
    }
    println!("Key Indicators");
    for (label, value) in summary.entries() {
        println!("  {:<18} {}", label, value);
    }
    Ok(())
}

pub fn cmd_export(
    session: &Session,
    out: &Path,
    notes: &str,
    stats_csv: Option<&Path>,
    stats_countries: &[String],
    args: &FilterArgs,
) -> Result<()> {
    let filters = session.filters(args);
    let filtered = session.filtered(&filters);
    let summary = kpis_with(filtered.as_ref(), session.fallback.as_ref());

    let input = SummaryInput {
        generated: Local::now().naive_local(),
        filters: filters.describe(),
        kpis: summary
            .entries()
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect(),
        notes: notes.to_string(),
    };
    write_summary(out, &input)
        .with_context(|| format!("Failed to write summary to {}", out.display()))?;
    println!("Summary saved to {}", out.display());

    if let Some(path) = stats_csv {
        let countries = if stats_countries.is_empty() {
            country_options(session.dataset(), &COMPARE_DEFAULTS)
        } else {
            stats_countries.to_vec()
        };
        let stats = aggregate_with(session.dataset(), &countries, session.fallback.as_ref());
        write_stats_csv(path, &stats)
            .with_context(|| format!("Failed to write statistics to {}", path.display()))?;
        info!(
            countries = countries.len(),
            with_data = stats.iter().filter(|s| s.has_data()).count(),
            "Exported statistics"
        );
        println!("Statistics saved to {}", path.display());
    }
    Ok(())
}
