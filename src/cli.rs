//! CLI argument definitions using clap
//!
//! The command implementations live in the `commands` module.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use inequality_explorer::config::{MAX_YEAR, MIN_YEAR};
use inequality_explorer::filters::CONTINENTS;

/// Inequality Explorer - country inequality statistics, trends and insights
#[derive(Parser)]
#[command(name = "inequality")]
#[command(about = "Explore Gini, unemployment and life expectancy by country", long_about = None)]
#[command(version)]
pub struct Cli {
    /// CSV dataset with at least country, year and gini columns.
    ///
    /// Without a dataset every command answers from the fallback provider.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// TOML config file (forecast window/steps, fallback mode, default filters)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the countries available for selection
    Countries,

    /// Gini average/min/max per country
    Stats {
        /// Country to include (repeatable); defaults to the first two available
        #[arg(short, long = "country")]
        countries: Vec<String>,
    },

    /// Gini series and naive moving-average forecast for one country
    Trend {
        /// Country to analyze; defaults to the first available
        #[arg(short, long)]
        country: Option<String>,

        /// Moving average window (overrides config)
        #[arg(long)]
        window: Option<usize>,

        /// Number of forecast points (overrides config)
        #[arg(long)]
        steps: Option<usize>,

        /// Write a PNG line chart to this path
        #[arg(long)]
        chart: Option<PathBuf>,
    },

    /// Narrative insights for one country
    Insights {
        /// Country to analyze; defaults to the first available
        #[arg(short, long)]
        country: Option<String>,
    },

    /// Headline indicator averages for the selected filters
    Kpis {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Write a plain-text summary of filters, KPIs and notes
    Export {
        /// Summary output path
        #[arg(short, long)]
        out: PathBuf,

        /// Free-text notes appended to the summary
        #[arg(long, default_value = "")]
        notes: String,

        /// Also write the statistics table for these countries as CSV
        #[arg(long)]
        stats_csv: Option<PathBuf>,

        /// Countries for the statistics CSV (repeatable)
        #[arg(long = "stats-country")]
        stats_countries: Vec<String>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Observation year (2010-2025)
    #[arg(long, value_parser = clap::value_parser!(i64).range(MIN_YEAR..=MAX_YEAR))]
    pub year: Option<i64>,

    /// Continent, or All
    #[arg(long, value_parser = PossibleValuesParser::new(CONTINENTS))]
    pub continent: Option<String>,

    /// Restrict to a single country
    #[arg(long)]
    pub country: Option<String>,
}
