//! Inequality Explorer CLI
//!
//! Usage:
//!   inequality --data data.csv countries          List selectable countries
//!   inequality --data data.csv stats -c Kenya     Gini statistics per country
//!   inequality --data data.csv trend -c Kenya     Series and naive forecast
//!   inequality --data data.csv insights -c Kenya  Narrative insights
//!   inequality kpis --year 2021                   Headline indicators
//!   inequality export --out summary.txt           Printable summary

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::Session;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let session = Session::open(cli.data.as_deref(), cli.config.as_deref(), cli.json)?;

    match cli.command {
        Commands::Countries => commands::cmd_countries(&session),
        Commands::Stats { countries } => commands::cmd_stats(&session, &countries),
        Commands::Trend {
            country,
            window,
            steps,
            chart,
        } => commands::cmd_trend(
            &session,
            country.as_deref(),
            window,
            steps,
            chart.as_deref(),
        ),
        Commands::Insights { country } => commands::cmd_insights(&session, country.as_deref()),
        Commands::Kpis { filters } => commands::cmd_kpis(&session, &filters),
        Commands::Export {
            out,
            notes,
            stats_csv,
            stats_countries,
            filters,
        } => commands::cmd_export(
            &session,
            &out,
            &notes,
            stats_csv.as_deref(),
            &stats_countries,
            &filters,
        ),
    }
}
