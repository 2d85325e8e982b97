use std::fs;
use std::path::Path;

use chrono::NaiveDateTime;
use csv::WriterBuilder;
use tracing::info;

use crate::error::Result;
use crate::models::CountryStat;

pub const SUMMARY_TITLE: &str = "Inequality Explorer Summary";

/// Everything that goes into the printable summary.
#[derive(Debug, Clone)]
pub struct SummaryInput {
    pub generated: NaiveDateTime,
    pub filters: Vec<(String, String)>,
    pub kpis: Vec<(String, String)>,
    pub notes: String,
}

pub fn render_summary(input: &SummaryInput) -> String {
    let mut out = format!(
        "{}\nGenerated: {}\n",
        SUMMARY_TITLE,
        input.generated.format("%Y-%m-%d %H:%M")
    );

    for (heading, pairs) in [("Filters", &input.filters), ("KPIs", &input.kpis)] {
        out.push_str(&format!("\n{}\n", heading));
        for (key, value) in pairs {
            out.push_str(&format!("- {}: {}\n", key, value));
        }
    }

    out.push_str("\nNotes\n");
    for line in input.notes.lines() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn write_summary(output_file: impl AsRef<Path>, input: &SummaryInput) -> Result<()> {
    let output_file = output_file.as_ref();
    fs::write(output_file, render_summary(input))?;
    info!(path = %output_file.display(), "Summary saved");
    Ok(())
}

// Statistics table as CSV; null statistics become empty cells
pub fn write_stats_csv(output_file: impl AsRef<Path>, stats: &[CountryStat]) -> Result<()> {
    let output_file = output_file.as_ref();
    let mut wtr = WriterBuilder::new().has_headers(true).from_path(output_file)?;

    for stat in stats {
        wtr.serialize(stat)?;
    }

    wtr.flush()?;
    info!(path = %output_file.display(), rows = stats.len(), "Statistics saved");
    Ok(())
}
