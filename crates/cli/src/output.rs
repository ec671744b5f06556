//! Output rendering

use crate::CliResult;
use clap::ValueEnum;
use colored::Colorize;
use processor::AnalysisOutcome;
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Text,
    /// Final statistics as JSON
    Json,
}

/// Write an analysis outcome to `out`
pub fn write_outcome(
    out: &mut dyn Write,
    outcome: &AnalysisOutcome,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Text => {
            writeln!(out, "{}", outcome.report)?;
            writeln!(out)?;
            writeln!(
                out,
                "{} {} rows in {} chunk(s)",
                "Analyzed".green().bold(),
                outcome.statistics.total_rows,
                outcome.chunks_processed
            )?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcome)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
