//! Analyze command - chunked statistics for a delimited file

use super::MergeOptions;
use crate::{output::write_outcome, CliError, CliResult};
use clap::Args;
use processor::FileAnalyzer;
use sheet_insights_config::InsightsConfig;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct AnalyzeCommand {
    /// Delimited file to analyze
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Rows per chunk
    #[arg(long, value_name = "ROWS")]
    pub chunk_size: Option<usize>,

    /// Field delimiter
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    #[command(flatten)]
    pub merge: MergeOptions,
}

impl AnalyzeCommand {
    pub fn execute(&self, mut config: InsightsConfig, out: &mut dyn Write) -> CliResult<()> {
        if !self.path.is_file() {
            return Err(CliError::InvalidArgument(format!(
                "'{}' is not a readable file",
                self.path.display()
            )));
        }

        if let Some(size) = self.chunk_size {
            config.analysis.chunk_size = size;
        }
        if let Some(delimiter) = self.delimiter {
            config.analysis.delimiter = delimiter;
        }
        self.merge.apply(&mut config);
        config.validate()?;

        info!(path = %self.path.display(), "analyzing file");
        let outcome = FileAnalyzer::new(config).analyze_path(&self.path)?;
        write_outcome(out, &outcome, self.merge.format)
    }
}
