//! Merge command - combine chunk statistics produced elsewhere
//!
//! Input is JSON lines, one chunk statistics object per line, read from a
//! file or from stdin when the path is `-`.

use super::MergeOptions;
use crate::{output::write_outcome, CliResult};
use clap::Args;
use processor::FileAnalyzer;
use sheet_insights_config::InsightsConfig;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct MergeCommand {
    /// JSON lines file with chunk statistics, `-` for stdin
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// File name shown in the report (defaults to the input's name)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    #[command(flatten)]
    pub merge: MergeOptions,
}

impl MergeCommand {
    pub fn execute(&self, mut config: InsightsConfig, out: &mut dyn Write) -> CliResult<()> {
        self.merge.apply(&mut config);
        config.validate()?;

        let analyzer = FileAnalyzer::new(config);
        let name = self.report_name();
        info!(input = %self.input.display(), name = %name, "merging chunk statistics");

        let outcome = if self.reads_stdin() {
            analyzer.merge_json_lines(&name, io::stdin().lock())?
        } else {
            let file = File::open(&self.input)?;
            analyzer.merge_json_lines(&name, BufReader::new(file))?
        };

        write_outcome(out, &outcome, self.merge.format)
    }

    fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }

    fn report_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        if self.reads_stdin() {
            return "stdin".to_string();
        }
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}
