//! File analysis driver
//!
//! Wires the pieces together for one file: [`CsvChunkReader`] →
//! [`ChunkAnalyzer`] → [`ChunkStatsAccumulator`] → report. Each call builds
//! its own accumulator and analyzer session, so one `FileAnalyzer` can serve
//! any number of sequential analyses. The column list comes from the header
//! row, so a file without data rows still reports its columns.

use crate::aggregation::ChunkStatsAccumulator;
use crate::analyzer::ChunkAnalyzer;
use crate::error::{ProcessorError, Result};
use crate::reader::{CsvChunkReader, ReaderOptions};
use serde::{Deserialize, Serialize};
use sheet_insights_config::InsightsConfig;
use sheet_insights_types::{ChunkStats, FinalStatistics};
use std::io::{BufRead, Read};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Result of analyzing one file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisOutcome {
    pub file_name: String,
    pub chunks_processed: u64,
    pub statistics: FinalStatistics,
    pub report: String,
}

/// Runs chunked analyses with a fixed configuration
#[derive(Debug, Clone)]
pub struct FileAnalyzer {
    config: InsightsConfig,
    analyzer: ChunkAnalyzer,
}

impl FileAnalyzer {
    pub fn new(config: InsightsConfig) -> Self {
        let analyzer = ChunkAnalyzer::new(&config.analysis);
        Self { config, analyzer }
    }

    pub fn with_defaults() -> Self {
        Self::new(InsightsConfig::default())
    }

    pub fn config(&self) -> &InsightsConfig {
        &self.config
    }

    /// Analyze a delimited file on disk
    pub fn analyze_path(&self, path: impl AsRef<Path>) -> Result<AnalysisOutcome> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let reader = CsvChunkReader::from_path(path, self.reader_options())?;
        self.run(&file_name, reader)
    }

    /// Analyze delimited data from any reader
    pub fn analyze_reader<R: Read>(&self, file_name: &str, input: R) -> Result<AnalysisOutcome> {
        let reader = CsvChunkReader::from_reader(input, self.reader_options())?;
        self.run(file_name, reader)
    }

    /// Merge chunk statistics computed elsewhere
    pub fn merge_chunk_stats<I>(&self, file_name: &str, chunks: I) -> Result<AnalysisOutcome>
    where
        I: IntoIterator<Item = ChunkStats>,
    {
        let mut accumulator = self.accumulator();
        for chunk in chunks {
            accumulator.add_chunk_stats(&chunk)?;
        }
        Ok(self.finish(file_name, &accumulator))
    }

    /// Merge chunk statistics given as JSON lines, one [`ChunkStats`] per line.
    ///
    /// Blank lines are skipped. A line that does not parse rejects the whole
    /// run with its 1-based line number.
    pub fn merge_json_lines<R: BufRead>(
        &self,
        file_name: &str,
        input: R,
    ) -> Result<AnalysisOutcome> {
        let mut accumulator = self.accumulator();
        for (index, line) in input.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let chunk: ChunkStats =
                serde_json::from_str(&line).map_err(|e| ProcessorError::InvalidChunk {
                    line: index + 1,
                    reason: e.to_string(),
                })?;
            accumulator.add_chunk_stats(&chunk)?;
        }
        Ok(self.finish(file_name, &accumulator))
    }

    fn run<R: Read>(&self, file_name: &str, reader: CsvChunkReader<R>) -> Result<AnalysisOutcome> {
        let started = Instant::now();
        info!(
            file = file_name,
            columns = reader.headers().len(),
            chunk_size = self.config.analysis.chunk_size,
            "starting chunked analysis"
        );

        let mut accumulator = self.accumulator();
        accumulator.seed_columns(reader.headers());
        let mut session = self.analyzer.session();
        for chunk in reader {
            let chunk = chunk?;
            let stats = session.analyze(&chunk);
            debug!(
                chunk = chunk.index,
                rows = stats.rows,
                numeric = stats.numeric_stats.len(),
                categorical = stats.categorical_stats.len(),
                dates = stats.date_stats.len(),
                "analyzed chunk"
            );
            accumulator.add_chunk_stats(&stats)?;
        }

        let outcome = self.finish(file_name, &accumulator);
        info!(
            file = file_name,
            rows = outcome.statistics.total_rows,
            chunks = outcome.chunks_processed,
            column_mismatches = accumulator.column_mismatches(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "finished chunked analysis"
        );
        Ok(outcome)
    }

    fn accumulator(&self) -> ChunkStatsAccumulator {
        ChunkStatsAccumulator::new(self.config.accumulator.clone())
    }

    fn reader_options(&self) -> ReaderOptions {
        ReaderOptions {
            chunk_size: self.config.analysis.chunk_size,
            delimiter: self.config.analysis.delimiter_byte(),
        }
    }

    fn finish(&self, file_name: &str, accumulator: &ChunkStatsAccumulator) -> AnalysisOutcome {
        let statistics = accumulator.final_statistics();
        let report = crate::report::generate_report(file_name, &statistics);
        AnalysisOutcome {
            file_name: file_name.to_string(),
            chunks_processed: accumulator.chunks_seen(),
            statistics,
            report,
        }
    }
}
