use super::categorical::CategoricalAccumulator;
use super::date::DateAccumulator;
use super::numeric::NumericAccumulator;
use super::trait_::ColumnAccumulator;
use crate::error::{AccumulatorError, AccumulatorResult};
use crate::report;
use indexmap::IndexMap;
use sheet_insights_config::{AccumulatorConfig, ColumnPolicy};
use sheet_insights_types::{ChunkStats, FinalStatistics};
use tracing::{debug, warn};

/// Merges per-chunk statistics into one summary for a whole file
///
/// One instance belongs to one file analysis. Chunks are merged in arrival
/// order; raw rows are never seen, only each chunk's summary. The column
/// list is fixed by the first chunk that reports one.
///
/// # Examples
///
/// ```
/// use processor::aggregation::ChunkStatsAccumulator;
/// use sheet_insights_types::{ChunkStats, NumericChunkStats};
///
/// let mut acc = ChunkStatsAccumulator::with_defaults();
/// acc.add_chunk_stats(
///     &ChunkStats::new(10, ["Hours"])
///         .with_numeric("Hours", NumericChunkStats::new(100.0, 10.0, 2.0, 5.0, 15.0, 0)),
/// )
/// .unwrap();
///
/// let stats = acc.final_statistics();
/// assert_eq!(stats.total_rows, 10);
/// assert_eq!(stats.numeric_summary["Hours"].mean, 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct ChunkStatsAccumulator {
    config: AccumulatorConfig,
    total_rows: u64,
    columns: Vec<String>,
    numeric: IndexMap<String, NumericAccumulator>,
    categorical: IndexMap<String, CategoricalAccumulator>,
    dates: IndexMap<String, DateAccumulator>,
    chunks_seen: u64,
    column_mismatches: u64,
}

impl ChunkStatsAccumulator {
    pub fn new(config: AccumulatorConfig) -> Self {
        Self {
            config,
            total_rows: 0,
            columns: Vec::new(),
            numeric: IndexMap::new(),
            categorical: IndexMap::new(),
            dates: IndexMap::new(),
            chunks_seen: 0,
            column_mismatches: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(AccumulatorConfig::default())
    }

    /// Merge one chunk's statistics.
    ///
    /// Sections absent from the chunk contribute nothing. The only failure is
    /// a column mismatch under [`ColumnPolicy::Strict`], in which case the
    /// state is left untouched.
    ///
    /// The column list is taken from the first chunk that reports a
    /// non-empty one, not strictly from the first call: a leading chunk with
    /// no columns neither fixes the list nor counts as a mismatch.
    pub fn add_chunk_stats(&mut self, chunk: &ChunkStats) -> AccumulatorResult<()> {
        let chunk_number = self.chunks_seen + 1;

        if self.is_column_mismatch(chunk) {
            match self.config.column_policy {
                ColumnPolicy::Strict => {
                    return Err(AccumulatorError::ColumnMismatch {
                        chunk: chunk_number,
                        expected: self.columns.clone(),
                        actual: chunk.columns.clone(),
                    });
                }
                ColumnPolicy::Lenient => {
                    warn!(
                        chunk = chunk_number,
                        expected = ?self.columns,
                        actual = ?chunk.columns,
                        "chunk columns differ from the first chunk, merging anyway"
                    );
                    self.column_mismatches += 1;
                }
            }
        }

        self.total_rows += chunk.rows;
        if self.columns.is_empty() {
            self.columns = chunk.columns.clone();
        }

        let mode = self.config.variance_mode;
        merge_section(&mut self.numeric, &chunk.numeric_stats, chunk.rows, || {
            NumericAccumulator::new(mode)
        });

        let top_n = self.config.report_top_values;
        merge_section(
            &mut self.categorical,
            &chunk.categorical_stats,
            chunk.rows,
            || CategoricalAccumulator::new(top_n),
        );

        merge_section(&mut self.dates, &chunk.date_stats, chunk.rows, DateAccumulator::new);

        self.chunks_seen = chunk_number;
        debug!(
            chunk = chunk_number,
            rows = chunk.rows,
            total_rows = self.total_rows,
            "merged chunk statistics"
        );

        Ok(())
    }

    /// Fix the column list before any chunk arrives, e.g. from a file's
    /// header row. No effect once a list is set.
    pub fn seed_columns(&mut self, columns: &[String]) {
        if self.columns.is_empty() {
            self.columns = columns.to_vec();
        }
    }

    fn is_column_mismatch(&self, chunk: &ChunkStats) -> bool {
        !self.columns.is_empty() && !chunk.columns.is_empty() && self.columns != chunk.columns
    }

    /// Presentation statistics for everything merged so far. Does not mutate.
    pub fn final_statistics(&self) -> FinalStatistics {
        FinalStatistics {
            total_rows: self.total_rows,
            total_columns: self.columns.len(),
            columns: self.columns.clone(),
            numeric_summary: summarize_section(&self.numeric, self.total_rows),
            categorical_summary: summarize_section(&self.categorical, self.total_rows),
            date_summary: summarize_section(&self.dates, self.total_rows),
        }
    }

    /// Text report over [`final_statistics`](Self::final_statistics)
    pub fn generate_report(&self, file_name: &str) -> String {
        report::generate_report(file_name, &self.final_statistics())
    }

    pub fn total_rows(&self) -> u64 {
        self.total_rows
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn chunks_seen(&self) -> u64 {
        self.chunks_seen
    }

    /// Chunks merged despite reporting different columns (lenient policy)
    pub fn column_mismatches(&self) -> u64 {
        self.column_mismatches
    }

    pub fn numeric_column(&self, name: &str) -> Option<&NumericAccumulator> {
        self.numeric.get(name)
    }

    pub fn categorical_column(&self, name: &str) -> Option<&CategoricalAccumulator> {
        self.categorical.get(name)
    }

    pub fn date_column(&self, name: &str) -> Option<&DateAccumulator> {
        self.dates.get(name)
    }

    pub fn config(&self) -> &AccumulatorConfig {
        &self.config
    }
}

fn merge_section<A, F>(
    accumulators: &mut IndexMap<String, A>,
    chunk_section: &IndexMap<String, A::Chunk>,
    chunk_rows: u64,
    make: F,
) where
    A: ColumnAccumulator,
    F: Fn() -> A,
{
    for (column, stats) in chunk_section {
        accumulators
            .entry(column.clone())
            .or_insert_with(&make)
            .merge_chunk(stats, chunk_rows);
    }
}

fn summarize_section<A: ColumnAccumulator>(
    accumulators: &IndexMap<String, A>,
    total_rows: u64,
) -> IndexMap<String, A::Summary> {
    accumulators
        .iter()
        .map(|(column, acc)| (column.clone(), acc.summarize(total_rows)))
        .collect()
}
