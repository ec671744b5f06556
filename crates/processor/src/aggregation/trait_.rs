use serde::Serialize;
use std::fmt::Debug;

/// Core trait for per-column chunk accumulators
///
/// Each implementation folds one column's per-chunk statistics into a running
/// state and can derive a presentation summary from that state at any time:
/// - Incremental merges (one chunk at a time, in arrival order)
/// - Non-mutating finalization
pub trait ColumnAccumulator: Send + Sync + Debug {
    /// Per-chunk statistics this accumulator consumes
    type Chunk;

    /// Finalized, serializable summary
    type Summary: Clone + Serialize;

    /// Fold one chunk's statistics for this column.
    ///
    /// `chunk_rows` is the total row count of the chunk, including rows where
    /// this column is missing.
    fn merge_chunk(&mut self, chunk: &Self::Chunk, chunk_rows: u64);

    /// Derive the summary; `total_rows` is the row count across all chunks
    fn summarize(&self, total_rows: u64) -> Self::Summary;
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Percentage of `total_rows` that were missing, rounded to one decimal and
/// bounded to `[0, 100]`. Zero when no rows were seen.
pub fn missing_pct(missing: u64, total_rows: u64) -> f64 {
    if total_rows == 0 {
        return 0.0;
    }
    round_to(missing as f64 / total_rows as f64 * 100.0, 1).clamp(0.0, 100.0)
}
