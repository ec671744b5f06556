use super::trait_::{missing_pct, ColumnAccumulator};
use indexmap::IndexMap;
use sheet_insights_types::{CategoricalChunkStats, CategoricalSummary};

/// Running value counts for one categorical column
///
/// Only values that made it into some chunk's own top-N list are visible
/// here, so `unique_values` undercounts columns with a long tail.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalAccumulator {
    /// Counts in first-encountered order; the keys are the distinct values
    value_counts: IndexMap<String, u64>,
    missing_total: u64,
    top_n: usize,
}

impl CategoricalAccumulator {
    /// `top_n` bounds the number of values listed in the summary
    pub fn new(top_n: usize) -> Self {
        Self {
            value_counts: IndexMap::new(),
            missing_total: 0,
            top_n,
        }
    }

    pub fn value_counts(&self) -> &IndexMap<String, u64> {
        &self.value_counts
    }

    pub fn unique_values(&self) -> usize {
        self.value_counts.len()
    }

    /// The `n` most frequent values; ties keep first-encountered order
    pub fn top_values(&self, n: usize) -> IndexMap<String, u64> {
        let mut entries: Vec<(&String, &u64)> = self.value_counts.iter().collect();
        // stable: equal counts stay in insertion order
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries
            .into_iter()
            .take(n)
            .map(|(value, count)| (value.clone(), *count))
            .collect()
    }
}

impl ColumnAccumulator for CategoricalAccumulator {
    type Chunk = CategoricalChunkStats;
    type Summary = CategoricalSummary;

    fn merge_chunk(&mut self, chunk: &CategoricalChunkStats, _chunk_rows: u64) {
        for (value, count) in &chunk.top_values {
            // key is cloned only for values not seen before
            match self.value_counts.get_mut(value) {
                Some(total) => *total += count,
                None => {
                    self.value_counts.insert(value.clone(), *count);
                }
            }
        }
        self.missing_total += chunk.missing;
    }

    fn summarize(&self, total_rows: u64) -> CategoricalSummary {
        CategoricalSummary {
            unique_values: self.unique_values(),
            top_values: self.top_values(self.top_n),
            missing: self.missing_total,
            missing_pct: missing_pct(self.missing_total, total_rows),
        }
    }
}
