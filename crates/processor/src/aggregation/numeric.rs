use super::trait_::{missing_pct, round_to, ColumnAccumulator};
use super::variance::OnlineVariance;
use serde::{Deserialize, Serialize};
use sheet_insights_config::VarianceMode;
use sheet_insights_types::{NumericChunkStats, NumericSummary};

/// Running statistics for one numeric column
///
/// The mean follows Welford's update applied at chunk granularity. How the
/// running `m2` absorbs each chunk depends on [`VarianceMode`]:
///
/// - `ChunkApproximate` adds `std² · (n - 1)` per chunk, i.e. each chunk's own
///   sum of squares. The spread *between* chunk means is never added, so the
///   final std is understated when chunk means differ and it changes with
///   chunk boundaries (not with chunk order).
/// - `Exact` applies the parallel combination, which equals the pooled sample
///   variance of the raw rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericAccumulator {
    sum: f64,
    count: u64,
    min: f64,
    max: f64,
    mean: f64,
    m2: f64,
    missing_total: u64,
    mode: VarianceMode,
}

impl NumericAccumulator {
    pub fn new(mode: VarianceMode) -> Self {
        Self {
            sum: 0.0,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            m2: 0.0,
            missing_total: 0,
            mode,
        }
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Non-missing values seen
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Running minimum, `None` until a chunk reported one
    pub fn min(&self) -> Option<f64> {
        self.min.is_finite().then_some(self.min)
    }

    /// Running maximum, `None` until a chunk reported one
    pub fn max(&self) -> Option<f64> {
        self.max.is_finite().then_some(self.max)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Sample standard deviation, 0 with fewer than two values
    pub fn std(&self) -> f64 {
        if self.count > 1 {
            (self.m2.max(0.0) / (self.count - 1) as f64).sqrt()
        } else {
            0.0
        }
    }
}

impl ColumnAccumulator for NumericAccumulator {
    type Chunk = NumericChunkStats;
    type Summary = NumericSummary;

    fn merge_chunk(&mut self, chunk: &NumericChunkStats, chunk_rows: u64) {
        let chunk_count = chunk_rows.saturating_sub(chunk.missing);

        if let Some(sum) = chunk.finite_sum() {
            self.sum += sum;
        }
        if let Some(min) = chunk.finite_min() {
            self.min = self.min.min(min);
        }
        if let Some(max) = chunk.finite_max() {
            self.max = self.max.max(max);
        }
        self.missing_total += chunk.missing;

        let previous_count = self.count;
        self.count += chunk_count;

        if chunk_count == 0 {
            return;
        }

        // A chunk without a usable mean still counts its rows; its values
        // just cannot move the running mean.
        let Some(chunk_mean) = chunk
            .finite_mean()
            .or_else(|| chunk.finite_sum().map(|sum| sum / chunk_count as f64))
        else {
            return;
        };
        let chunk_std = chunk.finite_std().unwrap_or(0.0);

        match self.mode {
            VarianceMode::ChunkApproximate => {
                let delta = chunk_mean - self.mean;
                self.mean += delta * chunk_count as f64 / self.count as f64;
                if chunk_count > 1 {
                    self.m2 += chunk_std * chunk_std * (chunk_count - 1) as f64;
                }
            }
            VarianceMode::Exact => {
                let mut running = OnlineVariance::from_parts(previous_count, self.mean, self.m2);
                running.merge(&OnlineVariance::from_sample_std(
                    chunk_count,
                    chunk_mean,
                    chunk_std,
                ));
                self.mean = running.mean();
                self.m2 = running.m2();
            }
        }
    }

    fn summarize(&self, total_rows: u64) -> NumericSummary {
        NumericSummary {
            sum: round_to(self.sum, 2),
            mean: round_to(self.mean, 2),
            std: round_to(self.std(), 2),
            min: round_to(self.min().unwrap_or(0.0), 2),
            max: round_to(self.max().unwrap_or(0.0), 2),
            count: self.count,
            missing: self.missing_total,
            missing_pct: missing_pct(self.missing_total, total_rows),
        }
    }
}
