//! Online mean/variance (Welford) with parallel merge (Chan et al.)

use serde::{Deserialize, Serialize};

/// Online variance calculator using Welford's algorithm
///
/// Provides numerically stable variance calculation for streaming data
/// without storing all values. Two calculators built over disjoint data can
/// be merged into the one that would have seen both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OnlineVariance {
    count: u64,
    mean: f64,
    m2: f64,
}

impl OnlineVariance {
    /// Create a new online variance calculator
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from previously computed moments
    pub fn from_parts(count: u64, mean: f64, m2: f64) -> Self {
        Self { count, mean, m2 }
    }

    /// Rebuild from a reported sample standard deviation over `count` values
    pub fn from_sample_std(count: u64, mean: f64, std: f64) -> Self {
        let m2 = if count > 1 {
            std * std * (count - 1) as f64
        } else {
            0.0
        };
        Self { count, mean, m2 }
    }

    /// Update with a new value
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Merge with another online variance calculator
    pub fn merge(&mut self, other: &OnlineVariance) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let combined_count = self.count + other.count;
        let delta = other.mean - self.mean;
        let combined_mean = (self.count as f64 * self.mean + other.count as f64 * other.mean)
            / combined_count as f64;

        self.m2 = self.m2
            + other.m2
            + delta * delta * (self.count as f64 * other.count as f64) / combined_count as f64;

        self.count = combined_count;
        self.mean = combined_mean;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sum of squared differences from the mean
    pub fn m2(&self) -> f64 {
        self.m2
    }

    /// Sample variance, `None` below two values
    pub fn variance(&self) -> Option<f64> {
        if self.count < 2 {
            None
        } else {
            Some(self.m2.max(0.0) / (self.count - 1) as f64)
        }
    }

    /// Sample standard deviation, `None` below two values
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(|v| v.sqrt())
    }
}
