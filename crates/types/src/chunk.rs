//! Per-chunk statistics records
//!
//! A [`ChunkStats`] describes one bounded slice of rows from a larger file.
//! Every section and every field is optional: a chunk analyzer only reports
//! what it could compute, and the accumulator treats anything absent as "no
//! contribution from this chunk".

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Statistics for one numeric column, computed over a single chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NumericChunkStats {
    /// Sum of non-missing values
    #[serde(default)]
    pub sum: Option<f64>,
    /// Mean of non-missing values
    #[serde(default)]
    pub mean: Option<f64>,
    /// Sample standard deviation (n-1) of non-missing values
    #[serde(default)]
    pub std: Option<f64>,
    /// Smallest value
    #[serde(default)]
    pub min: Option<f64>,
    /// Largest value
    #[serde(default)]
    pub max: Option<f64>,
    /// Missing cells in this chunk
    #[serde(default)]
    pub missing: u64,
}

impl NumericChunkStats {
    /// Create a fully populated record
    pub fn new(sum: f64, mean: f64, std: f64, min: f64, max: f64, missing: u64) -> Self {
        Self {
            sum: Some(sum),
            mean: Some(mean),
            std: Some(std),
            min: Some(min),
            max: Some(max),
            missing,
        }
    }

    /// Sum, or `None` when absent or not finite
    pub fn finite_sum(&self) -> Option<f64> {
        finite(self.sum)
    }

    pub fn finite_mean(&self) -> Option<f64> {
        finite(self.mean)
    }

    pub fn finite_std(&self) -> Option<f64> {
        finite(self.std)
    }

    pub fn finite_min(&self) -> Option<f64> {
        finite(self.min)
    }

    pub fn finite_max(&self) -> Option<f64> {
        finite(self.max)
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Statistics for one categorical column, computed over a single chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoricalChunkStats {
    /// The chunk's most frequent values with their counts, most frequent first
    #[serde(default)]
    pub top_values: IndexMap<String, u64>,
    /// Missing cells in this chunk
    #[serde(default)]
    pub missing: u64,
}

impl CategoricalChunkStats {
    pub fn new<I, V>(top_values: I, missing: u64) -> Self
    where
        I: IntoIterator<Item = (V, u64)>,
        V: Into<String>,
    {
        Self {
            top_values: top_values
                .into_iter()
                .map(|(value, count)| (value.into(), count))
                .collect(),
            missing,
        }
    }
}

/// Date range for one date column, computed over a single chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DateChunkStats {
    #[serde(default, with = "crate::datetime::option")]
    pub min_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime::option")]
    pub max_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub missing: u64,
}

impl DateChunkStats {
    pub fn new(min_date: NaiveDateTime, max_date: NaiveDateTime, missing: u64) -> Self {
        Self {
            min_date: Some(min_date),
            max_date: Some(max_date),
            missing,
        }
    }
}

/// Descriptive statistics for one chunk of rows
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChunkStats {
    /// Number of rows in the chunk
    #[serde(default)]
    pub rows: u64,

    /// Column names, in file order
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub numeric_stats: IndexMap<String, NumericChunkStats>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub categorical_stats: IndexMap<String, CategoricalChunkStats>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub date_stats: IndexMap<String, DateChunkStats>,
}

impl ChunkStats {
    /// Create a chunk record with no column statistics yet
    pub fn new<I, S>(rows: u64, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows,
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_numeric(mut self, column: impl Into<String>, stats: NumericChunkStats) -> Self {
        self.numeric_stats.insert(column.into(), stats);
        self
    }

    pub fn with_categorical(
        mut self,
        column: impl Into<String>,
        stats: CategoricalChunkStats,
    ) -> Self {
        self.categorical_stats.insert(column.into(), stats);
        self
    }

    pub fn with_date(mut self, column: impl Into<String>, stats: DateChunkStats) -> Self {
        self.date_stats.insert(column.into(), stats);
        self
    }
}
