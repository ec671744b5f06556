//! Finalized, presentation-ready statistics

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Summary of one numeric column across all chunks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericSummary {
    pub sum: f64,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// Non-missing values seen
    pub count: u64,
    pub missing: u64,
    /// Share of all rows that were missing, in percent
    pub missing_pct: f64,
}

/// Summary of one categorical column across all chunks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoricalSummary {
    /// Distinct values observed in the chunks' top-value lists
    pub unique_values: usize,
    /// Most frequent values, most frequent first
    pub top_values: IndexMap<String, u64>,
    pub missing: u64,
    pub missing_pct: f64,
}

/// Summary of one date column across all chunks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateSummary {
    /// `"<min> to <max>"`
    pub date_range: String,
    #[serde(default, with = "crate::datetime::option")]
    pub min_date: Option<NaiveDateTime>,
    #[serde(default, with = "crate::datetime::option")]
    pub max_date: Option<NaiveDateTime>,
    pub missing: u64,
    pub missing_pct: f64,
}

/// Final statistics for a whole file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FinalStatistics {
    pub total_rows: u64,
    pub total_columns: usize,
    pub columns: Vec<String>,
    #[serde(default)]
    pub numeric_summary: IndexMap<String, NumericSummary>,
    #[serde(default)]
    pub categorical_summary: IndexMap<String, CategoricalSummary>,
    #[serde(default)]
    pub date_summary: IndexMap<String, DateSummary>,
}
