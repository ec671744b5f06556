//! Chunk analyzer
//!
//! Turns one [`RowChunk`] of raw cells into a [`ChunkStats`] summary. Column
//! kinds are inferred from the chunk's non-missing cells: numeric when every
//! one parses as a number, a date column when every one parses with one of
//! the configured date formats, and categorical otherwise.
//!
//! An [`AnalyzerSession`] carries the kinds established so far across the
//! chunks of one file. A chunk in which a column is entirely missing reports
//! those rows under the column's established kind; only a column that has
//! never held a value falls back to categorical. A column whose values change
//! shape partway through a file can still be reported under two kinds.

mod cell;

pub use cell::{parse_date, parse_number, ColumnKind, NullMatcher};

use crate::aggregation::OnlineVariance;
use crate::reader::RowChunk;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use sheet_insights_config::AnalysisConfig;
use sheet_insights_types::{CategoricalChunkStats, ChunkStats, DateChunkStats, NumericChunkStats};
use std::collections::HashMap;

/// Computes per-chunk descriptive statistics
#[derive(Debug, Clone)]
pub struct ChunkAnalyzer {
    nulls: NullMatcher,
    date_formats: Vec<String>,
    top_values: usize,
}

impl ChunkAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            nulls: NullMatcher::new(&config.null_tokens),
            date_formats: config.date_formats.clone(),
            top_values: config.chunk_top_values,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&AnalysisConfig::default())
    }

    /// Start analyzing the chunks of one file
    pub fn session(&self) -> AnalyzerSession<'_> {
        AnalyzerSession {
            analyzer: self,
            kinds: HashMap::new(),
        }
    }

    /// Summarize a standalone chunk, with no kinds carried over
    pub fn analyze(&self, chunk: &RowChunk) -> ChunkStats {
        self.session().analyze(chunk)
    }

    /// Kind of a column given its non-missing cells
    pub fn infer_kind(&self, present: &[&str]) -> ColumnKind {
        if present.is_empty() {
            return ColumnKind::Categorical;
        }
        if present.iter().all(|c| parse_number(c).is_some()) {
            return ColumnKind::Numeric;
        }
        if present
            .iter()
            .all(|c| parse_date(c, &self.date_formats).is_some())
        {
            return ColumnKind::Date;
        }
        ColumnKind::Categorical
    }
}

/// Column kinds established across the chunks of one file
#[derive(Debug)]
pub struct AnalyzerSession<'a> {
    analyzer: &'a ChunkAnalyzer,
    kinds: HashMap<String, ColumnKind>,
}

impl AnalyzerSession<'_> {
    /// Kind most recently inferred for `column`, if it ever held a value
    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.kinds.get(column).copied()
    }

    /// Summarize the next chunk of the file
    pub fn analyze(&mut self, chunk: &RowChunk) -> ChunkStats {
        let analyzer = self.analyzer;
        let mut stats = ChunkStats::new(chunk.len() as u64, chunk.headers.iter().cloned());

        for (index, name) in chunk.headers.iter().enumerate() {
            let mut present = Vec::with_capacity(chunk.len());
            let mut missing = 0u64;
            for cell in chunk.column(index) {
                if analyzer.nulls.is_null(cell) {
                    missing += 1;
                } else {
                    present.push(cell);
                }
            }

            let kind = if present.is_empty() {
                self.kind_of(name).unwrap_or(ColumnKind::Categorical)
            } else {
                let kind = analyzer.infer_kind(&present);
                self.kinds.insert(name.clone(), kind);
                kind
            };

            match kind {
                ColumnKind::Numeric => {
                    let values: Vec<f64> = present.iter().filter_map(|c| parse_number(c)).collect();
                    stats
                        .numeric_stats
                        .insert(name.clone(), numeric_stats(&values, missing));
                }
                ColumnKind::Date => {
                    let dates: Vec<NaiveDateTime> = present
                        .iter()
                        .filter_map(|c| parse_date(c, &analyzer.date_formats))
                        .collect();
                    stats
                        .date_stats
                        .insert(name.clone(), date_stats(&dates, missing));
                }
                ColumnKind::Categorical => {
                    stats.categorical_stats.insert(
                        name.clone(),
                        categorical_stats(&present, missing, analyzer.top_values),
                    );
                }
            }
        }

        stats
    }
}

fn numeric_stats(values: &[f64], missing: u64) -> NumericChunkStats {
    if values.is_empty() {
        return NumericChunkStats {
            missing,
            ..Default::default()
        };
    }

    let mut moments = OnlineVariance::new();
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &value in values {
        moments.update(value);
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    NumericChunkStats {
        sum: Some(sum),
        mean: Some(moments.mean()),
        std: Some(moments.std_dev().unwrap_or(0.0)),
        min: min.is_finite().then_some(min),
        max: max.is_finite().then_some(max),
        missing,
    }
}

fn date_stats(dates: &[NaiveDateTime], missing: u64) -> DateChunkStats {
    DateChunkStats {
        min_date: dates.iter().min().copied(),
        max_date: dates.iter().max().copied(),
        missing,
    }
}

fn categorical_stats(present: &[&str], missing: u64, top_n: usize) -> CategoricalChunkStats {
    let mut counts: IndexMap<&str, u64> = IndexMap::new();
    for cell in present {
        *counts.entry(cell.trim()).or_insert(0) += 1;
    }

    let mut entries: Vec<(&str, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(top_n);

    CategoricalChunkStats::new(entries, missing)
}
