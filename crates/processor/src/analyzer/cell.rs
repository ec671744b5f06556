//! Cell-level parsing used for column kind inference

use chrono::NaiveDateTime;
use sheet_insights_types::datetime;
use std::collections::HashSet;

/// Inferred kind of a column within one chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Date,
    Categorical,
}

/// Decides which cells count as missing
#[derive(Debug, Clone)]
pub struct NullMatcher {
    tokens: HashSet<String>,
}

impl NullMatcher {
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self {
            tokens: tokens
                .iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn is_null(&self, cell: &str) -> bool {
        let cell = cell.trim();
        cell.is_empty() || self.tokens.contains(&cell.to_lowercase())
    }
}

/// Parse a spreadsheet-style number.
///
/// Accepts a leading currency sign, thousands separators and a trailing
/// percent sign (`$1,250.50`, `85%`). Non-finite results are rejected.
pub fn parse_number(cell: &str) -> Option<f64> {
    let mut text = cell.trim();
    for symbol in ['$', '€', '£'] {
        if let Some(rest) = text.strip_prefix(symbol) {
            text = rest.trim_start();
            break;
        }
    }
    if let Some(rest) = text.strip_suffix('%') {
        text = rest.trim_end();
    }

    if text.is_empty() {
        return None;
    }

    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a date cell against the configured formats
pub fn parse_date<S: AsRef<str>>(cell: &str, formats: &[S]) -> Option<NaiveDateTime> {
    datetime::parse_with_formats(cell, formats)
}
