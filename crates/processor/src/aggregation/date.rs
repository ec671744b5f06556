use super::trait_::{missing_pct, ColumnAccumulator};
use chrono::NaiveDateTime;
use sheet_insights_types::datetime;
use sheet_insights_types::{DateChunkStats, DateSummary};

/// Running date range for one date column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateAccumulator {
    min_date: Option<NaiveDateTime>,
    max_date: Option<NaiveDateTime>,
    missing_total: u64,
}

impl DateAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_date(&self) -> Option<NaiveDateTime> {
        self.min_date
    }

    pub fn max_date(&self) -> Option<NaiveDateTime> {
        self.max_date
    }

    /// `"<min> to <max>"`, or `"n/a"` when no chunk reported a bound
    pub fn date_range(&self) -> String {
        match (self.min_date, self.max_date) {
            (Some(min), Some(max)) => {
                format!("{} to {}", datetime::display(&min), datetime::display(&max))
            }
            (Some(only), None) | (None, Some(only)) => {
                let only = datetime::display(&only);
                format!("{only} to {only}")
            }
            (None, None) => "n/a".to_string(),
        }
    }
}

fn more_extreme(
    current: Option<NaiveDateTime>,
    candidate: Option<NaiveDateTime>,
    pick: fn(NaiveDateTime, NaiveDateTime) -> NaiveDateTime,
) -> Option<NaiveDateTime> {
    match (current, candidate) {
        (Some(current), Some(candidate)) => Some(pick(current, candidate)),
        (None, candidate) => candidate,
        (current, None) => current,
    }
}

impl ColumnAccumulator for DateAccumulator {
    type Chunk = DateChunkStats;
    type Summary = DateSummary;

    fn merge_chunk(&mut self, chunk: &DateChunkStats, _chunk_rows: u64) {
        self.min_date = more_extreme(self.min_date, chunk.min_date, std::cmp::min);
        self.max_date = more_extreme(self.max_date, chunk.max_date, std::cmp::max);
        self.missing_total += chunk.missing;
    }

    fn summarize(&self, total_rows: u64) -> DateSummary {
        DateSummary {
            date_range: self.date_range(),
            min_date: self.min_date,
            max_date: self.max_date,
            missing: self.missing_total,
            missing_pct: missing_pct(self.missing_total, total_rows),
        }
    }
}
