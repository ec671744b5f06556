//! CLI command implementations

pub mod analyze;
pub mod merge;

pub use analyze::AnalyzeCommand;
pub use merge::MergeCommand;

use crate::OutputFormat;
use clap::Args;
use sheet_insights_config::{ColumnPolicy, InsightsConfig, VarianceMode};

/// Merge settings shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct MergeOptions {
    /// Combine chunk variances exactly instead of the chunk-level approximation
    #[arg(long)]
    pub exact_variance: bool,

    /// Reject chunks whose columns differ from the first chunk
    #[arg(long)]
    pub strict_columns: bool,

    /// Categorical values listed per column
    #[arg(long, value_name = "N")]
    pub top_values: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl MergeOptions {
    /// Apply the flags on top of the loaded configuration
    pub fn apply(&self, config: &mut InsightsConfig) {
        if self.exact_variance {
            config.accumulator.variance_mode = VarianceMode::Exact;
        }
        if self.strict_columns {
            config.accumulator.column_policy = ColumnPolicy::Strict;
        }
        if let Some(n) = self.top_values {
            config.accumulator.report_top_values = n;
        }
    }
}
