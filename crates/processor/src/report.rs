//! Plain-text report rendering

use sheet_insights_types::FinalStatistics;

/// Render the final statistics of `file_name` as a Markdown-flavoured report.
///
/// Groups without any column (numeric, categorical, date) are left out
/// entirely, heading included.
pub fn generate_report(file_name: &str, stats: &FinalStatistics) -> String {
    let mut lines = Vec::new();

    lines.push(format!("# Data Analysis Report: {file_name}"));
    lines.push(String::new());
    lines.push("## Overview".to_string());
    lines.push(format!("- Total rows: {}", thousands(stats.total_rows)));
    lines.push(format!("- Total columns: {}", stats.total_columns));
    if !stats.columns.is_empty() {
        lines.push(format!("- Columns: {}", stats.columns.join(", ")));
    }

    if !stats.numeric_summary.is_empty() {
        lines.push(String::new());
        lines.push("## Numeric Columns".to_string());
        for (column, summary) in &stats.numeric_summary {
            lines.push(String::new());
            lines.push(format!("### {column}"));
            lines.push(format!(
                "- Values: {} (missing: {}, {:.1}%)",
                thousands(summary.count),
                thousands(summary.missing),
                summary.missing_pct
            ));
            lines.push(format!("- Sum: {:.2}", summary.sum));
            lines.push(format!("- Mean: {:.2}", summary.mean));
            lines.push(format!("- Std dev: {:.2}", summary.std));
            lines.push(format!("- Range: {:.2} to {:.2}", summary.min, summary.max));
        }
    }

    if !stats.categorical_summary.is_empty() {
        lines.push(String::new());
        lines.push("## Categorical Columns".to_string());
        for (column, summary) in &stats.categorical_summary {
            lines.push(String::new());
            lines.push(format!("### {column}"));
            lines.push(format!(
                "- Unique values: {} (missing: {}, {:.1}%)",
                thousands(summary.unique_values as u64),
                thousands(summary.missing),
                summary.missing_pct
            ));
            if !summary.top_values.is_empty() {
                lines.push("- Most common:".to_string());
                for (value, count) in &summary.top_values {
                    lines.push(format!("  - {value}: {}", thousands(*count)));
                }
            }
        }
    }

    if !stats.date_summary.is_empty() {
        lines.push(String::new());
        lines.push("## Date Columns".to_string());
        for (column, summary) in &stats.date_summary {
            lines.push(String::new());
            lines.push(format!("### {column}"));
            lines.push(format!("- Range: {}", summary.date_range));
            lines.push(format!(
                "- Missing: {} ({:.1}%)",
                thousands(summary.missing),
                summary.missing_pct
            ));
        }
    }

    lines.push(String::new());
    lines.push("## Next Steps".to_string());
    lines.push(
        "Ask about specific columns, trends over the date range, or comparisons between \
         categories to dig deeper into this data."
            .to_string(),
    );

    lines.join("\n")
}

/// `1234567` -> `1,234,567`
fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
