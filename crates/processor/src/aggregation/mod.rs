//! Aggregation module for merging per-chunk statistics
//!
//! A file is analyzed chunk by chunk; each chunk yields a
//! [`ChunkStats`](sheet_insights_types::ChunkStats) summary and the
//! [`ChunkStatsAccumulator`] folds those summaries into one running state:
//!
//! - **Numeric columns**: sum, count, min/max, Welford mean and a running
//!   sum of squares ([`NumericAccumulator`])
//! - **Categorical columns**: value counts from each chunk's top values
//!   ([`CategoricalAccumulator`])
//! - **Date columns**: earliest and latest timestamp ([`DateAccumulator`])
//!
//! # Examples
//!
//! ```rust
//! use processor::aggregation::ChunkStatsAccumulator;
//! use sheet_insights_types::{ChunkStats, NumericChunkStats};
//!
//! let mut acc = ChunkStatsAccumulator::with_defaults();
//! let reported = [(100.0, 10.0, 2.0, 5.0, 15.0), (150.0, 15.0, 3.0, 8.0, 20.0)];
//! for (sum, mean, std, min, max) in reported {
//!     let chunk = ChunkStats::new(10, ["Hours"])
//!         .with_numeric("Hours", NumericChunkStats::new(sum, mean, std, min, max, 0));
//!     acc.add_chunk_stats(&chunk).unwrap();
//! }
//!
//! let hours = &acc.final_statistics().numeric_summary["Hours"];
//! assert_eq!(hours.count, 20);
//! assert_eq!(hours.mean, 12.5);
//! assert_eq!(hours.std, 2.48);
//! ```

// Re-name to avoid collision with trait
mod trait_;

mod accumulator;
mod categorical;
mod date;
mod numeric;
pub mod variance;

pub use trait_::{missing_pct, round_to, ColumnAccumulator};

pub use accumulator::ChunkStatsAccumulator;
pub use categorical::CategoricalAccumulator;
pub use date::DateAccumulator;
pub use numeric::NumericAccumulator;
pub use variance::OnlineVariance;
