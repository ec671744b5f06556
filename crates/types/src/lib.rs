//! Core types and data models for sheet insights
//!
//! This crate provides the records exchanged between the chunk analyzer,
//! the statistics accumulator and whatever renders or serializes the final
//! summary.

pub mod chunk;
pub mod datetime;
pub mod summary;

pub use chunk::{CategoricalChunkStats, ChunkStats, DateChunkStats, NumericChunkStats};
pub use summary::{CategoricalSummary, DateSummary, FinalStatistics, NumericSummary};
