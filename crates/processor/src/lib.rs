//! Chunked statistics processor for sheet insights
//!
//! This crate reads delimited files in bounded chunks, summarizes each chunk
//! and merges the summaries into whole-file statistics and a text report,
//! without ever holding more than one chunk of raw rows.

pub mod aggregation;
pub mod analyzer;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod report;

pub use aggregation::{
    CategoricalAccumulator, ChunkStatsAccumulator, ColumnAccumulator, DateAccumulator,
    NumericAccumulator, OnlineVariance,
};

pub use analyzer::{ChunkAnalyzer, ColumnKind};

pub use error::{
    AccumulatorError, ChunkReadError, ProcessorError, Result as ProcessorResult,
};

pub use pipeline::{AnalysisOutcome, FileAnalyzer};

pub use reader::{CsvChunkReader, ReaderOptions, RowChunk};

pub use report::generate_report;
