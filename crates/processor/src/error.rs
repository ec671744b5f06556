//! Error types for the statistics processor
//!
//! This module provides error handling for reading chunks, merging chunk
//! statistics and driving a whole file analysis.

use thiserror::Error;

/// Main processor error type
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Accumulator rejected a chunk
    #[error("accumulator error: {0}")]
    Accumulator(#[from] AccumulatorError),

    /// Input could not be split into chunks
    #[error("read error: {0}")]
    Read(#[from] ChunkReadError),

    /// A pre-computed chunk record could not be parsed
    #[error("invalid chunk statistics on line {line}: {reason}")]
    InvalidChunk { line: usize, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Chunk merge errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccumulatorError {
    /// A chunk's column list differs from the first chunk's (strict policy only)
    #[error("column mismatch in chunk {chunk}: expected {expected:?}, got {actual:?}")]
    ColumnMismatch {
        chunk: u64,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

/// Chunk reading errors
#[derive(Error, Debug)]
pub enum ChunkReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),

    /// The input has no header row
    #[error("input has no header row")]
    EmptyHeader,

    /// Chunk size is invalid
    #[error("invalid chunk size: {size}, must be greater than 0")]
    InvalidChunkSize { size: usize },
}

/// Result type alias for processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Result type alias for accumulator operations
pub type AccumulatorResult<T> = std::result::Result<T, AccumulatorError>;

/// Result type alias for chunk reading
pub type ReadResult<T> = std::result::Result<T, ChunkReadError>;
