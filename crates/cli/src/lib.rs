//! Sheet insights CLI library
//!
//! Command definitions and output rendering for the `sheet-insights` binary.

pub mod commands;
pub mod output;

use processor::ProcessorError;
use sheet_insights_config::ConfigError;
use thiserror::Error;

pub use output::OutputFormat;

/// CLI errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Analysis failed: {0}")]
    Processing(#[from] ProcessorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type CliResult<T> = std::result::Result<T, CliError>;
