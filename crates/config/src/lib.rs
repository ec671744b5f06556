//! Configuration management for sheet insights
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables prefixed with `SHEET_INSIGHTS_` (nested keys are
//! separated by `__`, e.g. `SHEET_INSIGHTS_ANALYSIS__CHUNK_SIZE=5000`).

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "SHEET_INSIGHTS_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InsightsConfig {
    /// How files are split and each chunk summarized
    pub analysis: AnalysisConfig,

    /// How chunk summaries are merged and finalized
    pub accumulator: AccumulatorConfig,

    /// Logging settings
    pub observability: ObservabilityConfig,
}

impl InsightsConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(InsightsConfig::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Yaml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| ConfigError::LoadError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.accumulator.validate()?;
        Ok(())
    }
}

/// Chunking and per-chunk summarization settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    /// Maximum rows held in memory at once
    pub chunk_size: usize,

    /// Values kept per categorical column in each chunk summary
    pub chunk_top_values: usize,

    /// Field delimiter of the input file
    pub delimiter: char,

    /// Cell contents treated as missing (compared case-insensitively)
    pub null_tokens: Vec<String>,

    /// `strftime` formats tried when detecting date columns
    pub date_formats: Vec<String>,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.chunk_size must be greater than 0".to_string(),
            ));
        }

        if self.chunk_top_values == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.chunk_top_values must be greater than 0".to_string(),
            ));
        }

        if !self.delimiter.is_ascii() {
            return Err(ConfigError::ValidationError(format!(
                "analysis.delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }

        if self.date_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "analysis.date_formats must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_size: 10_000,
            chunk_top_values: 20,
            delimiter: ',',
            null_tokens: ["", "na", "n/a", "null", "none", "nan", "-"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            date_formats: [
                "%Y-%m-%d",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%dT%H:%M:%S",
                "%Y/%m/%d",
                "%d/%m/%Y",
                "%d.%m.%Y",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// How per-chunk standard deviations are folded into the running variance
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VarianceMode {
    /// Add `std² · (n - 1)` per chunk and ignore the shift between chunk means
    #[default]
    ChunkApproximate,
    /// Parallel combination including the between-chunk mean-shift term
    Exact,
}

/// What to do when a later chunk reports different columns than the first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnPolicy {
    /// Keep the first chunk's columns, merge whatever is present, warn
    #[default]
    Lenient,
    /// Reject the chunk
    Strict,
}

/// Accumulator settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccumulatorConfig {
    /// Categorical values listed per column in the final statistics
    pub report_top_values: usize,

    pub variance_mode: VarianceMode,

    pub column_policy: ColumnPolicy,
}

impl AccumulatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.report_top_values == 0 {
            return Err(ConfigError::ValidationError(
                "accumulator.report_top_values must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            report_top_values: 10,
            variance_mode: VarianceMode::default(),
            column_policy: ColumnPolicy::default(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,

    /// Enable structured JSON logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
        }
    }
}
