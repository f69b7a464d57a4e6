//! Generator configuration.
//!
//! Settings can be built in code or loaded from a TOML file. The
//! refill threshold and attempt cap never change the bits produced
//! for a given seed; they only tune how work is batched and when an
//! unlucky rejection loop is cut short.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::DEFAULT_SEED;
use crate::analysis::{QualityThresholds, ReportConfig};
use crate::whitening::DEFAULT_REFILL_THRESHOLD;

/// Configuration for a [`super::WhitenedRng`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Initial scrambler state (0 is replaced by 1).
    pub seed: u64,
    /// Minimum bits to accumulate per buffer refill.
    pub refill_threshold: usize,
    /// Maximum rejection-sampling attempts per bounded draw (unbounded if absent).
    pub max_attempts: Option<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            refill_threshold: DEFAULT_REFILL_THRESHOLD,
            max_attempts: None,
        }
    }
}

impl GeneratorConfig {
    /// Creates a default configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refill_threshold == 0 {
            return Err(ConfigError::InvalidRefillThreshold);
        }
        if self.max_attempts == Some(0) {
            return Err(ConfigError::InvalidAttemptCap);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("refill threshold must be at least 1 bit")]
    InvalidRefillThreshold,
    #[error("attempt cap must be at least 1 when set")]
    InvalidAttemptCap,
    #[error("histogram must have at least one bucket")]
    InvalidBucketCount,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub thresholds: QualityThresholds,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: FileConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.generator.validate()?;
        config.report.validate()?;
        Ok(config)
    }
}
