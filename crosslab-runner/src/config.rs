//! Serializable backtest run configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crosslab_core::config::{ConfigError, StrategyParams};

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Everything needed to reproduce one backtest run.
///
/// Two runs with identical configs share a `RunId`, so archived results
/// can be recognized instead of recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Instrument to backtest.
    pub symbol: String,

    /// Fetch range start (inclusive). Quoted ISO date in TOML.
    pub start_date: NaiveDate,

    /// Fetch range end (inclusive).
    pub end_date: NaiveDate,

    /// Strategy parameters (windows and seed equity).
    #[serde(default)]
    pub params: StrategyParams,
}

impl RunConfig {
    /// Validate everything that can be checked before any I/O.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        if self.start_date > self.end_date {
            return Err(ConfigError::EmptyDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        self.params.validate()
    }

    /// Deterministic content hash of this configuration.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        format!("{}", hash.to_hex())
    }

    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// Errors loading a config file (distinct from semantic `ConfigError`s,
/// which `validate()` reports after a successful parse).
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
