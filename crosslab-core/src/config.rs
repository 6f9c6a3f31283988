//! Strategy parameters and configuration-time validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters of the dual-SMA crossover strategy.
///
/// Validated before any I/O happens: a bad window pair is a configuration
/// error, never a runtime fault inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyParams {
    /// Short SMA window in trading days.
    #[serde(default = "default_short_window")]
    pub short_window: usize,

    /// Long SMA window in trading days. Must exceed `short_window`.
    #[serde(default = "default_long_window")]
    pub long_window: usize,

    /// Base value both equity curves are seeded with.
    #[serde(default = "default_initial_equity")]
    pub initial_equity: f64,
}

fn default_short_window() -> usize {
    20
}

fn default_long_window() -> usize {
    50
}

fn default_initial_equity() -> f64 {
    1.0
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            initial_equity: default_initial_equity(),
        }
    }
}

impl StrategyParams {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
            initial_equity: default_initial_equity(),
        }
    }

    /// Validate the parameter set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.short_window < 1 {
            return Err(ConfigError::WindowTooSmall {
                which: "short_window",
                got: self.short_window,
            });
        }
        if self.long_window < 1 {
            return Err(ConfigError::WindowTooSmall {
                which: "long_window",
                got: self.long_window,
            });
        }
        if self.short_window >= self.long_window {
            return Err(ConfigError::WindowOrdering {
                short: self.short_window,
                long: self.long_window,
            });
        }
        if !(self.initial_equity.is_finite() && self.initial_equity > 0.0) {
            return Err(ConfigError::NonPositiveInitialEquity {
                got: self.initial_equity,
            });
        }
        Ok(())
    }
}

/// Configuration faults. Detected before any I/O; the run aborts
/// immediately with a descriptive message.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{which} must be >= 1 (got {got})")]
    WindowTooSmall { which: &'static str, got: usize },

    #[error("short_window ({short}) must be less than long_window ({long})")]
    WindowOrdering { short: usize, long: usize },

    #[error("initial_equity must be a positive finite number (got {got})")]
    NonPositiveInitialEquity { got: f64 },

    #[error("start date {start} is after end date {end}")]
    EmptyDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("symbol must not be empty")]
    EmptySymbol,
}
