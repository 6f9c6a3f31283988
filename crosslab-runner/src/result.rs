//! Backtest report — the serializable outcome of one run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crosslab_core::config::StrategyParams;
use crosslab_core::domain::{EquityPoint, Trade};

use crate::config::RunId;
use crate::metrics::PerformanceStats;

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete, self-describing result of a backtest run.
///
/// This is what every sink consumes: the store archives it, the artifact
/// manager serializes it, the chart renders from it. It is plain data —
/// holding one does not depend on any sink having succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    pub run_id: RunId,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub params: StrategyParams,

    /// Price points the engine consumed (after provider filtering).
    pub bar_count: usize,

    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
    pub stats: PerformanceStats,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}
