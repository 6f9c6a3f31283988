//! Run manifest export (JSON).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crosslab_core::config::StrategyParams;

use crate::metrics::PerformanceStats;
use crate::result::BacktestReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: u32,
    pub run_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub params: StrategyParams,
    pub bar_count: usize,
    pub stats: PerformanceStats,
}

pub fn write_manifest(path: &Path, report: &BacktestReport) -> Result<()> {
    let manifest = RunManifest {
        schema_version: report.schema_version,
        run_id: report.run_id.clone(),
        created_at: chrono::Utc::now(),
        symbol: report.symbol.clone(),
        start_date: report.start_date,
        end_date: report.end_date,
        params: report.params,
        bar_count: report.bar_count,
        stats: report.stats.clone(),
    };

    let json = serde_json::to_string_pretty(&manifest)
        .context("Failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}
