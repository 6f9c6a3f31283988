//! Artifact manager for persisting run outputs.

mod equity;
mod manifest;
mod trades;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::reporting::chart;
use crate::result::BacktestReport;

pub use manifest::RunManifest;

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub manifest: PathBuf,
    pub equity_csv: PathBuf,
    pub equity_parquet: PathBuf,
    pub trades_csv: PathBuf,
    pub trades_json: PathBuf,
    pub chart_svg: PathBuf,
}

/// Manages writing all artifacts for a run.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("Failed to create artifact output directory")?;
        Ok(Self { output_dir })
    }

    /// Save complete run artifacts under `<output_dir>/<run_id>/`.
    pub fn save_run(&self, report: &BacktestReport) -> Result<ArtifactPaths> {
        let run_dir = self.output_dir.join(&report.run_id);
        std::fs::create_dir_all(&run_dir)
            .context("Failed to create run artifact directory")?;

        let manifest_path = run_dir.join("manifest.json");
        manifest::write_manifest(&manifest_path, report)?;

        let equity_csv = run_dir.join("equity.csv");
        let equity_parquet = run_dir.join("equity.parquet");
        equity::write_equity_csv(&equity_csv, &report.equity_curve)?;
        equity::write_equity_parquet(&equity_parquet, &report.equity_curve)?;

        let trades_csv = run_dir.join("trades.csv");
        let trades_json = run_dir.join("trades.json");
        trades::write_trades_csv(&trades_csv, &report.trades)?;
        trades::write_trades_json(&trades_json, &report.trades)?;

        let chart_svg = run_dir.join("chart.svg");
        chart::write_chart_svg(&chart_svg, report)?;

        tracing::info!(run_dir = %run_dir.display(), "artifacts saved");

        Ok(ArtifactPaths {
            manifest: manifest_path,
            equity_csv,
            equity_parquet,
            trades_csv,
            trades_json,
            chart_svg,
        })
    }
}
