//! Equity curve export (CSV/Parquet).

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, NamedFrom, ParquetWriter, Series};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crosslab_core::domain::EquityPoint;

pub fn write_equity_csv(path: &Path, equity: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create equity CSV {}", path.display()))?;
    writeln!(file, "date,strategy,benchmark")?;
    for point in equity {
        writeln!(
            file,
            "{},{:.6},{:.6}",
            point.date, point.strategy, point.benchmark
        )?;
    }
    Ok(())
}

pub fn write_equity_parquet(path: &Path, equity: &[EquityPoint]) -> Result<()> {
    let dates: Vec<String> = equity.iter().map(|p| p.date.to_string()).collect();
    let strategy: Vec<f64> = equity.iter().map(|p| p.strategy).collect();
    let benchmark: Vec<f64> = equity.iter().map(|p| p.benchmark).collect();

    let mut df = DataFrame::new(vec![
        Column::Series(Series::new("date".into(), dates)),
        Column::Series(Series::new("strategy".into(), strategy)),
        Column::Series(Series::new("benchmark".into(), benchmark)),
    ])
    .context("Failed to build equity dataframe")?;

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create equity parquet {}", path.display()))?;
    ParquetWriter::new(&mut file)
        .finish(&mut df)
        .context("Failed to write equity parquet")?;
    Ok(())
}
