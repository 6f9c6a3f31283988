//! Trade tape export (CSV/JSON).

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crosslab_core::domain::{Trade, TradeSide};

pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;

    writeln!(
        file,
        "side,entry_date,entry_price,exit_date,exit_price,realized_return"
    )?;

    for trade in trades {
        let side = match trade.side {
            TradeSide::Long => "long",
            TradeSide::Short => "short",
        };
        // Open trades leave their exit columns empty.
        let exit_date = trade
            .exit_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        let exit_price = trade
            .exit_price
            .map(|p| format!("{p:.4}"))
            .unwrap_or_default();
        let realized = trade
            .realized_return()
            .map(|r| format!("{r:.6}"))
            .unwrap_or_default();
        writeln!(
            file,
            "{},{},{:.4},{},{},{}",
            side, trade.entry_date, trade.entry_price, exit_date, exit_price, realized
        )?;
    }

    Ok(())
}

pub fn write_trades_json(path: &Path, trades: &[Trade]) -> Result<()> {
    let json = serde_json::to_string_pretty(trades)
        .context("Failed to serialize trades")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write trades JSON {}", path.display()))?;
    Ok(())
}
