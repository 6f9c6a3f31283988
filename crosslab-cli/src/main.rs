//! CrossLab CLI — run one SMA crossover backtest end to end.
//!
//! A single command, no subcommands: fetch the price series, run the
//! engine, print a summary, then write the three sinks (SQLite archive,
//! artifact directory, SVG chart). Exit code 0 only when everything —
//! backtest and sinks — succeeded; any configuration, fetch, integrity,
//! or sink fault exits non-zero. The summary is printed before the sinks
//! run, so computed results are visible even when a sink fails.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crosslab_core::config::StrategyParams;
use crosslab_core::data::{CsvProvider, DataProvider, YahooProvider};
use crosslab_runner::{run_single_backtest, ArtifactManager, BacktestReport, RunConfig};
use crosslab_store::{BacktestStore, RunRecord};

#[derive(Parser)]
#[command(
    name = "crosslab",
    about = "CrossLab — SMA crossover backtest vs buy-and-hold"
)]
struct Cli {
    /// Symbol to backtest (e.g. NVDA). Required unless --config is given.
    #[arg(long)]
    symbol: Option<String>,

    /// Start date (YYYY-MM-DD). Defaults to 10 years ago.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Short SMA window in trading days.
    #[arg(long, default_value_t = 20)]
    short: usize,

    /// Long SMA window in trading days.
    #[arg(long, default_value_t = 50)]
    long: usize,

    /// Seed value for both equity curves.
    #[arg(long, default_value_t = 1.0)]
    initial_equity: f64,

    /// Path to a TOML run config. Mutually exclusive with --symbol.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read prices from a date,close CSV instead of Yahoo Finance.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// SQLite archive path.
    #[arg(long, default_value = "backtests.db")]
    db: PathBuf,

    /// Output directory for run artifacts (manifest, trades, equity, chart).
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let provider: Box<dyn DataProvider> = match &cli.csv {
        Some(path) => Box::new(CsvProvider::new(path)),
        None => Box::new(YahooProvider::new()),
    };

    // Compute first; the report stays valid regardless of sink outcomes.
    let report = run_single_backtest(&config, provider.as_ref())?;
    print_summary(&report);

    // Sinks, strictly after the computation.
    let store = BacktestStore::open(&cli.db)
        .with_context(|| format!("cannot open archive {}", cli.db.display()))?;
    let archived = store
        .append_run(&run_record(&report), &report.trades, &report.equity_curve)
        .context("cannot archive run batch")?;
    if !archived {
        println!("(identical run already archived — database unchanged)");
    }

    let manager = ArtifactManager::new(&cli.output_dir)?;
    let paths = manager.save_run(&report)?;

    println!(
        "Files -> {}  |  {} (runs, trades, equity)",
        paths.chart_svg.display(),
        cli.db.display()
    );
    println!("Artifacts saved to: {}", paths.manifest.parent().unwrap().display());

    Ok(())
}

fn build_config(cli: &Cli) -> Result<RunConfig> {
    if cli.config.is_some() && cli.symbol.is_some() {
        bail!("--config and --symbol are mutually exclusive");
    }

    if let Some(path) = &cli.config {
        return Ok(RunConfig::from_file(path)?);
    }

    let Some(symbol) = cli.symbol.clone() else {
        bail!("one of --symbol or --config is required");
    };

    let start_date = cli
        .start
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --start date")?
        .unwrap_or_else(|| chrono::Local::now().date_naive() - chrono::Duration::days(365 * 10));

    let end_date = cli
        .end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("invalid --end date")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    Ok(RunConfig {
        symbol,
        start_date,
        end_date,
        params: StrategyParams {
            short_window: cli.short,
            long_window: cli.long,
            initial_equity: cli.initial_equity,
        },
    })
}

fn run_record(report: &BacktestReport) -> RunRecord {
    RunRecord {
        run_id: report.run_id.clone(),
        symbol: report.symbol.clone(),
        short_window: report.params.short_window as i64,
        long_window: report.params.long_window as i64,
        initial_equity: report.params.initial_equity,
        start_date: report.start_date.to_string(),
        end_date: report.end_date.to_string(),
        final_strategy_equity: Some(report.stats.final_equity),
        final_benchmark_equity: Some(report.stats.final_benchmark_equity),
        total_return: Some(report.stats.total_return),
        cagr: report.stats.cagr,
        sharpe: report.stats.sharpe,
        max_drawdown: Some(report.stats.max_drawdown),
        max_drawdown_days: Some(report.stats.max_drawdown_days as i64),
        closed_trades: report.stats.closed_trades as i64,
        open_trades: report.stats.open_trades as i64,
    }
}

fn print_summary(report: &BacktestReport) {
    println!();
    println!("=== Backtest Result ===");
    println!("Symbol:         {}", report.symbol);
    println!(
        "Period:         {} to {}",
        report.start_date, report.end_date
    );
    println!(
        "Bars:           {} ({} with equity)",
        report.bar_count,
        report.equity_curve.len()
    );
    println!(
        "Windows:        SMA {}/{}",
        report.params.short_window, report.params.long_window
    );
    println!(
        "Trades:         {} closed, {} open",
        report.stats.closed_trades, report.stats.open_trades
    );
    println!();
    println!("--- Performance ---");
    println!("Final equity:   {:.3}", report.stats.final_equity);
    println!(
        "Buy & hold:     {:.3}",
        report.stats.final_benchmark_equity
    );
    println!(
        "Total return:   {:+.2}%",
        report.stats.total_return * 100.0
    );
    match report.stats.cagr {
        Some(cagr) => println!("CAGR:           {:+.2}%", cagr * 100.0),
        None => println!("CAGR:           n/a (under one trading year)"),
    }
    match report.stats.sharpe {
        Some(sharpe) => println!("Sharpe (ann.):  {sharpe:.2}"),
        None => println!("Sharpe (ann.):  n/a"),
    }
    println!(
        "Max drawdown:   {:.2}% (duration: {} bars)",
        report.stats.max_drawdown * 100.0,
        report.stats.max_drawdown_days
    );
    println!();
}
