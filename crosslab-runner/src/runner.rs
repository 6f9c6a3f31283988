//! Backtest runner — wires together provider, engine, and metrics.
//!
//! Two entry points:
//! - `run_single_backtest()`: fetches from a provider, then runs. Used by
//!   the CLI.
//! - `run_backtest_from_prices()`: takes a pre-fetched series — no I/O.
//!   Used by tests and by callers that bring their own data.

use thiserror::Error;

use crosslab_core::config::ConfigError;
use crosslab_core::data::{DataError, DataProvider};
use crosslab_core::domain::PricePoint;
use crosslab_core::engine::{run_backtest, EngineError, IntegrityError};

use crate::config::RunConfig;
use crate::metrics::PerformanceStats;
use crate::result::{BacktestReport, SCHEMA_VERSION};

/// Errors from the runner, one variant per fault class.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration fault: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch fault: {0}")]
    Fetch(#[from] DataError),

    #[error("data integrity fault: {0}")]
    Integrity(#[from] IntegrityError),
}

impl From<EngineError> for RunError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Config(e) => RunError::Config(e),
            EngineError::Integrity(e) => RunError::Integrity(e),
        }
    }
}

/// Fetch the price series and run the backtest.
///
/// Configuration is validated before the fetch; a fetch fault aborts the
/// run before the engine is ever invoked.
pub fn run_single_backtest(
    config: &RunConfig,
    provider: &dyn DataProvider,
) -> Result<BacktestReport, RunError> {
    config.validate()?;

    tracing::info!(
        symbol = %config.symbol,
        start = %config.start_date,
        end = %config.end_date,
        provider = provider.name(),
        "fetching price series"
    );
    let fetched = provider.fetch(&config.symbol, config.start_date, config.end_date)?;

    run_backtest_from_prices(config, &fetched.prices)
}

/// Run the backtest over a pre-fetched series — no I/O.
pub fn run_backtest_from_prices(
    config: &RunConfig,
    prices: &[PricePoint],
) -> Result<BacktestReport, RunError> {
    config.validate()?;

    let run = run_backtest(prices, &config.params)?;
    let stats = PerformanceStats::from_run(&run, config.params.initial_equity);

    tracing::info!(
        run_id = %config.run_id(),
        bars = prices.len(),
        closed_trades = stats.closed_trades,
        open_trades = stats.open_trades,
        "backtest complete"
    );

    Ok(BacktestReport {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        symbol: config.symbol.clone(),
        start_date: config.start_date,
        end_date: config.end_date,
        params: config.params,
        bar_count: prices.len(),
        equity_curve: run.equity,
        trades: run.trades,
        stats,
    })
}
