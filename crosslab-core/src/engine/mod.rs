//! Backtest engine — price series in, derived series and trades out.
//!
//! The engine runs in five steps, each a pure transformation:
//!
//! 1. Validate the series (strictly increasing dates, positive closes)
//! 2. Derive short and long SMA series
//! 3. Derive the signal series, then shift it one bar into positions
//! 4. Compute per-bar benchmark/strategy returns and both equity curves
//! 5. Extract discrete trades from position transitions
//!
//! There is no internal concurrency and no state across invocations:
//! two calls with the same inputs produce bit-identical outputs.

pub mod crossover;
pub mod position;
pub mod returns;
pub mod trade_extraction;
pub mod validate;

pub use crossover::derive_signals;
pub use position::lag_positions;
pub use returns::{build_equity_curves, daily_returns, strategy_returns};
pub use trade_extraction::extract_trades;
pub use validate::{validate_series, IntegrityError};

use thiserror::Error;

use crate::config::{ConfigError, StrategyParams};
use crate::domain::{EquityPoint, PricePoint, Signal, Trade};
use crate::indicators::Sma;

/// Everything one backtest run derives from its price series.
///
/// Vector fields are index-aligned with the input series. `NaN` marks
/// "not yet available" in the SMA and return series; `None` marks it in
/// the signal and position series.
#[derive(Debug, Clone)]
pub struct BacktestRun {
    pub sma_short: Vec<f64>,
    pub sma_long: Vec<f64>,
    pub signals: Vec<Option<Signal>>,
    pub positions: Vec<Option<Signal>>,
    pub benchmark_returns: Vec<f64>,
    pub strategy_returns: Vec<f64>,
    pub equity: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
}

impl BacktestRun {
    /// Number of closed (round-trip) trades.
    pub fn closed_trade_count(&self) -> usize {
        self.trades.iter().filter(|t| !t.is_open()).count()
    }

    /// Number of trades still open at the end of the series (0 or 1).
    pub fn open_trade_count(&self) -> usize {
        self.trades.iter().filter(|t| t.is_open()).count()
    }
}

/// Faults that abort a run before any derived value is emitted.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("configuration fault: {0}")]
    Config(#[from] ConfigError),

    #[error("data integrity fault: {0}")]
    Integrity(#[from] IntegrityError),
}

/// Run the crossover backtest over a validated price series.
///
/// Pure function of `(prices, params)`. A series shorter than the long
/// window is not a fault — every derived series simply stays undefined
/// (or empty), per the minimum-data edge case.
pub fn run_backtest(
    prices: &[PricePoint],
    params: &StrategyParams,
) -> Result<BacktestRun, EngineError> {
    params.validate()?;
    validate_series(prices)?;

    let sma_short = Sma::new(params.short_window).compute(prices);
    let sma_long = Sma::new(params.long_window).compute(prices);

    let signals = derive_signals(&sma_short, &sma_long);
    let positions = lag_positions(&signals);

    let benchmark_returns = daily_returns(prices);
    let strategy_returns = strategy_returns(&benchmark_returns, &positions);
    let equity = build_equity_curves(
        prices,
        &benchmark_returns,
        &strategy_returns,
        params.initial_equity,
    );

    let trades = extract_trades(prices, &positions);

    Ok(BacktestRun {
        sma_short,
        sma_long,
        signals,
        positions,
        benchmark_returns,
        strategy_returns,
        equity,
        trades,
    })
}
