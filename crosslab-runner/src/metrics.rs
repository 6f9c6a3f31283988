//! Performance metrics — pure functions over the run's derived series.
//!
//! Every metric is a pure function: equity curve and/or returns in,
//! scalar out. Metrics that need a minimum amount of history report
//! `None` below it instead of an extrapolated number.

use serde::{Deserialize, Serialize};

use crosslab_core::domain::EquityPoint;
use crosslab_core::engine::BacktestRun;

/// Trading days per year, used for annualization.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Aggregate performance statistics for a single backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Final strategy equity (the seed value when no equity was derived).
    pub final_equity: f64,

    /// Final buy-and-hold equity.
    pub final_benchmark_equity: f64,

    /// Fractional strategy return over the whole run.
    pub total_return: f64,

    /// Annualized growth rate; `None` under one trading year of bars.
    pub cagr: Option<f64>,

    /// Annualized Sharpe ratio of daily strategy returns (risk-free rate
    /// zero); `None` when the return variance is zero.
    pub sharpe: Option<f64>,

    /// Deepest peak-to-trough drop of strategy equity, as a positive
    /// fraction.
    pub max_drawdown: f64,

    /// Longest underwater streak, in bars.
    pub max_drawdown_days: usize,

    pub closed_trades: usize,
    pub open_trades: usize,
}

impl PerformanceStats {
    /// Compute all statistics from a finished run.
    pub fn from_run(run: &BacktestRun, initial_equity: f64) -> Self {
        let strategy_curve: Vec<f64> = run.equity.iter().map(|p| p.strategy).collect();
        let final_equity = strategy_curve.last().copied().unwrap_or(initial_equity);
        let final_benchmark_equity = run
            .equity
            .last()
            .map(|p| p.benchmark)
            .unwrap_or(initial_equity);

        // Daily strategy returns, skipping the undefined first bar.
        let daily: Vec<f64> = run
            .strategy_returns
            .iter()
            .copied()
            .filter(|r| !r.is_nan())
            .collect();

        Self {
            final_equity,
            final_benchmark_equity,
            total_return: final_equity / initial_equity - 1.0,
            cagr: cagr(final_equity / initial_equity, daily.len()),
            sharpe: sharpe_ratio(&daily),
            max_drawdown: max_drawdown(&strategy_curve),
            max_drawdown_days: max_drawdown_days(&run.equity),
            closed_trades: run.closed_trade_count(),
            open_trades: run.open_trade_count(),
        }
    }
}

/// Compound annual growth rate from the run's gross growth factor.
///
/// Annualizes over 252 trading days; under one year of bars the
/// extrapolation is noise, so it is not reported.
pub fn cagr(growth: f64, bars: usize) -> Option<f64> {
    if bars <= TRADING_DAYS_PER_YEAR as usize {
        return None;
    }
    Some(growth.powf(TRADING_DAYS_PER_YEAR / bars as f64) - 1.0)
}

/// Annualized Sharpe ratio of daily returns (risk-free rate zero,
/// sample standard deviation).
pub fn sharpe_ratio(daily_returns: &[f64]) -> Option<f64> {
    if daily_returns.len() < 2 {
        return None;
    }
    let n = daily_returns.len() as f64;
    let mean = daily_returns.iter().sum::<f64>() / n;
    let variance = daily_returns
        .iter()
        .map(|r| (r - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let std_dev = variance.sqrt();

    if std_dev > 0.0 {
        Some(mean / std_dev * TRADING_DAYS_PER_YEAR.sqrt())
    } else {
        None
    }
}

/// Deepest peak-to-trough drop as a positive fraction of the peak.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0;

    for &equity in equity_curve {
        if equity > peak {
            peak = equity;
        }
        let dd = (peak - equity) / peak;
        if dd > max_dd {
            max_dd = dd;
        }
    }

    max_dd
}

/// Longest run of consecutive bars spent below the running equity peak.
pub fn max_drawdown_days(equity: &[EquityPoint]) -> usize {
    let mut peak = f64::NEG_INFINITY;
    let mut current = 0usize;
    let mut longest = 0usize;

    for point in equity {
        if point.strategy > peak {
            peak = point.strategy;
        }
        if point.strategy < peak {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    longest
}
