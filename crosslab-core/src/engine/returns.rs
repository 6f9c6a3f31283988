//! Per-bar returns and equity curve accounting.

use crate::domain::{EquityPoint, PricePoint, Signal};
use crate::engine::position::is_long;

/// Raw daily price returns: `close(d) / close(d-1) - 1`.
///
/// Index 0 has no previous close and is `NaN`. Assumes the series has
/// already passed `validate_series` — a zero or missing previous close is
/// rejected there, before this runs.
pub fn daily_returns(prices: &[PricePoint]) -> Vec<f64> {
    let mut returns = vec![f64::NAN; prices.len()];
    for i in 1..prices.len() {
        returns[i] = prices[i].close / prices[i - 1].close - 1.0;
    }
    returns
}

/// Strategy returns: the market return where the lagged position is long,
/// zero where it is flat or undefined. Index 0 stays `NaN` to mirror the
/// benchmark series.
pub fn strategy_returns(benchmark_returns: &[f64], positions: &[Option<Signal>]) -> Vec<f64> {
    debug_assert_eq!(benchmark_returns.len(), positions.len());

    benchmark_returns
        .iter()
        .zip(positions)
        .enumerate()
        .map(|(i, (&ret, &position))| {
            if i == 0 {
                f64::NAN
            } else if is_long(position) {
                ret
            } else {
                0.0
            }
        })
        .collect()
}

/// Compound both equity curves over the full date range.
///
/// Both curves are seeded at `initial_equity` on the first date. The
/// benchmark compounds every daily return (buy-and-hold from day one);
/// the strategy compounds only the bars where it is long, so it is
/// constant across flat stretches. Equity is never clamped or floored —
/// a catastrophic daily drop is reflected, not hidden.
///
/// A series with fewer than two points has no returns to compound and
/// produces an empty curve (the minimum-data case is "no output", not an
/// error).
pub fn build_equity_curves(
    prices: &[PricePoint],
    benchmark_returns: &[f64],
    strategy_returns: &[f64],
    initial_equity: f64,
) -> Vec<EquityPoint> {
    if prices.len() < 2 {
        return Vec::new();
    }

    let mut curve = Vec::with_capacity(prices.len());
    let mut benchmark = initial_equity;
    let mut strategy = initial_equity;
    curve.push(EquityPoint {
        date: prices[0].date,
        strategy,
        benchmark,
    });

    for i in 1..prices.len() {
        benchmark *= 1.0 + benchmark_returns[i];
        strategy *= 1.0 + strategy_returns[i];
        curve.push(EquityPoint {
            date: prices[i].date,
            strategy,
            benchmark,
        });
    }

    curve
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_prices(closes: &[f64]) -> Vec<PricePoint> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::new(base + chrono::Duration::days(i as i64), close))
            .collect()
    }

    #[test]
    fn daily_returns_basic() {
        let prices = make_prices(&[100.0, 110.0, 99.0]);
        let returns = daily_returns(&prices);
        assert!(returns[0].is_nan());
        assert!((returns[1] - 0.10).abs() < 1e-12);
        assert!((returns[2] - (99.0 / 110.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn constant_closes_produce_zero_returns_and_flat_curves() {
        let prices = make_prices(&[50.0; 6]);
        let returns = daily_returns(&prices);
        let positions = vec![Some(Signal::Long); 6];
        let strat = strategy_returns(&returns, &positions);
        let curve = build_equity_curves(&prices, &returns, &strat, 1.0);

        assert_eq!(curve.len(), 6);
        for point in &curve {
            assert_eq!(point.benchmark, 1.0);
            assert_eq!(point.strategy, 1.0);
        }
    }

    #[test]
    fn flat_position_earns_nothing() {
        let prices = make_prices(&[100.0, 110.0, 121.0]);
        let returns = daily_returns(&prices);
        let positions = vec![None, Some(Signal::Flat), Some(Signal::Flat)];
        let strat = strategy_returns(&returns, &positions);
        let curve = build_equity_curves(&prices, &returns, &strat, 1.0);

        assert!((curve[2].benchmark - 1.21).abs() < 1e-12);
        assert_eq!(curve[0].strategy, 1.0);
        assert_eq!(curve[1].strategy, 1.0);
        assert_eq!(curve[2].strategy, 1.0);
    }

    #[test]
    fn long_position_tracks_benchmark_exactly() {
        let prices = make_prices(&[100.0, 105.0, 92.0, 101.0]);
        let returns = daily_returns(&prices);
        let positions = vec![None, Some(Signal::Long), Some(Signal::Long), Some(Signal::Long)];
        let strat = strategy_returns(&returns, &positions);
        let curve = build_equity_curves(&prices, &returns, &strat, 1.0);

        for point in &curve {
            assert!((point.strategy - point.benchmark).abs() < 1e-12);
        }
    }

    #[test]
    fn curves_seed_at_initial_equity() {
        let prices = make_prices(&[100.0, 101.0]);
        let returns = daily_returns(&prices);
        let positions = vec![None, None];
        let strat = strategy_returns(&returns, &positions);
        let curve = build_equity_curves(&prices, &returns, &strat, 2.5);

        assert_eq!(curve[0].strategy, 2.5);
        assert_eq!(curve[0].benchmark, 2.5);
        assert!((curve[1].benchmark - 2.5 * 1.01).abs() < 1e-12);
        assert_eq!(curve[1].strategy, 2.5);
    }

    #[test]
    fn short_series_has_empty_curve() {
        let prices = make_prices(&[100.0]);
        let returns = daily_returns(&prices);
        let strat = strategy_returns(&returns, &[None]);
        assert!(build_equity_curves(&prices, &returns, &strat, 1.0).is_empty());
        assert!(build_equity_curves(&[], &[], &[], 1.0).is_empty());
    }

    #[test]
    fn equity_reflects_catastrophic_drop_without_flooring() {
        let prices = make_prices(&[100.0, 1.0]);
        let returns = daily_returns(&prices);
        let positions = vec![None, Some(Signal::Long)];
        let strat = strategy_returns(&returns, &positions);
        let curve = build_equity_curves(&prices, &returns, &strat, 1.0);

        assert!((curve[1].benchmark - 0.01).abs() < 1e-12);
        assert!((curve[1].strategy - 0.01).abs() < 1e-12);
        assert!(curve[1].strategy > 0.0);
    }
}
