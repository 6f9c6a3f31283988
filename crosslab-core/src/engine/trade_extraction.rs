//! Trade extraction — position transitions into discrete trade events.

use crate::domain::{PricePoint, Signal, Trade};
use crate::engine::position::is_long;

/// Scan the position series once and emit trades in entry order.
///
/// A Flat→Long transition at bar `d` opens a trade at `close(d)`; the
/// next Long→Flat transition closes it at that bar's close. The strategy
/// is single-position — fully invested or fully flat — so at most one
/// trade is open at any time. A trade still open at the end of the series
/// is emitted with no exit rather than being force-closed or discarded.
pub fn extract_trades(prices: &[PricePoint], positions: &[Option<Signal>]) -> Vec<Trade> {
    debug_assert_eq!(prices.len(), positions.len());

    let mut trades: Vec<Trade> = Vec::new();
    let mut open: Option<Trade> = None;

    for (point, &position) in prices.iter().zip(positions) {
        if is_long(position) {
            if open.is_none() {
                open = Some(Trade::open_long(point.date, point.close));
            }
        } else if let Some(mut trade) = open.take() {
            trade.close(point.date, point.close);
            trades.push(trade);
        }
    }

    if let Some(trade) = open {
        trades.push(trade);
    }

    trades
}
