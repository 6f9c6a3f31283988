//! Trade — a discrete position entry/exit event pair.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Direction of a trade. The crossover strategy only ever goes long;
/// `Short` exists so the record type doesn't change if a future strategy
/// sells short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Long,
    Short,
}

/// A round-trip trade: opened on a Flat→Long position transition, closed
/// on the next Long→Flat transition.
///
/// A trade still open when the series ends keeps `exit_date`/`exit_price`
/// as `None` — it is reported as open, never force-closed at the last
/// price. Callers wanting realized P&L only must filter open trades out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: TradeSide,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub exit_date: Option<NaiveDate>,
    pub exit_price: Option<f64>,
}

impl Trade {
    /// Open a new long trade at the given bar.
    pub fn open_long(entry_date: NaiveDate, entry_price: f64) -> Self {
        Self {
            side: TradeSide::Long,
            entry_date,
            entry_price,
            exit_date: None,
            exit_price: None,
        }
    }

    /// Close this trade at the given bar.
    pub fn close(&mut self, exit_date: NaiveDate, exit_price: f64) {
        self.exit_date = Some(exit_date);
        self.exit_price = Some(exit_price);
    }

    pub fn is_open(&self) -> bool {
        self.exit_date.is_none()
    }

    /// Fractional return of the round trip; `None` while the trade is open.
    pub fn realized_return(&self) -> Option<f64> {
        self.exit_price.map(|exit| exit / self.entry_price - 1.0)
    }

    /// Bars-agnostic holding period in calendar days; `None` while open.
    pub fn holding_days(&self) -> Option<i64> {
        self.exit_date.map(|exit| (exit - self.entry_date).num_days())
    }
}
