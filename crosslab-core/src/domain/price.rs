//! PricePoint — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Closing price for a single instrument on a single trading day.
///
/// The input series is ordered by date, strictly increasing, one point per
/// trading day. Non-trading days are simply absent — never zero-filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// Basic sanity check: the close is a finite, positive price.
    pub fn is_sane(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_point() -> PricePoint {
        PricePoint::new(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 103.0)
    }

    #[test]
    fn point_is_sane() {
        assert!(sample_point().is_sane());
    }

    #[test]
    fn zero_close_is_not_sane() {
        let mut p = sample_point();
        p.close = 0.0;
        assert!(!p.is_sane());
    }

    #[test]
    fn nan_close_is_not_sane() {
        let mut p = sample_point();
        p.close = f64::NAN;
        assert!(!p.is_sane());
    }

    #[test]
    fn point_serialization_roundtrip() {
        let p = sample_point();
        let json = serde_json::to_string(&p).unwrap();
        let deser: PricePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, deser);
    }
}
