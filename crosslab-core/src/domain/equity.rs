//! EquityPoint — one date on the paired strategy/benchmark curves.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Strategy and benchmark equity on a single date.
///
/// Both curves are seeded at the configured initial equity and compound
/// daily returns: the benchmark always, the strategy only while the lagged
/// position is long. The two series are kept in one point so they can
/// never drift out of alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub strategy: f64,
    pub benchmark: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equity_point_serialization_roundtrip() {
        let point = EquityPoint {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            strategy: 1.25,
            benchmark: 1.1,
        };
        let json = serde_json::to_string(&point).unwrap();
        let deser: EquityPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(point, deser);
    }
}
