//! Series integrity validation.
//!
//! The engine refuses to compute over a corrupt series: a non-positive or
//! non-finite close would otherwise surface as NaN equity values far
//! downstream of the actual defect.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::PricePoint;

/// Data-integrity faults. Any of these aborts the run.
#[derive(Debug, Error, PartialEq)]
pub enum IntegrityError {
    #[error("non-positive close {close} at {date}")]
    NonPositiveClose { date: NaiveDate, close: f64 },

    #[error("non-finite close at {date}")]
    NonFiniteClose { date: NaiveDate },

    #[error("dates not strictly increasing: {prev} is followed by {next}")]
    NonMonotonicDates { prev: NaiveDate, next: NaiveDate },
}

/// Check that a fetched series is usable: strictly increasing dates and
/// finite, positive closes. Duplicate dates fail the monotonicity check.
pub fn validate_series(prices: &[PricePoint]) -> Result<(), IntegrityError> {
    for point in prices {
        if !point.close.is_finite() {
            return Err(IntegrityError::NonFiniteClose { date: point.date });
        }
        if point.close <= 0.0 {
            return Err(IntegrityError::NonPositiveClose {
                date: point.date,
                close: point.close,
            });
        }
    }

    for pair in prices.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(IntegrityError::NonMonotonicDates {
                prev: pair[0].date,
                next: pair[1].date,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn accepts_clean_series() {
        let prices = vec![
            PricePoint::new(date(2), 100.0),
            PricePoint::new(date(3), 101.5),
            PricePoint::new(date(5), 99.0), // gap is fine
        ];
        assert!(validate_series(&prices).is_ok());
    }

    #[test]
    fn accepts_empty_series() {
        assert!(validate_series(&[]).is_ok());
    }

    #[test]
    fn rejects_zero_close() {
        let prices = vec![
            PricePoint::new(date(2), 100.0),
            PricePoint::new(date(3), 0.0),
        ];
        assert_eq!(
            validate_series(&prices),
            Err(IntegrityError::NonPositiveClose {
                date: date(3),
                close: 0.0
            })
        );
    }

    #[test]
    fn rejects_nan_close() {
        let prices = vec![PricePoint::new(date(2), f64::NAN)];
        assert_eq!(
            validate_series(&prices),
            Err(IntegrityError::NonFiniteClose { date: date(2) })
        );
    }

    #[test]
    fn rejects_duplicate_dates() {
        let prices = vec![
            PricePoint::new(date(2), 100.0),
            PricePoint::new(date(2), 101.0),
        ];
        assert!(matches!(
            validate_series(&prices),
            Err(IntegrityError::NonMonotonicDates { .. })
        ));
    }

    #[test]
    fn rejects_descending_dates() {
        let prices = vec![
            PricePoint::new(date(5), 100.0),
            PricePoint::new(date(2), 101.0),
        ];
        assert!(matches!(
            validate_series(&prices),
            Err(IntegrityError::NonMonotonicDates { .. })
        ));
    }
}
