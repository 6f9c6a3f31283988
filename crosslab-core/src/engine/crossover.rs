//! Crossover signal derivation.

use crate::domain::Signal;

/// Derive the signal series from the two SMA series.
///
/// Defined exactly where both SMA values are defined: `Long` when the
/// short SMA is strictly above the long SMA, `Flat` otherwise. An exact
/// tie is `Flat` — strict `>` keeps the signal from oscillating when the
/// averages touch.
pub fn derive_signals(sma_short: &[f64], sma_long: &[f64]) -> Vec<Option<Signal>> {
    debug_assert_eq!(sma_short.len(), sma_long.len());

    sma_short
        .iter()
        .zip(sma_long)
        .map(|(&short, &long)| {
            if short.is_nan() || long.is_nan() {
                None
            } else if short > long {
                Some(Signal::Long)
            } else {
                Some(Signal::Flat)
            }
        })
        .collect()
}
