//! Position derivation — the look-ahead guard.
//!
//! A signal is computed from a day's close and therefore cannot be acted
//! on during that day's session. The position series is the signal series
//! shifted forward by exactly one index: `position[i] = signal[i - 1]`.
//! The shift is a pure vector operation, not a stateful "yesterday's
//! signal" variable, so the series boundaries cannot pick up off-by-one
//! errors.

use crate::domain::Signal;

/// Shift the signal series forward one bar.
///
/// `position[0]` is always undefined. Where the prior bar has no signal
/// yet, the position stays undefined rather than looking further back;
/// every consumer treats undefined as flat.
pub fn lag_positions(signals: &[Option<Signal>]) -> Vec<Option<Signal>> {
    let mut positions = Vec::with_capacity(signals.len());
    if signals.is_empty() {
        return positions;
    }
    positions.push(None);
    positions.extend_from_slice(&signals[..signals.len() - 1]);
    positions
}

/// Whether an entry of the position series earns the market return.
pub fn is_long(position: Option<Signal>) -> bool {
    position == Some(Signal::Long)
}
