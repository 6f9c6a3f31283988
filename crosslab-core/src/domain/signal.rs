//! Signal — the intended position as of a bar's close.

use serde::{Deserialize, Serialize};

/// Intended position computed from information available at a day's close.
///
/// `Long` when the short SMA is strictly above the long SMA; `Flat`
/// otherwise, including on an exact tie. A signal is never acted on the
/// day it is computed — the position series shifts it forward one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Long,
    Flat,
}

impl Signal {
    pub fn is_long(self) -> bool {
        matches!(self, Signal::Long)
    }
}
