//! Domain types for CrossLab.

pub mod equity;
pub mod price;
pub mod signal;
pub mod trade;

pub use equity::EquityPoint;
pub use price::PricePoint;
pub use signal::Signal;
pub use trade::{Trade, TradeSide};

/// Symbol type alias
pub type Symbol = String;
