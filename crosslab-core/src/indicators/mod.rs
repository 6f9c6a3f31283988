//! Derived series over a price history.

pub mod sma;

pub use sma::Sma;
