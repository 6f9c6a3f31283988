//! CrossLab Core — SMA crossover backtesting engine.
//!
//! This crate contains the heart of the system:
//! - Domain types (price points, signals, trades, equity points)
//! - SMA derivation with a sliding-window running sum
//! - Crossover signal and one-bar-lagged position derivation
//! - Per-bar return and equity curve computation
//! - Trade extraction from the position series
//! - Data providers (Yahoo Finance, CSV import)
//!
//! The engine is a pure function of (price series, strategy parameters):
//! it holds no state across invocations and performs no I/O. Everything
//! that blocks — fetching prices, writing sinks — lives at the boundary,
//! in `data` here and in the runner/store crates.

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
