//! Runner integration tests with a mock provider.

use chrono::NaiveDate;
use crosslab_core::config::StrategyParams;
use crosslab_core::data::{DataError, DataProvider, FetchResult};
use crosslab_core::data::provider::DataSource;
use crosslab_core::domain::PricePoint;
use crosslab_runner::{run_single_backtest, RunConfig, RunError, SCHEMA_VERSION};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Provider serving a fixed in-memory series.
struct FixedProvider {
    prices: Vec<PricePoint>,
}

impl DataProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn fetch(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        Ok(FetchResult {
            symbol: symbol.to_string(),
            prices: self.prices.clone(),
            source: DataSource::CsvImport,
        })
    }
}

/// Provider that fails every fetch.
struct FailingProvider;

impl DataProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn fetch(
        &self,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        Err(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        })
    }
}

/// Provider that must never be reached.
struct UnreachableProvider;

impl DataProvider for UnreachableProvider {
    fn name(&self) -> &str {
        "unreachable"
    }

    fn fetch(
        &self,
        _symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        panic!("provider must not be called for an invalid config");
    }
}

fn reference_prices() -> Vec<PricePoint> {
    let base = date(2024, 1, 2);
    [
        10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 9.0, 9.0, 9.0, 9.0, 9.0,
    ]
    .iter()
    .enumerate()
    .map(|(i, &close)| PricePoint::new(base + chrono::Duration::days(i as i64), close))
    .collect()
}

fn reference_config() -> RunConfig {
    RunConfig {
        symbol: "TEST".into(),
        start_date: date(2024, 1, 2),
        end_date: date(2024, 1, 16),
        params: StrategyParams::new(3, 5),
    }
}

#[test]
fn full_pipeline_produces_consistent_report() {
    let provider = FixedProvider {
        prices: reference_prices(),
    };
    let config = reference_config();
    let report = run_single_backtest(&config, &provider).unwrap();

    assert_eq!(report.schema_version, SCHEMA_VERSION);
    assert_eq!(report.run_id, config.run_id());
    assert_eq!(report.symbol, "TEST");
    assert_eq!(report.bar_count, 15);
    assert_eq!(report.equity_curve.len(), 15);
    assert_eq!(report.trades.len(), 1);

    // Stats agree with the underlying curves.
    let last = report.equity_curve.last().unwrap();
    assert!((report.stats.final_equity - last.strategy).abs() < 1e-12);
    assert!((report.stats.final_benchmark_equity - last.benchmark).abs() < 1e-12);
    assert!((report.stats.total_return - (last.strategy - 1.0)).abs() < 1e-12);
    assert_eq!(report.stats.closed_trades, 1);
    assert_eq!(report.stats.open_trades, 0);
    // 14 return observations: far below a trading year.
    assert_eq!(report.stats.cagr, None);
}

#[test]
fn config_fault_aborts_before_any_fetch() {
    let mut config = reference_config();
    config.params = StrategyParams::new(50, 20); // inverted windows

    let err = run_single_backtest(&config, &UnreachableProvider).unwrap_err();
    assert!(matches!(err, RunError::Config(_)));
}

#[test]
fn fetch_fault_surfaces_as_run_failure() {
    let err = run_single_backtest(&reference_config(), &FailingProvider).unwrap_err();
    assert!(matches!(err, RunError::Fetch(DataError::SymbolNotFound { .. })));
}

#[test]
fn corrupt_series_is_an_integrity_fault() {
    let mut prices = reference_prices();
    prices[3].close = 0.0;
    let provider = FixedProvider { prices };

    let err = run_single_backtest(&reference_config(), &provider).unwrap_err();
    assert!(matches!(err, RunError::Integrity(_)));
}

#[test]
fn identical_configs_share_a_run_id_distinct_ones_do_not() {
    let provider = FixedProvider {
        prices: reference_prices(),
    };
    let config = reference_config();

    let a = run_single_backtest(&config, &provider).unwrap();
    let b = run_single_backtest(&config, &provider).unwrap();
    assert_eq!(a.run_id, b.run_id);

    let mut other = config.clone();
    other.params.short_window = 2;
    let c = run_single_backtest(&other, &provider).unwrap();
    assert_ne!(a.run_id, c.run_id);
}

#[test]
fn single_point_fetch_yields_empty_report_not_fault() {
    let provider = FixedProvider {
        prices: vec![PricePoint::new(date(2024, 1, 2), 100.0)],
    };
    let mut config = reference_config();
    config.params = StrategyParams::default(); // 20/50

    let report = run_single_backtest(&config, &provider).unwrap();
    assert_eq!(report.bar_count, 1);
    assert!(report.equity_curve.is_empty());
    assert!(report.trades.is_empty());
    assert_eq!(report.stats.final_equity, 1.0);
    assert_eq!(report.stats.total_return, 0.0);
    assert_eq!(report.stats.sharpe, None);
}
