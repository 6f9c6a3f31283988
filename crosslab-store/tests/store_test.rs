//! Store integration tests against an in-memory database.

use chrono::NaiveDate;
use crosslab_core::domain::{EquityPoint, Trade};
use crosslab_store::{BacktestStore, RunRecord};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_record(run_id: &str) -> RunRecord {
    RunRecord {
        run_id: run_id.to_string(),
        symbol: "NVDA".into(),
        short_window: 20,
        long_window: 50,
        initial_equity: 1.0,
        start_date: "2020-01-02".into(),
        end_date: "2024-12-31".into(),
        final_strategy_equity: Some(1.42),
        final_benchmark_equity: Some(1.61),
        total_return: Some(0.42),
        cagr: Some(0.073),
        sharpe: Some(0.9),
        max_drawdown: Some(0.18),
        max_drawdown_days: Some(63),
        closed_trades: 2,
        open_trades: 1,
    }
}

fn sample_batch() -> (Vec<Trade>, Vec<EquityPoint>) {
    let mut closed = Trade::open_long(date(2020, 3, 2), 100.0);
    closed.close(date(2020, 6, 1), 118.0);
    let open = Trade::open_long(date(2024, 10, 1), 130.0);

    let equity = vec![
        EquityPoint {
            date: date(2020, 1, 2),
            strategy: 1.0,
            benchmark: 1.0,
        },
        EquityPoint {
            date: date(2020, 1, 3),
            strategy: 1.0,
            benchmark: 1.01,
        },
    ];
    (vec![closed, open], equity)
}

#[test]
fn append_and_read_back_batch() {
    let store = BacktestStore::in_memory().unwrap();
    let (trades, equity) = sample_batch();

    let inserted = store
        .append_run(&sample_record("run-1"), &trades, &equity)
        .unwrap();
    assert!(inserted);

    assert_eq!(store.run_count().unwrap(), 1);
    assert_eq!(store.equity_count("run-1").unwrap(), 2);

    let stored = store.trades_for_run("run-1").unwrap();
    assert_eq!(stored.len(), 2);

    // Closed trade round-trips its exit columns.
    assert_eq!(stored[0].entry_date, "2020-03-02");
    assert_eq!(stored[0].exit_date.as_deref(), Some("2020-06-01"));
    assert!((stored[0].realized_return.unwrap() - 0.18).abs() < 1e-12);

    // Open trade keeps NULL exit columns.
    assert_eq!(stored[1].exit_date, None);
    assert_eq!(stored[1].exit_price, None);
    assert_eq!(stored[1].realized_return, None);
}

#[test]
fn duplicate_run_id_is_skipped_not_overwritten() {
    let store = BacktestStore::in_memory().unwrap();
    let (trades, equity) = sample_batch();
    let record = sample_record("run-dup");

    assert!(store.append_run(&record, &trades, &equity).unwrap());
    assert!(!store.append_run(&record, &trades, &equity).unwrap());

    // Nothing from the second batch landed.
    assert_eq!(store.run_count().unwrap(), 1);
    assert_eq!(store.trades_for_run("run-dup").unwrap().len(), 2);
    assert_eq!(store.equity_count("run-dup").unwrap(), 2);
}

#[test]
fn distinct_runs_append_side_by_side() {
    let store = BacktestStore::in_memory().unwrap();
    let (trades, equity) = sample_batch();

    assert!(store
        .append_run(&sample_record("run-a"), &trades, &equity)
        .unwrap());
    assert!(store
        .append_run(&sample_record("run-b"), &trades, &equity)
        .unwrap());

    assert_eq!(store.run_count().unwrap(), 2);
    assert_eq!(store.trades_for_run("run-a").unwrap().len(), 2);
    assert_eq!(store.trades_for_run("run-b").unwrap().len(), 2);
}

#[test]
fn open_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archive").join("backtests.db");

    let store = BacktestStore::open(&path).unwrap();
    let (trades, equity) = sample_batch();
    assert!(store
        .append_run(&sample_record("run-file"), &trades, &equity)
        .unwrap());

    assert!(path.exists());
    assert_eq!(store.run_count().unwrap(), 1);
}
