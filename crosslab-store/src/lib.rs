//! CrossLab Store — append-only SQLite sink for backtest output.
//!
//! One backtest run produces one batch: a `runs` row, its trade records,
//! and both equity curves. The store is a pure consumer — nothing here
//! ever feeds back into the engine, and a store failure never invalidates
//! results already computed in memory.
//!
//! SQLite is driven through sqlx, which is async; the rest of the
//! pipeline is synchronous and single-threaded, so the store owns a
//! current-thread Tokio runtime and exposes a blocking API.

pub mod schema;

use std::path::Path;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, Row};
use thiserror::Error;

use crosslab_core::domain::{EquityPoint, Trade, TradeSide};

/// Sink faults. Reported to the caller; the computed results stay valid.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store migration error: {0}")]
    Migration(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Summary row describing one backtest run.
///
/// Metric fields are `None` when the run had too little data to define
/// them (for example CAGR under one trading year of bars).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    pub symbol: String,
    pub short_window: i64,
    pub long_window: i64,
    pub initial_equity: f64,
    pub start_date: String,
    pub end_date: String,
    pub final_strategy_equity: Option<f64>,
    pub final_benchmark_equity: Option<f64>,
    pub total_return: Option<f64>,
    pub cagr: Option<f64>,
    pub sharpe: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub max_drawdown_days: Option<i64>,
    pub closed_trades: i64,
    pub open_trades: i64,
}

/// A trade row read back from the store (dates as ISO text).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredTrade {
    pub run_id: String,
    pub side: String,
    pub entry_date: String,
    pub entry_price: f64,
    pub exit_date: Option<String>,
    pub exit_price: Option<f64>,
    pub realized_return: Option<f64>,
}

/// SQLite-backed backtest archive.
pub struct BacktestStore {
    pool: SqlitePool,
    runtime: tokio::runtime::Runtime,
}

impl BacktestStore {
    /// Open (creating if needed) the database at `path` and run migrations.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let url = format!("sqlite:{}?mode=rwc", path.display());
        Self::connect(&url, 5)
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> StoreResult<Self> {
        Self::connect("sqlite::memory:", 1)
    }

    fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::Connection(format!("tokio runtime: {e}")))?;

        let pool = runtime
            .block_on(
                SqlitePoolOptions::new()
                    .max_connections(max_connections)
                    .connect(url),
            )
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self { pool, runtime };
        store.run_migrations()?;
        store.configure_pragmas()?;
        Ok(store)
    }

    /// Run migrations (execute each statement individually).
    fn run_migrations(&self) -> StoreResult<()> {
        self.runtime.block_on(async {
            for statement in schema::CREATE_TABLES.split(';') {
                let sql: String = statement
                    .lines()
                    .filter(|line| !line.trim().starts_with("--"))
                    .collect::<Vec<_>>()
                    .join("\n");
                let sql = sql.trim();
                if sql.is_empty() {
                    continue;
                }
                sqlx::query(sql)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| StoreError::Migration(format!("{e}: {sql}")))?;
            }
            Ok(())
        })
    }

    /// WAL journal for concurrent readers; foreign keys on.
    fn configure_pragmas(&self) -> StoreResult<()> {
        self.runtime.block_on(async {
            for pragma in [
                "PRAGMA journal_mode=WAL",
                "PRAGMA synchronous=NORMAL",
                "PRAGMA foreign_keys=ON",
            ] {
                sqlx::query(pragma)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| StoreError::Connection(format!("{pragma} failed: {e}")))?;
            }
            Ok(())
        })
    }

    /// Append one run batch: summary row, trades, and equity points, in a
    /// single transaction.
    ///
    /// Returns `false` without writing anything when a run with the same
    /// id is already archived (identical config → identical run id — the
    /// schema is append-only, never overwritten).
    pub fn append_run(
        &self,
        record: &RunRecord,
        trades: &[Trade],
        equity: &[EquityPoint],
    ) -> StoreResult<bool> {
        self.runtime.block_on(async {
            let mut tx = self.pool.begin().await?;

            let inserted = sqlx::query(
                r#"
                INSERT OR IGNORE INTO runs (
                    run_id, symbol, short_window, long_window, initial_equity,
                    start_date, end_date,
                    final_strategy_equity, final_benchmark_equity,
                    total_return, cagr, sharpe, max_drawdown, max_drawdown_days,
                    closed_trades, open_trades
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&record.run_id)
            .bind(&record.symbol)
            .bind(record.short_window)
            .bind(record.long_window)
            .bind(record.initial_equity)
            .bind(&record.start_date)
            .bind(&record.end_date)
            .bind(record.final_strategy_equity)
            .bind(record.final_benchmark_equity)
            .bind(record.total_return)
            .bind(record.cagr)
            .bind(record.sharpe)
            .bind(record.max_drawdown)
            .bind(record.max_drawdown_days)
            .bind(record.closed_trades)
            .bind(record.open_trades)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if inserted == 0 {
                tx.rollback().await?;
                tracing::info!(run_id = %record.run_id, "run already archived, skipping");
                return Ok(false);
            }

            for trade in trades {
                let side = match trade.side {
                    TradeSide::Long => "long",
                    TradeSide::Short => "short",
                };
                sqlx::query(
                    r#"
                    INSERT INTO trades (
                        run_id, side, entry_date, entry_price,
                        exit_date, exit_price, realized_return
                    ) VALUES (?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&record.run_id)
                .bind(side)
                .bind(trade.entry_date.to_string())
                .bind(trade.entry_price)
                .bind(trade.exit_date.map(|d| d.to_string()))
                .bind(trade.exit_price)
                .bind(trade.realized_return())
                .execute(&mut *tx)
                .await?;
            }

            for point in equity {
                sqlx::query(
                    "INSERT INTO equity (run_id, date, strategy, benchmark) VALUES (?, ?, ?, ?)",
                )
                .bind(&record.run_id)
                .bind(point.date.to_string())
                .bind(point.strategy)
                .bind(point.benchmark)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;
            tracing::info!(
                run_id = %record.run_id,
                trades = trades.len(),
                equity_points = equity.len(),
                "archived run batch"
            );
            Ok(true)
        })
    }

    /// Number of archived runs.
    pub fn run_count(&self) -> StoreResult<i64> {
        self.runtime.block_on(async {
            let row = sqlx::query("SELECT COUNT(*) AS n FROM runs")
                .fetch_one(&self.pool)
                .await?;
            Ok(row.get::<i64, _>("n"))
        })
    }

    /// Trades archived for a run, in insertion (entry) order.
    pub fn trades_for_run(&self, run_id: &str) -> StoreResult<Vec<StoredTrade>> {
        self.runtime.block_on(async {
            let rows = sqlx::query_as::<_, StoredTrade>(
                r#"
                SELECT run_id, side, entry_date, entry_price,
                       exit_date, exit_price, realized_return
                FROM trades WHERE run_id = ? ORDER BY id
                "#,
            )
            .bind(run_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(rows)
        })
    }

    /// Number of archived equity points for a run.
    pub fn equity_count(&self, run_id: &str) -> StoreResult<i64> {
        self.runtime.block_on(async {
            let row = sqlx::query("SELECT COUNT(*) AS n FROM equity WHERE run_id = ?")
                .bind(run_id)
                .fetch_one(&self.pool)
                .await?;
            Ok(row.get::<i64, _>("n"))
        })
    }
}
