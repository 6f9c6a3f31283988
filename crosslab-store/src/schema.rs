//! Database schema definitions.

/// SQL to create all tables. Append-only: rows are inserted once per run
/// and never updated.
pub const CREATE_TABLES: &str = r#"
-- One row per backtest run
CREATE TABLE IF NOT EXISTS runs (
    run_id TEXT PRIMARY KEY,
    symbol TEXT NOT NULL,
    short_window INTEGER NOT NULL,
    long_window INTEGER NOT NULL,
    initial_equity REAL NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    final_strategy_equity REAL,
    final_benchmark_equity REAL,
    total_return REAL,
    cagr REAL,
    sharpe REAL,
    max_drawdown REAL,
    max_drawdown_days INTEGER,
    closed_trades INTEGER NOT NULL DEFAULT 0,
    open_trades INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER DEFAULT (strftime('%s', 'now'))
);

-- One row per trade; exit columns stay NULL for a position still open
-- at the end of the backtest
CREATE TABLE IF NOT EXISTS trades (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id TEXT NOT NULL REFERENCES runs(run_id),
    side TEXT NOT NULL,
    entry_date TEXT NOT NULL,
    entry_price REAL NOT NULL,
    exit_date TEXT,
    exit_price REAL,
    realized_return REAL
);

-- One row per date on the paired equity curves
CREATE TABLE IF NOT EXISTS equity (
    run_id TEXT NOT NULL REFERENCES runs(run_id),
    date TEXT NOT NULL,
    strategy REAL NOT NULL,
    benchmark REAL NOT NULL,
    PRIMARY KEY (run_id, date)
);

-- ========== INDEXES ==========

CREATE INDEX IF NOT EXISTS idx_runs_symbol ON runs(symbol);
CREATE INDEX IF NOT EXISTS idx_trades_run ON trades(run_id);
CREATE INDEX IF NOT EXISTS idx_equity_run ON equity(run_id)
"#;
