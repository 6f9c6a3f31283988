//! Criterion benchmarks for the engine hot path.
//!
//! Benchmarks:
//! 1. SMA sliding-window computation at several window sizes
//! 2. Full backtest run (validation through trade extraction)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use crosslab_core::config::StrategyParams;
use crosslab_core::domain::PricePoint;
use crosslab_core::engine::run_backtest;
use crosslab_core::indicators::Sma;

fn make_prices(n: usize) -> Vec<PricePoint> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2000, 1, 3).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0 + i as f64 * 0.01;
            PricePoint::new(base_date + chrono::Duration::days(i as i64), close)
        })
        .collect()
}

fn bench_sma(c: &mut Criterion) {
    let prices = make_prices(10_000);
    let mut group = c.benchmark_group("sma");

    for period in [20usize, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(period), &period, |b, &period| {
            let sma = Sma::new(period);
            b.iter(|| black_box(sma.compute(black_box(&prices))));
        });
    }

    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_backtest");

    for n in [1_000usize, 10_000] {
        let prices = make_prices(n);
        let params = StrategyParams::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| black_box(run_backtest(black_box(&prices), &params).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sma, bench_full_run);
criterion_main!(benches);
