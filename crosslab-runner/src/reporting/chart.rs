//! Equity chart rendering (static SVG).
//!
//! Plots the strategy and buy-and-hold curves as two polylines with axes
//! and a legend. The chart is generated as formatted text — no canvas, no
//! interactivity — so it can be archived next to the other artifacts and
//! opened in any browser.

use anyhow::{Context, Result};
use std::path::Path;

use crate::result::BacktestReport;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 540.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 50.0;

const STRATEGY_COLOR: &str = "#2a7de1";
const BENCHMARK_COLOR: &str = "#888888";

/// Minimal XML text escaping for labels that may carry `&`, `<`, `>`.
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Render the report's equity curves to an SVG document.
pub fn render_chart_svg(report: &BacktestReport) -> String {
    let title = xml_escape(&format!(
        "{} SMA Crossover ({}/{}) vs Buy & Hold",
        report.symbol, report.params.short_window, report.params.long_window
    ));

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="white"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{}" y="28" font-size="18" text-anchor="middle">{title}</text>"#,
        WIDTH / 2.0
    ));
    svg.push('\n');

    if report.equity_curve.len() < 2 {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="14" text-anchor="middle" fill="#666">no equity data for this run</text>"#,
            WIDTH / 2.0,
            HEIGHT / 2.0
        ));
        svg.push_str("\n</svg>\n");
        return svg;
    }

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let n = report.equity_curve.len();

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for point in &report.equity_curve {
        y_min = y_min.min(point.strategy).min(point.benchmark);
        y_max = y_max.max(point.strategy).max(point.benchmark);
    }
    let padding = ((y_max - y_min) * 0.05).max(y_max.abs() * 0.01).max(1e-9);
    y_min -= padding;
    y_max += padding;

    let x_at = |i: usize| MARGIN_LEFT + plot_w * i as f64 / (n - 1) as f64;
    let y_at = |v: f64| MARGIN_TOP + plot_h * (1.0 - (v - y_min) / (y_max - y_min));

    // Horizontal gridlines with y-axis tick labels.
    for tick in 0..=4 {
        let value = y_min + (y_max - y_min) * tick as f64 / 4.0;
        let y = y_at(value);
        svg.push_str(&format!(
            r#"<line x1="{MARGIN_LEFT}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#ddd"/>"#,
            MARGIN_LEFT + plot_w
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" fill="#444">{value:.2}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0
        ));
        svg.push('\n');
    }

    // X-axis date labels: first, middle, last.
    for &i in &[0usize, n / 2, n - 1] {
        let x = x_at(i);
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{:.1}" font-size="11" text-anchor="middle" fill="#444">{}</text>"#,
            HEIGHT - MARGIN_BOTTOM + 20.0,
            report.equity_curve[i].date
        ));
        svg.push('\n');
    }

    // Axis lines.
    svg.push_str(&format!(
        r#"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{:.1}" stroke="#444"/>"#,
        MARGIN_TOP + plot_h
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<line x1="{MARGIN_LEFT}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#444"/>"#,
        MARGIN_TOP + plot_h,
        MARGIN_LEFT + plot_w,
        MARGIN_TOP + plot_h
    ));
    svg.push('\n');

    // The two curves.
    for (values, color, label) in [
        (
            report
                .equity_curve
                .iter()
                .map(|p| p.benchmark)
                .collect::<Vec<_>>(),
            BENCHMARK_COLOR,
            "benchmark",
        ),
        (
            report
                .equity_curve
                .iter()
                .map(|p| p.strategy)
                .collect::<Vec<_>>(),
            STRATEGY_COLOR,
            "strategy",
        ),
    ] {
        let points: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| format!("{:.1},{:.1}", x_at(i), y_at(v)))
            .collect();
        svg.push_str(&format!(
            r#"<polyline id="{label}" points="{}" fill="none" stroke="{color}" stroke-width="1.5"/>"#,
            points.join(" ")
        ));
        svg.push('\n');
    }

    // Legend.
    let legend_x = MARGIN_LEFT + 12.0;
    let legend_y = MARGIN_TOP + 16.0;
    let entries = [
        (
            format!(
                "Strategy (SMA {}/{})",
                report.params.short_window, report.params.long_window
            ),
            STRATEGY_COLOR,
        ),
        ("Buy & Hold".to_string(), BENCHMARK_COLOR),
    ];
    for (row, (label, color)) in entries.iter().enumerate() {
        let y = legend_y + row as f64 * 18.0;
        svg.push_str(&format!(
            r#"<line x1="{legend_x:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"#,
            legend_x + 24.0
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="12" fill="#222">{}</text>"#,
            legend_x + 32.0,
            y + 4.0,
            xml_escape(label)
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write the chart next to the run's other artifacts.
pub fn write_chart_svg(path: &Path, report: &BacktestReport) -> Result<()> {
    let svg = render_chart_svg(report);
    std::fs::write(path, svg)
        .with_context(|| format!("Failed to write chart SVG {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::runner::run_backtest_from_prices;
    use chrono::NaiveDate;
    use crosslab_core::config::StrategyParams;
    use crosslab_core::domain::PricePoint;

    fn sample_report() -> BacktestReport {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let prices: Vec<PricePoint> = [
            10.0, 10.0, 10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 9.0, 9.0, 9.0, 9.0, 9.0,
        ]
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(base + chrono::Duration::days(i as i64), close))
        .collect();

        let config = RunConfig {
            symbol: "TEST".into(),
            start_date: prices[0].date,
            end_date: prices.last().unwrap().date,
            params: StrategyParams::new(3, 5),
        };
        run_backtest_from_prices(&config, &prices).unwrap()
    }

    #[test]
    fn chart_contains_both_curves_and_legend() {
        let svg = render_chart_svg(&sample_report());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"id="strategy""#));
        assert!(svg.contains(r#"id="benchmark""#));
        assert!(svg.contains("Strategy (SMA 3/5)"));
        assert!(svg.contains("Buy &amp; Hold"));
        assert!(svg.contains("TEST SMA Crossover (3/5) vs Buy &amp; Hold"));
    }

    #[test]
    fn chart_handles_empty_curve() {
        let mut report = sample_report();
        report.equity_curve.clear();
        let svg = render_chart_svg(&report);
        assert!(svg.contains("no equity data"));
        assert!(!svg.contains("polyline"));
    }

    #[test]
    fn chart_points_stay_inside_viewbox() {
        let svg = render_chart_svg(&sample_report());
        for part in svg.split("points=\"").skip(1) {
            let coords = part.split('"').next().unwrap();
            for pair in coords.split_whitespace() {
                let (x, y) = pair.split_once(',').unwrap();
                let x: f64 = x.parse().unwrap();
                let y: f64 = y.parse().unwrap();
                assert!((0.0..=WIDTH).contains(&x));
                assert!((0.0..=HEIGHT).contains(&y));
            }
        }
    }
}
