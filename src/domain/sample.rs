//! Fixed sample figures used when no upstream backtest output is supplied.
//!
//! These numbers illustrate the shape of a report; they are not derived
//! from any price data.

use crate::domain::report::MetricsReport;

pub const SAMPLE_CODES: [&str; 5] = [
    "000001.SZ",
    "000002.SZ",
    "600000.SH",
    "600036.SH",
    "000858.SZ",
];

pub const SAMPLE_MONTHLY_RETURNS: [f64; 12] =
    [2.1, -1.5, 3.2, 0.8, -2.1, 4.5, 1.2, -0.8, 2.8, 1.1, 0.5, 3.1];

pub fn sample_summary() -> MetricsReport {
    MetricsReport::new("Backtest summary")
        .with("Total return", "15.6%")
        .with("Annualized return", "7.8%")
        .with("Max drawdown", "-8.2%")
        .with("Sharpe ratio", 1.25)
        .with("Win rate", "58.3%")
        .with("Trade count", 145_i64)
}

pub fn sample_risk() -> MetricsReport {
    MetricsReport::new("Risk metrics")
        .with("Volatility", "12.8%")
        .with("Beta", 0.85)
        .with("Information ratio", 0.42)
        .with("Tracking error", "4.2%")
        .with("Max consecutive losses", 3_i64)
        .with("VaR(95%)", "-2.1%")
}
