//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = (C[i-n+1] + ... + C[i]) / n
//! Warmup: first (n-1) bars have no value.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::price::PriceSeries;

/// Trailing simple moving average of closing prices.
///
/// The output always has one point per input price. A `period` of zero
/// yields no valid points.
pub fn calculate_sma(prices: &PriceSeries, period: usize) -> IndicatorSeries {
    let points = prices.points();
    let mut values = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        let value = if period > 0 && i + 1 >= period {
            Some(window_mean(points[i + 1 - period..=i].iter().map(|p| p.close)))
        } else {
            None
        };

        values.push(IndicatorPoint {
            date: point.date,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}

// Running mean: a window of identical closes averages to exactly that close.
fn window_mean(closes: impl Iterator<Item = f64>) -> f64 {
    let mut mean = 0.0;
    for (k, close) in closes.enumerate() {
        mean += (close - mean) / (k + 1) as f64;
    }
    mean
}
