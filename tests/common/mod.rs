#![allow(dead_code)]

use chrono::NaiveDate;
use macross::domain::error::MacrossError;
pub use macross::domain::price::{PricePoint, PriceSeries};
use macross::ports::price_port::PricePort;
use std::collections::BTreeMap;

pub struct MockPricePort {
    pub data: BTreeMap<String, Vec<PricePoint>>,
    pub errors: BTreeMap<String, String>,
}

impl MockPricePort {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn with_closes(mut self, code: &str, closes: &[f64]) -> Self {
        self.data
            .insert(code.to_string(), make_points("2020-01-01", closes));
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl PricePort for MockPricePort {
    fn fetch_prices(
        &self,
        code: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, MacrossError> {
        if let Some(reason) = self.errors.get(code) {
            return Err(MacrossError::Data {
                reason: reason.clone(),
            });
        }
        let points: Vec<PricePoint> = self
            .data
            .get(code)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|p| start_date.is_none_or(|s| p.date >= s))
            .filter(|p| end_date.is_none_or(|e| p.date <= e))
            .collect();
        PriceSeries::new(points)
    }

    fn list_codes(&self) -> Result<Vec<String>, MacrossError> {
        Ok(self
            .data
            .keys()
            .chain(self.errors.keys())
            .cloned()
            .collect())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_points(start_date: &str, closes: &[f64]) -> Vec<PricePoint> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: start + chrono::Duration::days(i as i64),
            close,
        })
        .collect()
}

pub fn make_series(closes: &[f64]) -> PriceSeries {
    PriceSeries::new(make_points("2020-01-01", closes)).unwrap()
}

/// Linear ramp of `count` closes starting at `start_price`.
pub fn ramp(count: usize, start_price: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start_price + step * i as f64).collect()
}

pub fn write_price_csv(dir: &std::path::Path, code: &str, closes: &[f64]) {
    let mut content = String::from("date,close\n");
    for point in make_points("2020-01-01", closes) {
        content.push_str(&format!("{},{}\n", point.date, point.close));
    }
    std::fs::write(dir.join(format!("{code}.csv")), content).unwrap();
}
