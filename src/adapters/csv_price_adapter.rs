//! CSV file price adapter.
//!
//! One file per code, `<base>/<code>.csv`, with a header row naming at least
//! a `date` (YYYY-MM-DD) and a `close` column. Any other columns are ignored,
//! so full OHLCV exports load as-is.

use crate::domain::error::MacrossError;
use crate::domain::price::{PricePoint, PriceSeries};
use crate::ports::price_port::PricePort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvPriceAdapter {
    base_path: PathBuf,
}

impl CsvPriceAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, code: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", code))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

impl PricePort for CsvPriceAdapter {
    fn fetch_prices(
        &self,
        code: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, MacrossError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| MacrossError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| MacrossError::Data {
            reason: format!("CSV header error in {}: {}", path.display(), e),
        })?;
        let date_col = column_index(headers, "date").ok_or_else(|| MacrossError::Data {
            reason: format!("{}: missing date column", path.display()),
        })?;
        let close_col = column_index(headers, "close").ok_or_else(|| MacrossError::Data {
            reason: format!("{}: missing close column", path.display()),
        })?;

        let mut points = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| MacrossError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_col).unwrap_or_default().trim();
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                MacrossError::Data {
                    reason: format!("row {}: invalid date {:?}: {}", row + 1, date_str, e),
                }
            })?;

            if start_date.is_some_and(|start| date < start)
                || end_date.is_some_and(|end| date > end)
            {
                continue;
            }

            let close_str = record.get(close_col).unwrap_or_default().trim();
            let close: f64 = close_str.parse().map_err(|e| MacrossError::Data {
                reason: format!("row {}: invalid close {:?}: {}", row + 1, close_str, e),
            })?;

            points.push(PricePoint { date, close });
        }

        if points.is_empty() {
            return Err(MacrossError::Data {
                reason: format!("no prices for {} in the requested range", code),
            });
        }

        points.sort_by_key(|p| p.date);
        PriceSeries::new(points)
    }

    fn list_codes(&self) -> Result<Vec<String>, MacrossError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| MacrossError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut codes = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| MacrossError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem() {
                    codes.push(stem.to_string_lossy().into_owned());
                }
            }
        }

        codes.sort();
        Ok(codes)
    }
}
