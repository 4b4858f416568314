//! Closing price series.

use crate::domain::error::MacrossError;
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Closing prices keyed by strictly increasing dates. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self, MacrossError> {
        if points.is_empty() {
            return Err(MacrossError::InvalidSeries {
                reason: "series must contain at least one price".into(),
            });
        }

        for (i, point) in points.iter().enumerate() {
            if !point.close.is_finite() {
                return Err(MacrossError::InvalidSeries {
                    reason: format!("non-finite close {} on {}", point.close, point.date),
                });
            }
            if i > 0 && point.date <= points[i - 1].date {
                return Err(MacrossError::InvalidSeries {
                    reason: format!(
                        "dates must be strictly increasing ({} follows {})",
                        point.date,
                        points[i - 1].date
                    ),
                });
            }
        }

        Ok(Self { points })
    }

    /// Build a series of consecutive calendar days starting at `start`.
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Result<Self, MacrossError> {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + chrono::Duration::days(i as i64),
                close,
            })
            .collect();
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    // Indexing relies on the non-empty invariant enforced by `new`.
    pub fn first_date(&self) -> NaiveDate {
        self.points[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].date
    }
}
