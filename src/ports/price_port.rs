//! Price data access port trait.

use crate::domain::error::MacrossError;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

pub trait PricePort {
    /// Closing prices for `code`, restricted to the inclusive date range when
    /// bounds are given.
    fn fetch_prices(
        &self,
        code: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PriceSeries, MacrossError>;

    fn list_codes(&self) -> Result<Vec<String>, MacrossError>;
}
