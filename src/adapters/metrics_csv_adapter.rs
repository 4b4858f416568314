//! Loads a metrics report from a `name,value` CSV file.
//!
//! Row order in the file is the display order.

use crate::domain::error::MacrossError;
use crate::domain::report::{MetricValue, MetricsReport};
use std::fs;
use std::path::Path;

pub fn load_metrics_csv<P: AsRef<Path>>(
    path: P,
    title: &str,
) -> Result<MetricsReport, MacrossError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| MacrossError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    parse_metrics_csv(&content, title).map_err(|e| match e {
        MacrossError::Data { reason } => MacrossError::Data {
            reason: format!("{}: {}", path.display(), reason),
        },
        other => other,
    })
}

pub fn parse_metrics_csv(content: &str, title: &str) -> Result<MetricsReport, MacrossError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut report = MetricsReport::new(title);

    for (row, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| MacrossError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;

        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            return Err(MacrossError::Data {
                reason: format!("row {}: empty metric name", row + 1),
            });
        }
        let value = record.get(1).ok_or_else(|| MacrossError::Data {
            reason: format!("row {}: missing value for {}", row + 1, name),
        })?;

        report.insert(name, MetricValue::parse(value));
    }

    Ok(report)
}
