//! Configuration validation.
//!
//! Validates config fields before any signal is computed.

use crate::domain::error::MacrossError;
use crate::domain::signal::{DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DEFAULT_TOP_N: i64 = 10;

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    validate_windows(config)?;
    validate_top_n(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    validate_dates(config)?;
    validate_codes(config)?;
    Ok(())
}

fn validate_windows(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    let fast = strategy_int(config, "fast_window", DEFAULT_FAST_WINDOW as i64)?;
    let slow = strategy_int(config, "slow_window", DEFAULT_SLOW_WINDOW as i64)?;

    if fast <= 0 {
        return Err(MacrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "fast_window".to_string(),
            reason: "fast_window must be positive".to_string(),
        });
    }
    if slow <= 0 {
        return Err(MacrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "slow_window".to_string(),
            reason: "slow_window must be positive".to_string(),
        });
    }
    if fast >= slow {
        return Err(MacrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "fast_window".to_string(),
            reason: format!("fast_window ({fast}) must be less than slow_window ({slow})"),
        });
    }
    Ok(())
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    let value = strategy_int(config, "top_n", DEFAULT_TOP_N)?;
    if value < 1 {
        return Err(MacrossError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "top_n".to_string(),
            reason: "top_n must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// A `[strategy]` integer, or `default` when the key is absent. Values that
/// are present but not integers are errors.
pub fn strategy_int(
    config: &dyn ConfigPort,
    key: &str,
    default: i64,
) -> Result<i64, MacrossError> {
    Ok(config.get_int("strategy", key)?.unwrap_or(default))
}

/// Parse an optional `[data]` date key.
pub fn parse_optional_date(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, MacrossError> {
    match config.get_string("data", key) {
        None => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| MacrossError::ConfigInvalid {
                section: "data".to_string(),
                key: key.to_string(),
                reason: "invalid date format (expected YYYY-MM-DD)".to_string(),
            }),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    let start = parse_optional_date(config, "start_date")?;
    let end = parse_optional_date(config, "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(MacrossError::ConfigInvalid {
                section: "data".to_string(),
                key: "start_date".to_string(),
                reason: format!("start_date {start} is after end_date {end}"),
            });
        }
    }
    Ok(())
}

fn validate_codes(config: &dyn ConfigPort) -> Result<(), MacrossError> {
    if let Some(codes) = config.get_string("data", "codes") {
        if parse_codes(&codes).is_empty() {
            return Err(MacrossError::ConfigInvalid {
                section: "data".to_string(),
                key: "codes".to_string(),
                reason: "codes must list at least one code".to_string(),
            });
        }
    }
    Ok(())
}

/// Split a comma-separated code list, dropping blanks. Codes keep their case:
/// they name files on disk.
pub fn parse_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
