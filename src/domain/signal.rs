//! Moving-average crossover signal generation.
//!
//! The signal is long (1) while the fast SMA sits strictly above the slow SMA
//! and flat (0) otherwise. Positions where either average is still warming up
//! carry no signal at all.

use crate::domain::error::MacrossError;
use crate::domain::indicator::IndicatorSeries;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;
use std::fmt;

pub const DEFAULT_FAST_WINDOW: usize = 5;
pub const DEFAULT_SLOW_WINDOW: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    Flat,
    Long,
}

impl Signal {
    pub fn as_u8(self) -> u8 {
        match self {
            Signal::Flat => 0,
            Signal::Long => 1,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPoint {
    pub date: NaiveDate,
    pub signal: Option<Signal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalSeries {
    pub values: Vec<SignalPoint>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn signal_at(&self, index: usize) -> Option<Signal> {
        self.values.get(index).and_then(|p| p.signal)
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|p| p.signal.is_some()).count()
    }

    pub fn last(&self) -> Option<&SignalPoint> {
        self.values.last()
    }
}

/// Fast/slow window pair. Construct through [`CrossoverParams::new`] to get
/// the ordering check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverParams {
    pub fast_window: usize,
    pub slow_window: usize,
}

impl CrossoverParams {
    pub fn new(fast_window: usize, slow_window: usize) -> Result<Self, MacrossError> {
        if fast_window == 0 {
            return Err(MacrossError::InvalidParameter {
                name: "fast_window".into(),
                reason: "must be positive".into(),
            });
        }
        if slow_window == 0 {
            return Err(MacrossError::InvalidParameter {
                name: "slow_window".into(),
                reason: "must be positive".into(),
            });
        }
        if fast_window >= slow_window {
            return Err(MacrossError::InvalidParameter {
                name: "fast_window".into(),
                reason: format!(
                    "must be less than slow_window ({} >= {})",
                    fast_window, slow_window
                ),
            });
        }
        Ok(Self {
            fast_window,
            slow_window,
        })
    }
}

impl Default for CrossoverParams {
    fn default() -> Self {
        Self {
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
        }
    }
}

/// The signal together with the two averages it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverOutput {
    pub signal: SignalSeries,
    pub fast: IndicatorSeries,
    pub slow: IndicatorSeries,
}

impl CrossoverOutput {
    /// True when at least one position carries a signal.
    pub fn is_sufficient(&self) -> bool {
        self.signal.defined_count() > 0
    }

    pub fn require_sufficient(&self) -> Result<(), MacrossError> {
        if self.is_sufficient() {
            Ok(())
        } else {
            Err(MacrossError::InsufficientData {
                bars: self.signal.len(),
                minimum: self.slow.indicator_type.warmup() + 1,
            })
        }
    }

    /// (fast - slow) / slow at the last bar, if both averages are defined there.
    pub fn latest_strength(&self) -> Option<f64> {
        let last = self.signal.len().checked_sub(1)?;
        let fast = self.fast.value_at(last)?;
        let slow = self.slow.value_at(last)?;
        if slow == 0.0 {
            return None;
        }
        Some((fast - slow) / slow)
    }
}

/// Compute the crossover signal for `prices`.
///
/// Fails only on a bad window pair. A series shorter than the slow window is
/// not an error: every position of the result is simply undefined.
pub fn generate(
    prices: &PriceSeries,
    fast_window: usize,
    slow_window: usize,
) -> Result<CrossoverOutput, MacrossError> {
    let params = CrossoverParams::new(fast_window, slow_window)?;
    Ok(generate_with(prices, params))
}

pub fn generate_with(prices: &PriceSeries, params: CrossoverParams) -> CrossoverOutput {
    let fast = calculate_sma(prices, params.fast_window);
    let slow = calculate_sma(prices, params.slow_window);

    let values = prices
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let signal = match (fast.value_at(i), slow.value_at(i)) {
                (Some(f), Some(s)) if f > s => Some(Signal::Long),
                (Some(_), Some(_)) => Some(Signal::Flat),
                _ => None,
            };
            SignalPoint {
                date: point.date,
                signal,
            }
        })
        .collect();

    CrossoverOutput {
        signal: SignalSeries { values },
        fast,
        slow,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverKind {
    /// Fast average moved above the slow one.
    GoldenCross,
    /// Fast average fell back to or below the slow one.
    DeathCross,
}

impl fmt::Display for CrossoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverKind::GoldenCross => write!(f, "golden cross (buy)"),
            CrossoverKind::DeathCross => write!(f, "death cross (sell)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverEvent {
    pub date: NaiveDate,
    pub kind: CrossoverKind,
}

/// Signal transitions between consecutive defined positions.
pub fn crossover_events(signal: &SignalSeries) -> Vec<CrossoverEvent> {
    let mut events = Vec::new();
    let mut prev: Option<Signal> = None;

    for point in &signal.values {
        let Some(current) = point.signal else {
            continue;
        };
        match (prev, current) {
            (Some(Signal::Flat), Signal::Long) => events.push(CrossoverEvent {
                date: point.date,
                kind: CrossoverKind::GoldenCross,
            }),
            (Some(Signal::Long), Signal::Flat) => events.push(CrossoverEvent {
                date: point.date,
                kind: CrossoverKind::DeathCross,
            }),
            _ => {}
        }
        prev = Some(current);
    }

    events
}
