//! Ranking a universe of codes by crossover signal strength.

use crate::domain::signal::{CrossoverOutput, Signal};
use chrono::NaiveDate;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCode {
    pub code: String,
    /// (fast - slow) / slow at the last bar.
    pub strength: f64,
    pub last_date: NaiveDate,
}

/// Keep the `top_n` codes whose latest signal is long, strongest first.
///
/// Ties on strength are broken by code so the ranking is stable across runs.
pub fn rank_by_strength(candidates: &[(String, CrossoverOutput)], top_n: usize) -> Vec<RankedCode> {
    let mut ranked: Vec<RankedCode> = candidates
        .iter()
        .filter_map(|(code, output)| {
            let last = output.signal.last()?;
            if last.signal != Some(Signal::Long) {
                return None;
            }
            let strength = output.latest_strength()?;
            Some(RankedCode {
                code: code.clone(),
                strength,
                last_date: last.date,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.strength
            .partial_cmp(&a.strength)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.code.cmp(&b.code))
    });
    ranked.truncate(top_n);
    ranked
}
