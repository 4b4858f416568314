//! Metrics reports and their text rendering.
//!
//! A [`MetricsReport`] is a titled, insertion-ordered list of named values
//! produced by some upstream backtest. Rendering never reorders, never
//! validates and never recomputes anything: it only formats.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Count(i64),
    /// Preformatted text, e.g. `"15.6%"`.
    Text(String),
}

impl MetricValue {
    /// Format a fraction as a one-decimal percentage (`0.156` -> `"15.6%"`).
    pub fn percent(fraction: f64) -> Self {
        MetricValue::Text(format!("{:.1}%", fraction * 100.0))
    }

    /// Integers become counts and other numbers become numbers, but only when
    /// they display back as the same text. Anything else (`1.250`, `+0145`,
    /// `1e3`, `15.6%`) is kept as text so it renders verbatim.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            if n.to_string() == trimmed {
                return MetricValue::Count(n);
            }
        }
        match trimmed.parse::<f64>() {
            Ok(x) if x.is_finite() && x.to_string() == trimmed => MetricValue::Number(x),
            _ => MetricValue::Text(trimmed.to_string()),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(x) => write!(f, "{}", x),
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(x: f64) -> Self {
        MetricValue::Number(x)
    }
}

impl From<i64> for MetricValue {
    fn from(n: i64) -> Self {
        MetricValue::Count(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(s: String) -> Self {
        MetricValue::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    title: String,
    entries: Vec<(String, MetricValue)>,
}

impl MetricsReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Builder form of [`MetricsReport::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Append a metric. Re-inserting an existing name replaces its value and
    /// keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<MetricValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    fn write_block(&self, out: &mut String) {
        out.push_str(&self.title);
        out.push_str(":\n");
        for (name, value) in self.iter() {
            out.push_str(&format!("{}: {}\n", name, value));
        }
    }
}

/// Render the summary block followed by the risk block.
pub fn render(summary: &MetricsReport, risk: &MetricsReport) -> String {
    render_blocks(&[summary, risk])
}

/// One block per report, in the given order, separated by a blank line.
pub fn render_blocks(reports: &[&MetricsReport]) -> String {
    let mut out = String::new();
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        report.write_block(&mut out);
    }
    out
}

pub fn render_monthly_returns(returns: &[f64]) -> String {
    let values: Vec<String> = returns.iter().map(|r| r.to_string()).collect();
    format!("Monthly returns (%): [{}]\n", values.join(", "))
}
