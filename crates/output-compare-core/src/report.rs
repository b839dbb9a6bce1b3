//! Report generation for comparison results.

use crate::runner::BatchReport;
use crate::types::Comparison;
use serde::Serialize;

/// Format for report output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown format: {s}. Valid formats: text, json")),
        }
    }
}

/// JSON report for a batch run, stamped with the time it was produced.
#[derive(Debug, Serialize)]
pub struct TimestampedReport<'a> {
    pub timestamp: &'a str,
    #[serde(flatten)]
    pub report: &'a BatchReport,
}

/// Generate a JSON report for a batch run.
#[must_use]
pub fn format_report_json(report: &BatchReport, timestamp: &str) -> String {
    let report = TimestampedReport { timestamp, report };
    serde_json::to_string_pretty(&report).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// Generate JSON for a single comparison.
#[must_use]
pub fn format_comparison_json(comparison: &Comparison) -> String {
    serde_json::to_string_pretty(comparison).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
}

/// One-line summary of a single comparison.
#[must_use]
pub fn format_comparison_text(comparison: &Comparison) -> String {
    if comparison.matched {
        format!("ok ({})", comparison.strategy)
    } else {
        format!("FAILED ({}): {}", comparison.strategy, comparison.message)
    }
}
