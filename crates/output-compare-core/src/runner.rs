//! Sequential batch runner over loaded cases.

use crate::cases::Case;
use crate::comparator::Comparator;
use crate::sink::DiagnosticSink;
use crate::types::Strategy;
use serde::{Deserialize, Serialize};

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseResult {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    pub matched: bool,
    pub message: String,
    pub strategy: Strategy,
}

/// Aggregate counts for a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of matched cases, 0.0 for an empty batch.
    pub pass_rate: f64,
}

impl BatchSummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_results(results: &[CaseResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.matched).count();
        let pass_rate = if total > 0 {
            (passed as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            total,
            passed,
            failed: total - passed,
            pass_rate,
        }
    }
}

/// All case results plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<CaseResult>,
    pub summary: BatchSummary,
}

/// Run every case in order.
#[must_use]
pub fn run_cases(
    comparator: &Comparator,
    cases: &[Case],
    sink: Option<&dyn DiagnosticSink>,
) -> BatchReport {
    run_cases_with_progress(comparator, cases, sink, |_| {})
}

/// Run every case in order, calling `on_result` as each case completes.
#[must_use]
pub fn run_cases_with_progress<F>(
    comparator: &Comparator,
    cases: &[Case],
    sink: Option<&dyn DiagnosticSink>,
    mut on_result: F,
) -> BatchReport
where
    F: FnMut(&CaseResult),
{
    let mut results = Vec::with_capacity(cases.len());
    for case in cases {
        let comparison = comparator.compare(&case.prediction, &case.expected, sink);
        tracing::debug!(
            case = %case.id,
            matched = comparison.matched,
            strategy = %comparison.strategy,
            "case compared"
        );
        let result = CaseResult {
            id: case.id.clone(),
            desc: case.desc.clone(),
            matched: comparison.matched,
            message: comparison.message,
            strategy: comparison.strategy,
        };
        on_result(&result);
        results.push(result);
    }

    let summary = BatchSummary::from_results(&results);
    BatchReport { results, summary }
}
