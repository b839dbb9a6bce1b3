//! Output comparator: ordered strategies with graceful fallback.

use crate::config::CompareConfig;
use crate::lines::{compare_lines, trim_output};
use crate::sink::DiagnosticSink;
use crate::structural::{StructuralOutcome, compare_structural};
use crate::tolerance::{AllClose, Tolerance};
use crate::truncate::DEFAULT_TRUNCATE_LENGTH;
use crate::types::{Comparison, Strategy};
use std::fmt;

/// Decides whether a prediction is equivalent to an expected output.
///
/// Strategies run in order and the first success wins:
/// 1. trimmed string equality
/// 2. JSON structural equality (skipped when either side is not JSON)
/// 3. line-by-line comparison with decimal parsing and float tolerance
///
/// An internal failure in step 3 degrades to trimmed equality.
pub struct Comparator {
    truncate_length: usize,
    structural: bool,
    tolerance: Option<Box<dyn Tolerance>>,
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("truncate_length", &self.truncate_length)
            .field("structural", &self.structural)
            .field("tolerance", &self.tolerance.is_some())
            .finish()
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self {
            truncate_length: DEFAULT_TRUNCATE_LENGTH,
            structural: true,
            tolerance: Some(Box::new(AllClose::default())),
        }
    }
}

impl Comparator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a comparator from a validated configuration.
    #[must_use]
    pub fn from_config(config: &CompareConfig) -> Self {
        Self {
            truncate_length: config.truncate_length,
            structural: config.structural,
            tolerance: config
                .tolerance
                .map(|t| Box::new(t) as Box<dyn Tolerance>),
        }
    }

    #[must_use]
    pub const fn with_truncate_length(mut self, length: usize) -> Self {
        self.truncate_length = length;
        self
    }

    #[must_use]
    pub const fn with_structural(mut self, enabled: bool) -> Self {
        self.structural = enabled;
        self
    }

    /// Replace the approximate-equality capability.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: impl Tolerance + 'static) -> Self {
        self.tolerance = Some(Box::new(tolerance));
        self
    }

    /// Drop the approximate-equality capability; numeric lines must then
    /// match exactly as decimals.
    #[must_use]
    pub fn without_tolerance(mut self) -> Self {
        self.tolerance = None;
        self
    }

    /// Compare `prediction` against `expected`.
    ///
    /// Never fails: every path yields a definite outcome. `sink` is only
    /// called when the line-by-line strategy hits an internal failure.
    #[must_use]
    pub fn compare(
        &self,
        prediction: &str,
        expected: &str,
        sink: Option<&dyn DiagnosticSink>,
    ) -> Comparison {
        let prediction_simple = trim_output(prediction);
        let expected_simple = trim_output(expected);

        if prediction_simple == expected_simple {
            tracing::debug!(strategy = %Strategy::Exact, "outputs match");
            return Comparison::matched(Strategy::Exact);
        }

        if self.structural {
            match compare_structural(prediction, expected, self.truncate_length) {
                StructuralOutcome::Match => {
                    tracing::debug!(strategy = %Strategy::Structural, "outputs match");
                    return Comparison::matched(Strategy::Structural);
                }
                StructuralOutcome::Mismatch(reason) => {
                    tracing::debug!(%reason, "structural comparison failed, trying line comparison");
                }
                StructuralOutcome::NotApplicable => {}
            }
        }

        match compare_lines(
            prediction,
            expected,
            self.tolerance.as_deref(),
            self.truncate_length,
        ) {
            Ok(comparison) => {
                tracing::debug!(
                    strategy = %comparison.strategy,
                    matched = comparison.matched,
                    "line comparison finished"
                );
                comparison
            }
            Err(e) => {
                if let Some(sink) = sink {
                    sink.warn(&format!(
                        "Enhanced comparison failed, falling back to simple comparison: {e}"
                    ));
                }
                if prediction_simple == expected_simple {
                    Comparison::matched(Strategy::Fallback)
                } else {
                    Comparison::mismatch(Strategy::Fallback, format!("Comparison failed: {e}"))
                }
            }
        }
    }
}

/// Compare with the default comparator.
#[must_use]
pub fn compare(
    prediction: &str,
    expected: &str,
    sink: Option<&dyn DiagnosticSink>,
) -> Comparison {
    Comparator::default().compare(prediction, expected, sink)
}
