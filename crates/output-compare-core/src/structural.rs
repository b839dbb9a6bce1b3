//! JSON structural comparison.

use crate::lines::trim_output;
use crate::truncate::truncate_output;
use crate::value::StructuredValue;

/// Outcome of the structural strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralOutcome {
    /// At least one side is not valid JSON.
    NotApplicable,
    Match,
    /// Both sides parsed but differ; carries a bounded description.
    Mismatch(String),
}

/// Compare two texts as JSON values.
///
/// Tuples in the prediction are folded into sequences only when the
/// prediction root is a non-empty sequence; the expected value is used as
/// parsed.
#[must_use]
pub fn compare_structural(
    prediction: &str,
    expected: &str,
    truncate_length: usize,
) -> StructuralOutcome {
    let (Some(pred), Some(exp)) = (
        StructuredValue::parse_json(trim_output(prediction)),
        StructuredValue::parse_json(trim_output(expected)),
    ) else {
        return StructuralOutcome::NotApplicable;
    };
    compare_values(pred, &exp, truncate_length)
}

/// Compare already-structured values with the same normalization rule as
/// [`compare_structural`].
#[must_use]
pub fn compare_values(
    prediction: StructuredValue,
    expected: &StructuredValue,
    truncate_length: usize,
) -> StructuralOutcome {
    let prediction = if prediction.is_non_empty_sequence() {
        prediction.normalize_sequences()
    } else {
        prediction
    };

    if prediction == *expected {
        StructuralOutcome::Match
    } else {
        StructuralOutcome::Mismatch(format!(
            "JSON objects don't match: {} != {}",
            truncate_output(&prediction, truncate_length),
            truncate_output(expected, truncate_length)
        ))
    }
}
