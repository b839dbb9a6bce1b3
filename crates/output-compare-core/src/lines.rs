//! Line-by-line comparison with numeric tolerance.

use crate::decimal::{decimal_sequences_equal, parse_decimal_line, to_f64_sequence};
use crate::tolerance::Tolerance;
use crate::truncate::truncate_output;
use crate::types::{CompareError, Comparison, Strategy};

/// Whitespace for trimming and token splitting: Unicode white space plus the
/// information separators U+001C to U+001F.
#[must_use]
pub fn is_output_space(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// Trim [`is_output_space`] characters from both ends.
#[must_use]
pub fn trim_output(text: &str) -> &str {
    text.trim_matches(is_output_space)
}

/// Trim the text, split it on `\n` and trim every line.
///
/// Interior blank lines are kept, so line indices stay aligned with the input.
#[must_use]
pub fn stripped_lines(text: &str) -> Vec<&str> {
    trim_output(text).split('\n').map(trim_output).collect()
}

/// Compare two outputs line by line.
///
/// Lines that differ as text are re-read as decimal sequences: exactly equal
/// decimals pass, and otherwise `tolerance` decides. Without a tolerance any
/// numeric difference is a mismatch.
///
/// # Errors
/// Returns `CompareError::SignalingNan` if a signaling NaN is reached while
/// comparing decimals exactly.
pub fn compare_lines(
    prediction: &str,
    expected: &str,
    tolerance: Option<&dyn Tolerance>,
    truncate_length: usize,
) -> Result<Comparison, CompareError> {
    let pred_lines = stripped_lines(prediction);
    let exp_lines = stripped_lines(expected);

    if pred_lines.len() != exp_lines.len() {
        return Ok(Comparison::mismatch(
            Strategy::Line,
            format!(
                "Wrong answer: mismatched output length. Expected {} lines, got {} lines",
                exp_lines.len(),
                pred_lines.len()
            ),
        ));
    }

    for (idx, (pred_line, exp_line)) in pred_lines.iter().zip(&exp_lines).enumerate() {
        if pred_line == exp_line {
            continue;
        }
        if !numeric_lines_match(pred_line, exp_line, tolerance, idx)? {
            return Ok(Comparison::mismatch(
                Strategy::Line,
                format!(
                    "Wrong answer at line {idx}: {} != {}",
                    truncate_output(pred_line, truncate_length),
                    truncate_output(exp_line, truncate_length)
                ),
            ));
        }
    }

    Ok(Comparison::matched(Strategy::Line))
}

fn numeric_lines_match(
    pred_line: &str,
    exp_line: &str,
    tolerance: Option<&dyn Tolerance>,
    idx: usize,
) -> Result<bool, CompareError> {
    let (Some(pred), Some(exp)) = (parse_decimal_line(pred_line), parse_decimal_line(exp_line))
    else {
        return Ok(false);
    };

    if decimal_sequences_equal(&pred, &exp).map_err(|_| CompareError::SignalingNan { line: idx })?
    {
        return Ok(true);
    }

    let Some(tolerance) = tolerance else {
        return Ok(false);
    };
    let (Some(pred), Some(exp)) = (to_f64_sequence(&pred), to_f64_sequence(&exp)) else {
        return Ok(false);
    };
    Ok(pred.len() == exp.len() && tolerance.all_close(&pred, &exp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::AllClose;
    use crate::truncate::DEFAULT_TRUNCATE_LENGTH;

    const TOL: AllClose = AllClose::new(1e-5, 1e-8);

    fn lines(prediction: &str, expected: &str) -> Result<Comparison, CompareError> {
        compare_lines(prediction, expected, Some(&TOL), DEFAULT_TRUNCATE_LENGTH)
    }

    #[test]
    fn test_stripped_lines() {
        assert_eq!(stripped_lines("  a \n b\r\n\n c  \n"), vec!["a", "b", "", "c"]);
        assert_eq!(stripped_lines(""), vec![""]);
    }

    #[test]
    fn test_information_separators_are_space() {
        assert_eq!(trim_output("\u{1c}\u{1f} 7 \u{1e}"), "7");
        assert_eq!(stripped_lines("a\u{1d}\nb"), vec!["a", "b"]);
        assert!(!is_output_space('\u{1b}'));
    }

    #[test]
    fn test_identical_lines_match() -> Result<(), CompareError> {
        let result = lines("a\n  b  ", "a\nb")?;
        assert!(result.matched);
        assert_eq!(result.strategy, Strategy::Line);
        Ok(())
    }

    #[test]
    fn test_line_count_mismatch() -> Result<(), CompareError> {
        let result = lines("a\nb", "a\nb\nc")?;
        assert!(!result.matched);
        assert_eq!(
            result.message,
            "Wrong answer: mismatched output length. Expected 3 lines, got 2 lines"
        );
        Ok(())
    }

    #[test]
    fn test_text_mismatch_reports_line_index() -> Result<(), CompareError> {
        let result = lines("ok\nabc", "ok\nabd")?;
        assert!(!result.matched);
        assert_eq!(result.message, "Wrong answer at line 1: abc != abd");
        Ok(())
    }

    #[test]
    fn test_decimal_representation_matches() -> Result<(), CompareError> {
        assert!(lines("1.50 2", "1.5 2.0")?.matched);
        assert!(lines("1e3", "1000")?.matched);
        Ok(())
    }

    #[test]
    fn test_tolerant_numeric_match() -> Result<(), CompareError> {
        assert!(lines("1.0 2.0", "1.0000001 1.9999999")?.matched);
        assert!(!lines("1.0 2.0", "2.0 3.0")?.matched);
        Ok(())
    }

    #[test]
    fn test_token_count_mismatch_fails() -> Result<(), CompareError> {
        let result = lines("1 2", "1 2 3")?;
        assert!(!result.matched);
        assert_eq!(result.message, "Wrong answer at line 0: 1 2 != 1 2 3");
        Ok(())
    }

    #[test]
    fn test_mixed_text_and_numbers_compare_as_text() -> Result<(), CompareError> {
        assert!(!lines("x 1.0", "x 1")?.matched);
        Ok(())
    }

    #[test]
    fn test_without_tolerance_requires_exact_decimals() -> Result<(), CompareError> {
        let result = compare_lines("1.0", "1.0000001", None, DEFAULT_TRUNCATE_LENGTH)?;
        assert!(!result.matched);
        let result = compare_lines("1.0", "1.000", None, DEFAULT_TRUNCATE_LENGTH)?;
        assert!(result.matched);
        Ok(())
    }

    #[test]
    fn test_nan_never_matches_numerically() -> Result<(), CompareError> {
        assert!(!lines("nan", "NaN")?.matched);
        assert!(lines("NaN", "NaN")?.matched);
        Ok(())
    }

    #[test]
    fn test_infinity_matches() -> Result<(), CompareError> {
        assert!(lines("inf", "Infinity")?.matched);
        assert!(!lines("-inf", "Infinity")?.matched);
        Ok(())
    }

    #[test]
    fn test_signaling_nan_is_internal_failure() {
        let result = lines("1\nsNaN", "1\n2");
        assert_eq!(result, Err(CompareError::SignalingNan { line: 1 }));
    }

    #[test]
    fn test_signaling_nan_without_equality_check_is_mismatch() -> Result<(), CompareError> {
        let result = lines("1 sNaN", "2 2")?;
        assert!(!result.matched);
        assert_eq!(result.message, "Wrong answer at line 0: 1 sNaN != 2 2");
        Ok(())
    }

    #[test]
    fn test_long_lines_truncated_in_message() -> Result<(), CompareError> {
        let long = "x".repeat(1000);
        let result = lines(&long, "y")?;
        assert!(result.message.contains("...(truncated) ..."));
        assert!(result.message.len() < long.len());
        Ok(())
    }
}
