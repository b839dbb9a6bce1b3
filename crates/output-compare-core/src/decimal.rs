//! Arbitrary-precision decimal parsing for numeric lines.

use crate::lines::is_output_space;
use bigdecimal::{BigDecimal, ToPrimitive};
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

/// A comparison touched a signaling NaN, which has no defined ordering.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid operation: comparison involving a signaling NaN")]
pub struct InvalidOperation;

/// A single decimal token.
#[derive(Debug, Clone)]
pub enum DecimalValue {
    Finite(BigDecimal),
    Infinity { negative: bool },
    /// Quiet NaN: unequal to everything, itself included.
    NaN,
    /// Signaling NaN: any equality test on it is an invalid operation.
    SignalingNaN,
}

impl DecimalValue {
    /// Convert to the nearest `f64`.
    ///
    /// Returns `None` for a signaling NaN or a finite value with no `f64`
    /// representation.
    #[must_use]
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Self::Finite(value) => value.to_f64(),
            Self::Infinity { negative: false } => Some(f64::INFINITY),
            Self::Infinity { negative: true } => Some(f64::NEG_INFINITY),
            Self::NaN => Some(f64::NAN),
            Self::SignalingNaN => None,
        }
    }

    /// Numeric equality.
    ///
    /// # Errors
    /// Returns `InvalidOperation` if either side is a signaling NaN.
    pub fn try_eq(&self, other: &Self) -> Result<bool, InvalidOperation> {
        match (self, other) {
            (Self::SignalingNaN, _) | (_, Self::SignalingNaN) => Err(InvalidOperation),
            (Self::NaN, _) | (_, Self::NaN) => Ok(false),
            (Self::Finite(a), Self::Finite(b)) => Ok(a == b),
            (Self::Infinity { negative: a }, Self::Infinity { negative: b }) => Ok(a == b),
            _ => Ok(false),
        }
    }
}

impl FromStr for DecimalValue {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let Some(re) = decimal_token_regex() else {
            return Err("decimal token pattern unavailable".to_string());
        };
        if !re.is_match(token) {
            return Err(format!("invalid decimal literal: {token}"));
        }

        let (negative, unsigned) = match token.as_bytes().first() {
            Some(b'-') => (true, &token[1..]),
            Some(b'+') => (false, &token[1..]),
            _ => (false, token),
        };

        let lower = unsigned.to_ascii_lowercase();
        if lower.starts_with("inf") {
            return Ok(Self::Infinity { negative });
        }
        if lower.starts_with("snan") {
            return Ok(Self::SignalingNaN);
        }
        if lower.starts_with("nan") {
            return Ok(Self::NaN);
        }

        let cleaned = lower.replace('_', "");
        let (mantissa, exponent) = cleaned
            .split_once('e')
            .map_or((cleaned.as_str(), None), |(m, e)| (m, Some(e)));

        let mut normalized = String::with_capacity(cleaned.len() + 3);
        if negative {
            normalized.push('-');
        }
        if mantissa.starts_with('.') {
            normalized.push('0');
        }
        normalized.push_str(mantissa);
        if mantissa.ends_with('.') {
            normalized.push('0');
        }
        if let Some(exponent) = exponent {
            normalized.push('e');
            normalized.push_str(exponent);
        }

        BigDecimal::from_str(&normalized)
            .map(Self::Finite)
            .map_err(|e| format!("invalid decimal literal {token}: {e}"))
    }
}

/// Decimal literal grammar: signed digits with optional fraction and
/// exponent, single underscores between digits, or the special values.
fn decimal_token_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        let digits = "[0-9](?:_?[0-9])*";
        let pattern = format!(
            r"(?i)^[+-]?(?:(?:{digits}(?:\.(?:{digits})?)?|\.{digits})(?:e[+-]?{digits})?|inf(?:inity)?|s?nan[0-9]*)$"
        );
        Regex::new(&pattern).ok()
    })
    .as_ref()
}

/// Parse a whitespace-separated line of decimal literals.
///
/// Returns `None` as soon as any token is not a valid decimal literal.
#[must_use]
pub fn parse_decimal_line(line: &str) -> Option<Vec<DecimalValue>> {
    line.split(is_output_space)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<DecimalValue>().ok())
        .collect()
}

/// Exact equality of two decimal sequences.
///
/// Lengths are compared first; pairs are then compared in order and the
/// scan stops at the first unequal pair.
///
/// # Errors
/// Returns `InvalidOperation` if a signaling NaN is reached before the scan
/// stops.
pub fn decimal_sequences_equal(
    actual: &[DecimalValue],
    expected: &[DecimalValue],
) -> Result<bool, InvalidOperation> {
    if actual.len() != expected.len() {
        return Ok(false);
    }
    for (a, b) in actual.iter().zip(expected) {
        if !a.try_eq(b)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Convert every value to `f64`, or `None` if any value cannot be converted.
#[must_use]
pub fn to_f64_sequence(values: &[DecimalValue]) -> Option<Vec<f64>> {
    values.iter().map(DecimalValue::to_f64).collect()
}
