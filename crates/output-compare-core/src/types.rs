//! Core data types for output comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Internal failures raised while comparing line by line.
///
/// These never reach callers of [`crate::compare`]; the comparator degrades
/// to plain trimmed equality and records the cause in the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("signaling NaN encountered in decimal comparison at line {line}")]
    SignalingNan { line: usize },
}

/// The strategy that decided a comparison outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Trimmed string equality.
    Exact,
    /// JSON structural equality.
    Structural,
    /// Line-by-line comparison with numeric tolerance.
    Line,
    /// Trimmed equality after an internal failure.
    Fallback,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exact => "exact",
            Self::Structural => "structural",
            Self::Line => "line",
            Self::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Result of comparing a prediction against an expected output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub matched: bool,
    /// Empty when matched, otherwise a bounded description of the first mismatch.
    pub message: String,
    pub strategy: Strategy,
}

impl Comparison {
    #[must_use]
    pub const fn matched(strategy: Strategy) -> Self {
        Self {
            matched: true,
            message: String::new(),
            strategy,
        }
    }

    #[must_use]
    pub const fn mismatch(strategy: Strategy, message: String) -> Self {
        Self {
            matched: false,
            message,
            strategy,
        }
    }

    /// Split into the `(matched, message)` pair.
    #[must_use]
    pub fn into_pair(self) -> (bool, String) {
        (self.matched, self.message)
    }
}
