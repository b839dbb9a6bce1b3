//! Approximate floating-point equality.

use serde::{Deserialize, Serialize};

/// Default relative tolerance.
pub const DEFAULT_RTOL: f64 = 1e-5;
/// Default absolute tolerance.
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Capability to decide whether two float sequences are element-wise close.
pub trait Tolerance: Send + Sync {
    /// Returns true when every `actual[i]` is close to `expected[i]`.
    ///
    /// Sequences of different lengths are never close.
    fn all_close(&self, actual: &[f64], expected: &[f64]) -> bool;
}

/// Element-wise closeness: `|a - b| <= atol + rtol * |b|`, where `b` is the
/// expected value. Equal infinities are close; NaN is never close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllClose {
    #[serde(default = "default_rtol")]
    pub rtol: f64,
    #[serde(default = "default_atol")]
    pub atol: f64,
}

const fn default_rtol() -> f64 {
    DEFAULT_RTOL
}

const fn default_atol() -> f64 {
    DEFAULT_ATOL
}

impl Default for AllClose {
    fn default() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            atol: DEFAULT_ATOL,
        }
    }
}

impl AllClose {
    #[must_use]
    pub const fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_close(&self, actual: f64, expected: f64) -> bool {
        if actual.is_nan() || expected.is_nan() {
            return false;
        }
        if actual.is_infinite() || expected.is_infinite() {
            return actual == expected;
        }
        (actual - expected).abs() <= self.rtol.mul_add(expected.abs(), self.atol)
    }
}

impl Tolerance for AllClose {
    fn all_close(&self, actual: &[f64], expected: &[f64]) -> bool {
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(expected)
                .all(|(&a, &e)| self.is_close(a, e))
    }
}
