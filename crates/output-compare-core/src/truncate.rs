//! Bounded rendering of values embedded in diagnostics.

use std::fmt::Display;

/// Default character budget for a value embedded in a diagnostic message.
pub const DEFAULT_TRUNCATE_LENGTH: usize = 300;

/// Marker placed between the kept head and tail of a truncated value.
pub const TRUNCATION_MARKER: &str = "...(truncated) ...";

/// Render `value` and keep its head and tail when it exceeds `length` characters.
///
/// Each kept half is `length / 2` characters, except that a `length` of 0
/// keeps the whole value after the marker. Counting is by `char`, so the
/// result never splits a UTF-8 code point.
#[must_use]
pub fn truncate_output(value: impl Display, length: usize) -> String {
    let s = value.to_string();
    let total = s.chars().count();
    if total <= length {
        return s;
    }

    let half = length / 2;
    let tail_len = if length == 0 { total } else { half };
    let head: String = s.chars().take(half).collect();
    let tail: String = s.chars().skip(total - tail_len).collect();
    format!("{head}{TRUNCATION_MARKER}{tail}")
}
