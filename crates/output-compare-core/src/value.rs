//! Structured values for JSON-level comparison.

use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Deepest array/object nesting accepted as JSON.
pub const MAX_JSON_DEPTH: usize = 512;

/// Number literal standing in for `NaN` while serde_json parses the text.
const NAN_LITERAL: &str = "-0.0e-0";

/// Non-finite literals and the number literals they are parsed as.
const NON_FINITE_LITERALS: [(&str, &str); 3] = [
    ("-Infinity", "-1e99999"),
    ("Infinity", "1e99999"),
    ("NaN", NAN_LITERAL),
];

/// A JSON number.
///
/// Integer literals are kept exactly; literals with a fraction or exponent
/// are read as `f64`. Values compare by exact numeric value, so `1 == 1.0`
/// while two integers beyond the `f64` range stay distinct. `NaN` equals
/// `NaN`, the way identical non-finite constants compare inside a container.
#[derive(Debug, Clone)]
pub enum Number {
    Int(BigDecimal),
    Float(f64),
}

impl PartialEq for Number {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => {
                integral_float_eq(*f, i)
            }
        }
    }
}

/// An integral finite `f64` formats with `{:.0}` as its exact integer value.
#[allow(clippy::float_cmp)]
fn integral_float_eq(f: f64, i: &BigDecimal) -> bool {
    f.is_finite()
        && f.fract() == 0.0
        && BigDecimal::from_str(&format!("{f:.0}")).is_ok_and(|exact| exact == *i)
}

impl From<bool> for Number {
    fn from(b: bool) -> Self {
        Self::Int(BigDecimal::from(u8::from(b)))
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Self {
        Self::Int(BigDecimal::from(i))
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        let text = n.to_string();
        if text == NAN_LITERAL {
            return Self::Float(f64::NAN);
        }
        if !text.contains(['.', 'e', 'E']) {
            if let Ok(i) = BigDecimal::from_str(&text) {
                return Self::Int(i);
            }
        }
        Self::Float(text.parse().unwrap_or(f64::NAN))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// Byte length of the string literal at the start of `text`, quotes included.
fn string_literal_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    text.len()
}

/// Whether a literal next to `c` stands as its own token.
fn is_token_boundary(c: Option<char>) -> bool {
    !c.is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '+' | '-'))
}

/// Rewrite `NaN`, `Infinity` and `-Infinity` outside string literals as
/// number literals serde_json accepts.
///
/// Returns `None` when arrays and objects nest deeper than [`MAX_JSON_DEPTH`].
fn rewrite_non_finite(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut rest = text;
    let mut prev = None;

    while let Some(c) = rest.chars().next() {
        match c {
            '"' => {
                let len = string_literal_len(rest);
                out.push_str(&rest[..len]);
                rest = &rest[len..];
                prev = Some('"');
                continue;
            }
            '[' | '{' => {
                depth += 1;
                if depth > MAX_JSON_DEPTH {
                    return None;
                }
            }
            ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }

        let literal = NON_FINITE_LITERALS.iter().find(|(literal, _)| {
            rest.starts_with(literal) && is_token_boundary(rest[literal.len()..].chars().next())
        });
        if let Some((literal, replacement)) = literal.filter(|_| is_token_boundary(prev)) {
            out.push_str(replacement);
            rest = &rest[literal.len()..];
            prev = literal.chars().next_back();
        } else if c == '-' || c.is_ascii_digit() {
            let len = rest
                .find(|ch: char| !matches!(ch, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'))
                .unwrap_or(rest.len());
            let token = &rest[..len];
            // A literal zero spelled like the NaN stand-in keeps its value.
            out.push_str(if token == NAN_LITERAL { "-0.0" } else { token });
            rest = &rest[len..];
            prev = token.chars().next_back();
        } else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            prev = Some(c);
        }
    }

    Some(out)
}

/// Tagged representation of a parsed data value.
///
/// `Sequence` and `Tuple` are distinct variants and never equal each other;
/// [`StructuredValue::normalize_sequences`] folds tuples into sequences.
///
/// Booleans compare equal to the numbers `0` and `1`.
#[derive(Debug, Clone)]
pub enum StructuredValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<StructuredValue>),
    Tuple(Vec<StructuredValue>),
    Mapping(BTreeMap<String, StructuredValue>),
}

impl StructuredValue {
    /// Parse JSON text. Returns `None` when the text is not valid JSON.
    ///
    /// The `NaN`, `Infinity` and `-Infinity` literals are accepted. Nesting
    /// deeper than [`MAX_JSON_DEPTH`] is treated as invalid.
    #[must_use]
    pub fn parse_json(text: &str) -> Option<Self> {
        let text = rewrite_non_finite(text)?;
        let mut de = serde_json::Deserializer::from_str(&text);
        de.disable_recursion_limit();
        let value = Value::deserialize(&mut de).ok()?;
        de.end().ok()?;
        Some(Self::from(&value))
    }

    /// Rewrite tuples as sequences, recursing through sequences and tuples.
    ///
    /// Values of any other kind are returned untouched, including whatever a
    /// mapping contains.
    #[must_use]
    pub fn normalize_sequences(self) -> Self {
        match self {
            Self::Sequence(items) | Self::Tuple(items) => Self::Sequence(
                items
                    .into_iter()
                    .map(Self::normalize_sequences)
                    .collect(),
            ),
            other => other,
        }
    }

    #[must_use]
    pub fn is_non_empty_sequence(&self) -> bool {
        matches!(self, Self::Sequence(items) if !items.is_empty())
    }
}

impl PartialEq for StructuredValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Bool(b), Self::Number(n)) | (Self::Number(n), Self::Bool(b)) => {
                *n == Number::from(*b)
            }
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&Value> for StructuredValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.into()),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Sequence(items.iter().map(Self::from).collect()),
            Value::Object(map) => Self::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[StructuredValue]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for StructuredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Sequence(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Self::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k:?}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}
