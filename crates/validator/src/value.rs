//! Scalar payload values and their coercions
//!
//! Request payloads are flat: every field holds a string, an integer, a float
//! or a boolean. Absence is expressed by the key being missing from the
//! [`Payload`](crate::Payload), never by a dedicated variant.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// VALUE
// ============================================================================

/// A single scalar value from a decoded JSON request body.
///
/// # Examples
///
/// ```
/// use mealdesk_validator::Value;
///
/// assert_eq!(Value::from(10).to_number(), Some(10.0));
/// assert_eq!(Value::from("42").to_integer(), Some(42));
/// assert_eq!(Value::from(1.5).to_text(), "1.5");
/// assert!(Value::from(1).loosely_eq(&Value::from(1.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A JSON boolean.
    Bool(bool),
    /// A JSON number without a fractional part that fits in `i64`.
    Int(i64),
    /// Any other JSON number.
    Float(f64),
    /// A JSON string.
    Str(String),
}

impl Value {
    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for string values.
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// The textual form rules such as `alpha`, `email` or `digits` inspect.
    ///
    /// Integral floats keep a trailing `.0` so that `digits` sees the decimal
    /// point the client actually sent.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Str(s) => Cow::Borrowed(s),
            Self::Int(i) => Cow::Owned(i.to_string()),
            Self::Float(f) => Cow::Owned(float_text(*f)),
            Self::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }

    /// Numeric coercion: numbers as-is, strings that parse as a finite float.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) if f.is_finite() => Some(*f),
            Self::Float(_) | Self::Bool(_) => None,
            Self::Str(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }

    /// Integer coercion: integers, integral floats and strings parsing as `i64`.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                let truncated = *f as i64;
                (truncated as f64 == *f).then_some(truncated)
            }
            Self::Float(_) | Self::Bool(_) => None,
            Self::Str(s) => s.trim().parse::<i64>().ok(),
        }
    }

    /// Equality as seen by the comparison rules.
    ///
    /// Integers and floats compare numerically; strings and booleans only
    /// equal values of their own kind.
    pub fn loosely_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                self.to_number() == other.to_number()
            }
            _ => false,
        }
    }
}

/// Renders a float the way JSON serializers do (`10.0`, `1.0245`).
fn float_text(f: f64) -> String {
    serde_json::Number::from_f64(f).map_or_else(|| f.to_string(), |n| n.to_string())
}

/// Renders a numeric rule parameter for messages: `30`, not `30.0`.
pub(crate) fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl Value {
    /// Converts a JSON scalar.
    ///
    /// Returns `Ok(None)` for `null` (an absent field) and `Err` with the
    /// offending JSON kind for arrays and objects.
    pub fn from_json(value: serde_json::Value) -> Result<Option<Self>, &'static str> {
        match value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Bool(b) => Ok(Some(Self::Bool(b))),
            serde_json::Value::Number(n) => Ok(Some(match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            })),
            serde_json::Value::String(s) => Ok(Some(Self::Str(s))),
            serde_json::Value::Array(_) => Err("array"),
            serde_json::Value::Object(_) => Err("object"),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
