//! # Value Kinds
//!
//! Defines the `ValueKind` tags that scalar constraints test parameter values
//! against. Parameter values are `serde_json::Value`s, so the kinds follow the
//! JSON data model with one refinement: numbers are split into `integer`
//! (integral numbers) and `real` (every number).
//!
//! Booleans are never numbers. A constraint that accepts `integer` rejects
//! `true`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Type tag a scalar constraint can require of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// JSON `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number with no fractional part that fits in `i64` or `u64`.
    Integer,
    /// Any number, integral or not.
    Real,
    /// A UTF-8 string.
    String,
    /// An ordered sequence, without element checks.
    Array,
    /// A mapping, without key checks.
    Object,
}

/// Error returned when parsing an unrecognized kind name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown value kind: {0:?}")]
pub struct UnknownValueKind(pub String);

impl ValueKind {
    /// Returns every kind in declaration order.
    pub fn all_kinds() -> &'static [ValueKind] {
        &[
            Self::Null,
            Self::Boolean,
            Self::Integer,
            Self::Real,
            Self::String,
            Self::Array,
            Self::Object,
        ]
    }

    /// Returns the snake_case identifier used in schema documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// The most specific kind describing `value`.
    ///
    /// Integral numbers report `Integer`, other numbers `Real`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Real,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether `value` is an instance of this kind.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Real => value.is_number(),
            kind => *kind == Self::of(value),
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = UnknownValueKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Self::Null),
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "real" => Ok(Self::Real),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            other => Err(UnknownValueKind(other.to_string())),
        }
    }
}

/// Equality used for membership checks.
///
/// Numbers compare by numeric value, so `1` and `1.0` are equal. Arrays and
/// objects compare element-wise with the same rule. Everything else uses
/// `Value` equality.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
