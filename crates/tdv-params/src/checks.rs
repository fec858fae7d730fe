//! # Built-in Checks
//!
//! Reusable [`ParamCheck`] implementations for constraints that cannot be
//! expressed as a kind or membership test.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::constraint::{CheckError, ParamCheck};

/// Which ends of an [`Interval`] are included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Closed {
    /// Both bounds included.
    #[default]
    Both,
    /// Only the lower bound included.
    Left,
    /// Only the upper bound included.
    Right,
    /// Neither bound included.
    Neither,
}

impl Closed {
    fn includes_min(self) -> bool {
        matches!(self, Self::Both | Self::Left)
    }

    fn includes_max(self) -> bool {
        matches!(self, Self::Both | Self::Right)
    }
}

/// Error returned by [`Interval`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// The value is not a number.
    #[error("{value} is not a number and cannot be compared with {interval}")]
    NotNumeric {
        /// The offending value.
        value: Value,
        /// The interval, in bracket notation.
        interval: String,
    },
    /// The value lies outside the interval.
    #[error("{value} is not in {interval}")]
    OutOfRange {
        /// The offending value.
        value: f64,
        /// The interval, in bracket notation.
        interval: String,
    },
}

/// Numeric range check. Null values pass; pair with a kind constraint to
/// forbid them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Interval {
    /// Lower bound, if any.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound, if any.
    #[serde(default)]
    pub max: Option<f64>,
    /// Which bounds are inclusive.
    #[serde(default)]
    pub closed: Closed,
}

impl Interval {
    /// `[min, max]`.
    pub fn closed(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            closed: Closed::Both,
        }
    }

    /// `[min, +inf)`.
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            ..Self::default()
        }
    }

    /// `(min, +inf)`.
    pub fn greater_than(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            closed: Closed::Neither,
        }
    }

    /// Whether `x` lies inside the interval. NaN never does.
    pub fn contains(&self, x: f64) -> bool {
        let above = match self.min {
            Some(min) if self.closed.includes_min() => x >= min,
            Some(min) => x > min,
            None => !x.is_nan(),
        };
        let below = match self.max {
            Some(max) if self.closed.includes_max() => x <= max,
            Some(max) => x < max,
            None => !x.is_nan(),
        };
        above && below
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let open = if self.closed.includes_min() && self.min.is_some() { '[' } else { '(' };
        let close = if self.closed.includes_max() && self.max.is_some() { ']' } else { ')' };
        let min = self.min.map_or_else(|| "-inf".to_string(), |m| m.to_string());
        let max = self.max.map_or_else(|| "inf".to_string(), |m| m.to_string());
        write!(f, "{open}{min}, {max}{close}")
    }
}

impl ParamCheck for Interval {
    fn check(&self, value: &Value) -> Result<(), CheckError> {
        if value.is_null() {
            return Ok(());
        }
        let Some(x) = value.as_f64() else {
            return Err(Box::new(RangeError::NotNumeric {
                value: value.clone(),
                interval: self.to_string(),
            }));
        };
        if self.contains(x) {
            Ok(())
        } else {
            Err(Box::new(RangeError::OutOfRange {
                value: x,
                interval: self.to_string(),
            }))
        }
    }

    fn describe(&self) -> String {
        format!("interval {self}")
    }
}
