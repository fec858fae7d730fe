//! # Constraints and Schemas
//!
//! A [`Schema`] maps parameter names to [`Constraint`]s. Each constraint is
//! one of four variants, and each variant carries only the fields relevant to
//! it:
//!
//! - `Any`: no constraint; every value is accepted.
//! - `Scalar`: optional type tags, optional allowed values, optional custom
//!   check.
//! - `Sequence`: the value must be an array; every element is checked
//!   against the element constraint.
//! - `Mapping`: the value must be an object, validated recursively against
//!   a nested schema.
//!
//! Container variants have no allowed-values or custom-check fields, so those
//! checks can never be applied at a container level.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::value::ValueKind;

/// Error type returned by custom checks. Propagated to the caller unchanged.
pub type CheckError = Box<dyn std::error::Error + Send + Sync>;

/// A custom check on a single parameter value.
///
/// Implemented for every `Fn(&Value) -> Result<(), CheckError>` closure, so
/// ad-hoc checks need no wrapper type.
pub trait ParamCheck: Send + Sync {
    /// Accept or reject `value`.
    fn check(&self, value: &Value) -> Result<(), CheckError>;

    /// Short description used in `Debug` output.
    fn describe(&self) -> String {
        "custom check".to_string()
    }
}

impl<F> ParamCheck for F
where
    F: Fn(&Value) -> Result<(), CheckError> + Send + Sync,
{
    fn check(&self, value: &Value) -> Result<(), CheckError> {
        self(value)
    }
}

/// Checks applied directly to a non-container value.
#[derive(Clone, Default)]
pub struct ScalarConstraint {
    /// Kinds the value must match; `None` accepts every kind.
    pub kinds: Option<Vec<ValueKind>>,
    /// Permitted values; only consulted for non-null values.
    pub allowed: Option<Vec<Value>>,
    /// Custom check, run on every value including null.
    pub check: Option<Arc<dyn ParamCheck>>,
}

impl ScalarConstraint {
    /// A scalar constraint with no checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scalar constraint requiring a single kind.
    pub fn of_kind(kind: ValueKind) -> Self {
        Self::of_kinds([kind])
    }

    /// A scalar constraint requiring any one of `kinds`.
    pub fn of_kinds(kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        Self {
            kinds: Some(kinds.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Restrict non-null values to `values`.
    pub fn with_allowed(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.allowed = Some(values.into_iter().collect());
        self
    }

    /// Attach a custom check.
    pub fn with_check(mut self, check: impl ParamCheck + 'static) -> Self {
        self.check = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for ScalarConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarConstraint")
            .field("kinds", &self.kinds)
            .field("allowed", &self.allowed)
            .field("check", &self.check.as_ref().map(|c| c.describe()))
            .finish()
    }
}

/// Validation rule for one named parameter.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Accept any value.
    Any,
    /// Type, membership and custom checks on the value itself.
    Scalar(ScalarConstraint),
    /// An array whose elements each satisfy `element`.
    ///
    /// Elements get the single-value checks only: an element constraint that
    /// is itself a container is checked for kind but not descended into.
    Sequence {
        /// Constraint applied to every element.
        element: Box<Constraint>,
    },
    /// An object validated recursively against `schema`.
    Mapping {
        /// Schema for the nested parameters.
        schema: Schema,
    },
}

impl Constraint {
    /// A scalar constraint requiring a single kind.
    pub fn kind(kind: ValueKind) -> Self {
        Self::Scalar(ScalarConstraint::of_kind(kind))
    }

    /// A scalar constraint requiring any one of `kinds`.
    pub fn kinds(kinds: impl IntoIterator<Item = ValueKind>) -> Self {
        Self::Scalar(ScalarConstraint::of_kinds(kinds))
    }

    /// A scalar constraint restricting values to `values`, of any kind.
    pub fn one_of(values: impl IntoIterator<Item = Value>) -> Self {
        Self::Scalar(ScalarConstraint::new().with_allowed(values))
    }

    /// An array whose elements satisfy `element`.
    pub fn sequence(element: impl Into<Constraint>) -> Self {
        Self::Sequence {
            element: Box::new(element.into()),
        }
    }

    /// An object validated against `schema`.
    pub fn mapping(schema: Schema) -> Self {
        Self::Mapping { schema }
    }

    /// Kinds a value must match to satisfy this constraint, if restricted.
    pub fn expected_kinds(&self) -> Option<Vec<ValueKind>> {
        match self {
            Self::Any => None,
            Self::Scalar(scalar) => scalar.kinds.clone(),
            Self::Sequence { .. } => Some(vec![ValueKind::Array]),
            Self::Mapping { .. } => Some(vec![ValueKind::Object]),
        }
    }
}

impl From<ScalarConstraint> for Constraint {
    fn from(scalar: ScalarConstraint) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<ValueKind> for Constraint {
    fn from(kind: ValueKind) -> Self {
        Self::kind(kind)
    }
}

/// Mapping from parameter name to its constraint.
///
/// Names iterate in sorted order, which keeps "available parameters" lists
/// in error messages deterministic.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: BTreeMap<String, Constraint>,
}

impl Schema {
    /// An empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the constraint for `name`.
    pub fn with(mut self, name: impl Into<String>, constraint: impl Into<Constraint>) -> Self {
        self.insert(name, constraint);
        self
    }

    /// Add or replace the constraint for `name`.
    pub fn insert(&mut self, name: impl Into<String>, constraint: impl Into<Constraint>) {
        self.entries.insert(name.into(), constraint.into());
    }

    /// Look up the constraint for `name`.
    pub fn get(&self, name: &str) -> Option<&Constraint> {
        self.entries.get(name)
    }

    /// Known parameter names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of known parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schema has no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Constraint)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, Constraint)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
