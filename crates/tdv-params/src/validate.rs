//! # Parameter Validation
//!
//! Recursive validation of configuration mappings against a [`Schema`].
//!
//! ## Algorithm
//!
//! For every entry not excluded by the caller:
//!
//! 1. The name must be known to the schema.
//! 2. The value must match the constraint's kinds, if any.
//! 3. Scalar constraints then apply the allowed-values check (non-null values
//!    only) and the custom check (every value, null included).
//! 4. Mapping constraints recurse into the nested schema; sequence
//!    constraints apply steps 2–3 to every element, naming each one
//!    `name[index]`.
//!
//! Validation is fail-fast. The first violation is returned and nothing is
//! aggregated, coerced or mutated.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::constraint::{CheckError, Constraint, Schema};
use crate::value::{values_equal, ValueKind};

/// Error raised when a configuration does not satisfy its schema.
#[derive(Error, Debug)]
pub enum ParamError {
    /// The configuration contains a name the schema does not define.
    #[error(
        "`{name}`{} is not an available parameter; available parameters are {available:?}",
        enclosing(.parent)
    )]
    UnknownParameter {
        /// The unrecognized parameter name.
        name: String,
        /// The enclosing parameter when the name sits in a nested mapping.
        parent: Option<String>,
        /// Names the schema at that level does define.
        available: Vec<String>,
    },

    /// The value is not an instance of any expected kind.
    #[error("parameter `{name}` is of kind {actual} while it should be {}", kind_list(.expected))]
    TypeMismatch {
        /// Parameter name, with `[index]` for sequence elements.
        name: String,
        /// Kind of the offending value.
        actual: ValueKind,
        /// Kinds the constraint accepts.
        expected: Vec<ValueKind>,
    },

    /// The value is not among the permitted values.
    #[error("parameter `{name}` is {value}, which is not in {}", value_list(.allowed))]
    ValueNotAllowed {
        /// Parameter name, with `[index]` for sequence elements.
        name: String,
        /// The offending value.
        value: Value,
        /// The permitted values.
        allowed: Vec<Value>,
    },

    /// A custom check rejected the value. Displays the check's own message.
    #[error("{error}")]
    Check {
        /// Parameter name, with `[index]` for sequence elements.
        name: String,
        /// The error returned by the check.
        error: CheckError,
    },
}

impl ParamError {
    /// Name of the parameter the error refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownParameter { name, .. }
            | Self::TypeMismatch { name, .. }
            | Self::ValueNotAllowed { name, .. }
            | Self::Check { name, .. } => name,
        }
    }
}

fn enclosing(parent: &Option<String>) -> String {
    match parent {
        Some(p) => format!(" in `{p}`"),
        None => String::new(),
    }
}

fn kind_list(kinds: &[ValueKind]) -> String {
    match kinds {
        [single] => single.to_string(),
        many => {
            let names: Vec<&str> = many.iter().map(ValueKind::as_str).collect();
            format!("one of [{}]", names.join(", "))
        }
    }
}

fn value_list(values: &[Value]) -> String {
    let items: Vec<String> = values.iter().map(Value::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Validate `config` against `schema`, skipping names listed in `exclude`.
///
/// # Errors
///
/// Returns the first [`ParamError`] encountered. Errors from custom checks
/// are returned as [`ParamError::Check`] with the check's message intact.
pub fn validate_params(
    config: &Map<String, Value>,
    schema: &Schema,
    exclude: &[&str],
) -> Result<(), ParamError> {
    let entries = config
        .iter()
        .filter(|(name, _)| !exclude.contains(&name.as_str()));

    validate_entries(entries, schema, None).map_err(|e| {
        tracing::debug!(parameter = e.name(), error = %e, "parameter validation failed");
        e
    })
}

fn validate_entries<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
    schema: &Schema,
    parent: Option<&str>,
) -> Result<(), ParamError> {
    for (name, value) in entries {
        let Some(constraint) = schema.get(name) else {
            return Err(ParamError::UnknownParameter {
                name: name.clone(),
                parent: parent.map(str::to_string),
                available: schema.names().into_iter().map(str::to_string).collect(),
            });
        };

        check_single(value, constraint, name)?;

        match constraint {
            Constraint::Mapping { schema: nested } => {
                if let Value::Object(map) = value {
                    validate_entries(map.iter(), nested, Some(name))?;
                }
            }
            Constraint::Sequence { element } => {
                if let Value::Array(items) = value {
                    for (i, item) in items.iter().enumerate() {
                        check_single(item, element, &format!("{name}[{i}]"))?;
                    }
                }
            }
            Constraint::Any | Constraint::Scalar(_) => {}
        }

        tracing::trace!(parameter = %name, "parameter accepted");
    }
    Ok(())
}

/// Kind, membership and custom checks on one value. Does not descend into
/// containers.
fn check_single(value: &Value, constraint: &Constraint, name: &str) -> Result<(), ParamError> {
    if let Some(expected) = constraint.expected_kinds() {
        if !expected.iter().any(|kind| kind.matches(value)) {
            return Err(ParamError::TypeMismatch {
                name: name.to_string(),
                actual: ValueKind::of(value),
                expected,
            });
        }
    }

    let Constraint::Scalar(scalar) = constraint else {
        return Ok(());
    };

    if let Some(allowed) = &scalar.allowed {
        if !value.is_null() && !allowed.iter().any(|a| values_equal(a, value)) {
            return Err(ParamError::ValueNotAllowed {
                name: name.to_string(),
                value: value.clone(),
                allowed: allowed.clone(),
            });
        }
    }

    if let Some(check) = &scalar.check {
        check.check(value).map_err(|error| ParamError::Check {
            name: name.to_string(),
            error,
        })?;
    }

    Ok(())
}
