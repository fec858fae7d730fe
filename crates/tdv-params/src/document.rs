//! # Schema and Configuration Documents
//!
//! Loads [`Schema`]s and configuration mappings from YAML or JSON files.
//!
//! ## Schema document format
//!
//! ```yaml
//! n_jobs: { type: [integer, "null"] }
//! metric: { type: string, in: [bottleneck, wasserstein] }
//! epsilon: { type: real, range: { min: 0.0 } }
//! homology_dimensions: { type: sequence, of: { type: integer, range: { min: 0 } } }
//! metric_params: { type: mapping, of: { p: { type: real } } }
//! callback: null
//! ```
//!
//! `type` is a kind name, a list of kind names, or one of the container
//! tags `sequence` / `mapping`. `in` lists allowed values and `range`
//! attaches an [`Interval`] check; both are scalar-only. `of` is the element
//! constraint of a sequence or the nested schema of a mapping.
//!
//! Documents are validated against the embedded
//! `schema-document.schema.json` (Draft 2020-12) before conversion, so
//! structural mistakes are reported with the instance path that caused them.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::checks::Interval;
use crate::constraint::{Constraint, ScalarConstraint, Schema};
use crate::value::ValueKind;

const SCHEMA_DOCUMENT_SCHEMA: &str = include_str!("../schemas/schema-document.schema.json");

/// Error loading or converting a schema or configuration document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read '{path}': {source}")]
    Io {
        /// Path of the document.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file is not valid YAML or JSON.
    #[error("cannot parse '{path}': {reason}")]
    Parse {
        /// Path of the document.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// The schema document does not follow the schema-document format.
    #[error("malformed schema document:\n{}", violation_lines(.violations))]
    Malformed {
        /// Every structural violation found.
        violations: Vec<DocumentViolation>,
    },

    /// A constraint is well-formed but cannot be converted.
    #[error("invalid constraint at '{path}': {reason}")]
    InvalidConstraint {
        /// Dotted path of the constraint within the document.
        path: String,
        /// Why the constraint was rejected.
        reason: String,
    },

    /// A configuration document is not a mapping at the top level.
    #[error("configuration document must be a mapping, found {found}")]
    NotAMapping {
        /// Kind of the top-level value.
        found: ValueKind,
    },

    /// The embedded schema-document schema failed to compile.
    #[error("schema-document schema failed to compile: {0}")]
    MetaSchema(String),
}

/// A single structural violation in a schema document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentViolation {
    /// JSON Pointer path to the violating value in the document.
    pub instance_path: String,
    /// JSON Pointer path within the schema-document schema.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for DocumentViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

fn violation_lines(violations: &[DocumentViolation]) -> String {
    let lines: Vec<String> = violations.iter().map(ToString::to_string).collect();
    lines.join("\n")
}

/// Wire form of a single constraint.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstraintDoc {
    #[serde(rename = "type", default)]
    kind: Option<TypeDoc>,
    #[serde(rename = "in", default)]
    allowed: Option<Vec<Value>>,
    #[serde(default)]
    of: Option<Value>,
    #[serde(default)]
    range: Option<Interval>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeDoc {
    One(String),
    Many(Vec<String>),
}

fn meta_validator() -> Result<&'static Validator, DocumentError> {
    static META: OnceLock<Result<Validator, String>> = OnceLock::new();
    META.get_or_init(|| {
        let schema: Value =
            serde_json::from_str(SCHEMA_DOCUMENT_SCHEMA).map_err(|e| e.to_string())?;
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.build(&schema).map_err(|e| e.to_string())
    })
    .as_ref()
    .map_err(|e| DocumentError::MetaSchema(e.clone()))
}

/// Convert a parsed document into a [`Schema`].
///
/// # Errors
///
/// Returns [`DocumentError::Malformed`] with every structural violation if
/// the document does not follow the schema-document format, or
/// [`DocumentError::InvalidConstraint`] for constraints that are well-formed
/// but contradictory (e.g. `of` on a scalar type).
pub fn parse_schema(document: &Value) -> Result<Schema, DocumentError> {
    let violations: Vec<DocumentViolation> = meta_validator()?
        .iter_errors(document)
        .map(|e| DocumentViolation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if !violations.is_empty() {
        tracing::debug!(count = violations.len(), "schema document rejected");
        return Err(DocumentError::Malformed { violations });
    }

    schema_from_value(document, "")
}

/// Load a [`Schema`] from a YAML (`.yaml`/`.yml`) or JSON file.
pub fn load_schema(path: &Path) -> Result<Schema, DocumentError> {
    let document = load_document(path)?;
    let schema = parse_schema(&document)?;
    tracing::debug!(path = %path.display(), parameters = schema.len(), "loaded schema");
    Ok(schema)
}

/// Load a configuration mapping from a YAML or JSON file.
pub fn load_config(path: &Path) -> Result<Map<String, Value>, DocumentError> {
    match load_document(path)? {
        Value::Object(map) => Ok(map),
        other => Err(DocumentError::NotAMapping {
            found: ValueKind::of(&other),
        }),
    }
}

fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let parse_error = |reason: String| DocumentError::Parse {
        path: path.display().to_string(),
        reason,
    };

    match ext {
        "yaml" | "yml" => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .map_err(|e| parse_error(format!("invalid YAML: {e}")))?;
            yaml_to_json(yaml, "").map_err(parse_error)
        }
        _ => serde_json::from_str(&content).map_err(|e| parse_error(format!("invalid JSON: {e}"))),
    }
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn schema_from_value(value: &Value, path: &str) -> Result<Schema, DocumentError> {
    let Value::Object(entries) = value else {
        return Err(DocumentError::InvalidConstraint {
            path: path.to_string(),
            reason: format!("expected a mapping of constraints, found {}", ValueKind::of(value)),
        });
    };

    let mut schema = Schema::new();
    for (name, entry) in entries {
        let constraint = constraint_from_value(entry, &child_path(path, name))?;
        schema.insert(name.clone(), constraint);
    }
    Ok(schema)
}

fn constraint_from_value(value: &Value, path: &str) -> Result<Constraint, DocumentError> {
    if value.is_null() {
        return Ok(Constraint::Any);
    }

    let invalid = |reason: String| DocumentError::InvalidConstraint {
        path: path.to_string(),
        reason,
    };

    let doc: ConstraintDoc =
        serde_json::from_value(value.clone()).map_err(|e| invalid(e.to_string()))?;

    let container_only = doc.allowed.is_none() && doc.range.is_none();

    match doc.kind {
        Some(TypeDoc::One(ref tag)) if tag == "sequence" => {
            if !container_only {
                return Err(invalid("`in` and `range` are not allowed on a sequence".into()));
            }
            let element = match &doc.of {
                Some(of) => constraint_from_value(of, &format!("{path}[]"))?,
                None => Constraint::Any,
            };
            Ok(Constraint::sequence(element))
        }
        Some(TypeDoc::One(ref tag)) if tag == "mapping" => {
            if !container_only {
                return Err(invalid("`in` and `range` are not allowed on a mapping".into()));
            }
            let of = doc
                .of
                .as_ref()
                .ok_or_else(|| invalid("a mapping constraint requires `of`".into()))?;
            Ok(Constraint::mapping(schema_from_value(of, path)?))
        }
        kind => {
            if doc.of.is_some() {
                return Err(invalid("`of` is only allowed with type sequence or mapping".into()));
            }
            let mut scalar = ScalarConstraint::new();
            scalar.kinds = match kind {
                None => None,
                Some(TypeDoc::One(tag)) => Some(vec![parse_kind(&tag).map_err(&invalid)?]),
                Some(TypeDoc::Many(tags)) => Some(
                    tags.iter()
                        .map(|t| parse_kind(t))
                        .collect::<Result<_, _>>()
                        .map_err(&invalid)?,
                ),
            };
            scalar.allowed = doc.allowed;
            if let Some(range) = doc.range {
                scalar = scalar.with_check(range);
            }
            Ok(Constraint::Scalar(scalar))
        }
    }
}

fn parse_kind(tag: &str) -> Result<ValueKind, String> {
    match tag {
        "sequence" | "mapping" => Err(format!(
            "container type `{tag}` cannot be combined with other types; use `array` or `object`"
        )),
        other => other.parse::<ValueKind>().map_err(|e| e.to_string()),
    }
}

/// Convert a parsed YAML document into the JSON value model.
///
/// Parameter names must be strings: a YAML key such as `1` or `true` is
/// rejected rather than stringified. Non-finite floats (`.inf`, `.nan`) have
/// no JSON form and are rejected too. Tags are dropped. Errors name the
/// dotted path of the offending entry.
fn yaml_to_json(yaml: serde_yaml::Value, path: &str) -> Result<Value, String> {
    let at = |path: &str| {
        if path.is_empty() {
            "document root".to_string()
        } else {
            format!("'{path}'")
        }
    };

    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => Value::from(i),
            (None, Some(u), _) => Value::from(u),
            (None, None, Some(f)) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| format!("non-finite number {f} at {}", at(path)))?,
            _ => return Err(format!("unsupported number {n} at {}", at(path))),
        },
        serde_yaml::Value::Sequence(items) => items
            .into_iter()
            .map(|item| yaml_to_json(item, &format!("{path}[]")))
            .collect::<Result<_, _>>()
            .map(Value::Array)?,
        serde_yaml::Value::Mapping(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, item) in entries {
                let name = match key {
                    serde_yaml::Value::String(name) => name,
                    other => {
                        return Err(format!(
                            "parameter names must be strings, found key {} at {}",
                            ValueKind::of(&yaml_to_json(other, path)?),
                            at(path)
                        ))
                    }
                };
                let item = yaml_to_json(item, &child_path(path, &name))?;
                map.insert(name, item);
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value, path)?,
    })
}
