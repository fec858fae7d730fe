//! # tdv-params: Hyperparameter Schema Validation
//!
//! Checks free-form hyperparameter bags against declarative schemas before
//! a processing component is configured.
//!
//! ## Model
//!
//! - [`Schema`] maps parameter names to [`Constraint`]s.
//! - [`Constraint`] is a tagged variant: `Any`, `Scalar` (type, membership
//!   and custom checks), `Sequence` (per-element checks) or `Mapping`
//!   (a nested schema). The container/scalar decision is made by the type
//!   system, not by inspecting the constraint at runtime.
//! - [`ParamCheck`] is the pluggable capability for checks that cannot be
//!   expressed as a type or membership test. Closures implement it directly;
//!   [`checks::Interval`] covers numeric ranges.
//!
//! ## Validation
//!
//! [`validate_params`] walks a configuration mapping and fails on the first
//! violation. Nested mappings recurse; sequence elements are reported as
//! `name[index]`. Nothing is coerced, defaulted or mutated.
//!
//! ## Documents
//!
//! The [`document`] module loads schemas and configurations from YAML or JSON
//! files. Schema documents are checked against an embedded JSON Schema before
//! conversion, so malformed documents are rejected with the offending path.
//!
//! ## Crate Policy
//!
//! - No dependency on other `tdv-*` crates.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod checks;
pub mod constraint;
pub mod document;
pub mod validate;
pub mod value;

pub use checks::{Closed, Interval, RangeError};
pub use constraint::{CheckError, Constraint, ParamCheck, ScalarConstraint, Schema};
pub use document::{load_config, load_schema, parse_schema, DocumentError, DocumentViolation};
pub use validate::{validate_params, ParamError};
pub use value::{values_equal, ValueKind};
