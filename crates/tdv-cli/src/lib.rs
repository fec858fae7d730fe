//! # tdv-cli: Command-Line Interface
//!
//! Provides the `tdv` binary:
//!
//! ```bash
//! tdv params --schema filtering.schema.yaml --config filtering.yaml
//! tdv params --schema s.yaml --config c.json --exclude random_state
//! tdv diagram diagrams.npy stacked.json
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live here and return an
//!   exit code.
//! - Handlers delegate to `tdv-params` and `tdv-diagram`; no validation
//!   logic is duplicated here.
//! - Validation failures exit with 1 and print the validator's message to
//!   stderr unchanged.

pub mod diagram;
pub mod params;
