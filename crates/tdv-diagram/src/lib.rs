//! # tdv-diagram: Persistence Diagram Validation
//!
//! Checks batches of persistence diagrams before downstream algorithms
//! consume them.
//!
//! A batch is an `f64` array of shape `(batch, points, 3)` whose rows are
//! `(birth, death, homology_dimension)`. [`check_diagram`] enforces:
//!
//! 1. exactly three axes, the last of length 3;
//! 2. homology dimensions of the first batch element are either the single
//!    sentinel `+inf` (a stacked diagram) or non-negative integers;
//! 3. `death >= birth` for every point of every batch element.
//!
//! Only the first batch element is sampled for homology-dimension labels;
//! all batch elements are assumed to share the same labeling. The diagonal
//! check covers the whole batch.
//!
//! [`check_graph`] is an identity passthrough reserved for future structural
//! checks on graph inputs.
//!
//! ## Crate Policy
//!
//! - No dependency on other `tdv-*` crates.
//! - Inputs are never mutated; callers choose between a borrowed view and an
//!   owned copy of a validated batch.

pub mod diagram;
pub mod graph;

pub use diagram::{
    check_diagram, count_below_diagonal, homology_dimensions, DiagramError, ShapeProblem,
};
pub use graph::check_graph;
