//! # tdv-pipeline: Component Composition
//!
//! Traits that processing components implement, layered over a minimal
//! capability set:
//!
//! - [`Configurable`]: exposes a component's hyperparameters and schema;
//!   the provided [`Configurable::validate_params`] runs the schema validator.
//! - [`Transformer`]: `fit` and `transform`; `fit_transform` is provided.
//! - [`Resampler`]: adds `resample`; `transform_resample` and
//!   `fit_transform_resample` are provided.
//!
//! Validation failures reach the caller as [`PipelineError::Params`] or
//! [`PipelineError::Diagram`], wrapping the validator's error unchanged.

pub mod error;
pub mod traits;

pub use error::PipelineError;
pub use traits::{Configurable, Resampler, Transformer};
