//! # Pipeline Errors
//!
//! Validation errors pass through unchanged: `Display` and `source()` are
//! those of the wrapped validator error.

use tdv_diagram::DiagramError;
use tdv_params::ParamError;
use thiserror::Error;

/// Error returned by component operations.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Hyperparameters failed schema validation.
    #[error(transparent)]
    Params(#[from] ParamError),

    /// An input diagram batch failed structural validation.
    #[error(transparent)]
    Diagram(#[from] DiagramError),

    /// `transform` or `resample` was called before `fit`.
    #[error("{component} is not fitted; call `fit` first")]
    NotFitted {
        /// Name of the component.
        component: String,
    },

    /// The component itself failed.
    #[error("{component}: {reason}")]
    Component {
        /// Name of the component.
        component: String,
        /// What went wrong.
        reason: String,
    },
}
