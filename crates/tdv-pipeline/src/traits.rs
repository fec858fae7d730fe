//! # Component Traits
//!
//! Provided methods compose the required ones; implementors override them
//! only when a faster path exists.

use serde_json::{Map, Value};
use tdv_params::{validate_params, Schema};

use crate::error::PipelineError;

/// A component with declaratively validated hyperparameters.
pub trait Configurable {
    /// Name used in log lines and error messages.
    fn name(&self) -> &str;

    /// Schema the component's hyperparameters must satisfy.
    fn schema(&self) -> Schema;

    /// Current hyperparameter values.
    fn params(&self) -> Map<String, Value>;

    /// Parameter names skipped during validation.
    fn excluded_params(&self) -> &[&str] {
        &[]
    }

    /// Validate [`params`](Self::params) against [`schema`](Self::schema).
    ///
    /// Call as the first step of `fit`.
    fn validate_params(&self) -> Result<(), PipelineError> {
        validate_params(&self.params(), &self.schema(), self.excluded_params())?;
        tracing::debug!(component = self.name(), "hyperparameters validated");
        Ok(())
    }
}

/// A component that learns from data and then transforms it.
pub trait Transformer {
    /// Data consumed by `fit` and `transform`.
    type Input: ?Sized;
    /// Result of `transform`.
    type Output;
    /// Optional supervision target.
    type Target;

    /// Learn from `x`, and from `y` for supervised components.
    fn fit(&mut self, x: &Self::Input, y: Option<&Self::Target>) -> Result<&mut Self, PipelineError>;

    /// Transform `x` with what was learned in `fit`.
    fn transform(&self, x: &Self::Input) -> Result<Self::Output, PipelineError>;

    /// Fit to `x` (and `y`), then transform `x`.
    fn fit_transform(
        &mut self,
        x: &Self::Input,
        y: Option<&Self::Target>,
    ) -> Result<Self::Output, PipelineError> {
        self.fit(x, y)?.transform(x)
    }
}

/// A transformer that also resamples the target to match its output.
pub trait Resampler: Transformer {
    /// Resample `y` consistently with how `x` is transformed.
    fn resample(&self, y: &Self::Target, x: &Self::Input) -> Result<Self::Target, PipelineError>;

    /// Transform `x` and resample `y`.
    fn transform_resample(
        &self,
        x: &Self::Input,
        y: &Self::Target,
    ) -> Result<(Self::Output, Self::Target), PipelineError> {
        Ok((self.transform(x)?, self.resample(y, x)?))
    }

    /// Fit to `x` and `y`, then transform `x` and resample `y`.
    fn fit_transform_resample(
        &mut self,
        x: &Self::Input,
        y: &Self::Target,
    ) -> Result<(Self::Output, Self::Target), PipelineError> {
        self.fit(x, Some(y))?.transform_resample(x, y)
    }
}
