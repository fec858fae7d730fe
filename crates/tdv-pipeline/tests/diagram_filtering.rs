//! Integration test: a diagram-filtering component that validates its
//! hyperparameters and its input batch before doing any work.

use ndarray::{Array3, Axis};
use serde_json::{json, Map, Value};
use tdv_diagram::{check_diagram, homology_dimensions, DiagramError};
use tdv_params::{Constraint, Interval, ParamError, ScalarConstraint, Schema, ValueKind};
use tdv_pipeline::{Configurable, PipelineError, Transformer};

/// Moves points with lifetime at most `epsilon` onto the diagonal, for the
/// selected homology dimensions only.
#[derive(Debug)]
struct Filtering {
    homology_dimensions: Option<Vec<i64>>,
    epsilon: f64,
    fitted_dimensions: Option<Vec<f64>>,
}

impl Filtering {
    fn new(homology_dimensions: Option<Vec<i64>>, epsilon: f64) -> Self {
        Self {
            homology_dimensions,
            epsilon,
            fitted_dimensions: None,
        }
    }
}

impl Configurable for Filtering {
    fn name(&self) -> &str {
        "Filtering"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with(
                "homology_dimensions",
                Constraint::kinds([ValueKind::Array, ValueKind::Null]),
            )
            .with(
                "epsilon",
                ScalarConstraint::of_kind(ValueKind::Real).with_check(Interval::at_least(0.0)),
            )
    }

    fn params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("homology_dimensions".into(), json!(self.homology_dimensions));
        params.insert("epsilon".into(), json!(self.epsilon));
        params
    }
}

impl Transformer for Filtering {
    type Input = Array3<f64>;
    type Output = Array3<f64>;
    type Target = ();

    fn fit(&mut self, x: &Array3<f64>, _y: Option<&()>) -> Result<&mut Self, PipelineError> {
        self.validate_params()?;
        let x = check_diagram(x, false)?;
        let dims = match &self.homology_dimensions {
            Some(dims) => dims.iter().map(|&d| d as f64).collect(),
            None => homology_dimensions(&x.view()),
        };
        self.fitted_dimensions = Some(dims);
        Ok(self)
    }

    fn transform(&self, x: &Array3<f64>) -> Result<Array3<f64>, PipelineError> {
        let dims = self
            .fitted_dimensions
            .as_ref()
            .ok_or_else(|| PipelineError::NotFitted {
                component: self.name().to_string(),
            })?;
        let mut xt = check_diagram(x, true)?.into_owned();
        for mut point in xt.lanes_mut(Axis(2)) {
            if dims.contains(&point[2]) && point[1] - point[0] <= self.epsilon {
                point[1] = point[0];
            }
        }
        Ok(xt)
    }
}

fn sample() -> Array3<f64> {
    Array3::from_shape_vec(
        (1, 3, 3),
        vec![0.0, 0.05, 0.0, 0.0, 1.0, 0.0, 0.2, 0.25, 1.0],
    )
    .expect("shape matches")
}

#[test]
fn test_fit_transform_filters_short_lived_points() {
    let mut filtering = Filtering::new(Some(vec![0]), 0.1);
    let xt = filtering.fit_transform(&sample(), None).unwrap();
    assert_eq!(xt[[0, 0, 1]], 0.0);
    assert_eq!(xt[[0, 1, 1]], 1.0);
    // Dimension 1 was not selected.
    assert_eq!(xt[[0, 2, 1]], 0.25);
}

#[test]
fn test_input_is_not_mutated() {
    let x = sample();
    let mut filtering = Filtering::new(None, 0.1);
    filtering.fit_transform(&x, None).unwrap();
    assert_eq!(x, sample());
}

#[test]
fn test_negative_epsilon_aborts_fit() {
    let mut filtering = Filtering::new(None, -1.0);
    let err = filtering.fit(&sample(), None).unwrap_err();
    match err {
        PipelineError::Params(ParamError::Check { name, error }) => {
            assert_eq!(name, "epsilon");
            assert_eq!(error.to_string(), "-1 is not in [0, inf)");
        }
        other => panic!("expected Params(Check), got {other}"),
    }
    assert!(filtering.fitted_dimensions.is_none());
}

#[test]
fn test_bad_diagram_aborts_fit_unchanged() {
    let mut x = sample();
    x[[0, 1, 1]] = -5.0;
    let mut filtering = Filtering::new(None, 0.1);
    let err = filtering.fit(&x, None).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Diagram(DiagramError::BelowDiagonal { count: 1, total: 3 })
    ));
}

#[test]
fn test_transform_before_fit_fails() {
    let filtering = Filtering::new(None, 0.1);
    assert!(matches!(
        filtering.transform(&sample()),
        Err(PipelineError::NotFitted { .. })
    ));
}
