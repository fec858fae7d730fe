//! # Diagram Structural Checks
//!
//! Single-pass, fail-fast validation of a persistence diagram batch. Checks
//! run in a fixed order: shape, homology-dimension labels, diagonal. A shape
//! failure is reported before any numeric column is read.

use std::fmt;

use ndarray::{s, ArrayBase, ArrayView3, Axis, CowArray, Data, Dimension, Ix3};
use thiserror::Error;

/// Number of components in each diagram point: birth, death, dimension.
pub const POINT_WIDTH: usize = 3;

/// What was wrong with a batch's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeProblem {
    /// The array does not have exactly three axes.
    Rank,
    /// The last axis does not have length [`POINT_WIDTH`].
    PointWidth,
}

impl fmt::Display for ShapeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rank => f.write_str("should be a 3d array"),
            Self::PointWidth => write!(
                f,
                "should be a 3d array with a last axis of {POINT_WIDTH} components"
            ),
        }
    }
}

/// Error raised when a diagram batch violates a structural invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagramError {
    /// Wrong number of axes or wrong point width.
    #[error("diagram {problem}: shape = {shape:?}")]
    Shape {
        /// Which shape rule was broken.
        problem: ShapeProblem,
        /// Actual shape of the input.
        shape: Vec<usize>,
    },

    /// `+inf` appears alongside other homology dimensions.
    #[error(
        "inf is a valid homology dimension for a stacked diagram but it should be \
         the only one: homology dimensions = {dimensions:?}"
    )]
    MixedDimensions {
        /// Sorted distinct homology dimensions of the first batch element.
        dimensions: Vec<f64>,
    },

    /// A homology dimension is negative or not integer-valued.
    #[error(
        "all homology dimensions should be non-negative integers: \
         {dimension} can't be cast to an unsigned int of the same value"
    )]
    InvalidDimension {
        /// The offending value.
        dimension: f64,
    },

    /// Some points have `death < birth`.
    #[error(
        "all points of all persistence diagrams should be above the diagonal \
         (death >= birth): {count} of {total} points are under the diagonal"
    )]
    BelowDiagonal {
        /// Number of offending points across the whole batch.
        count: usize,
        /// Total number of points in the batch.
        total: usize,
    },
}

/// Validate a batch of persistence diagrams.
///
/// On success returns the batch as a three-dimensional array: a borrowed view
/// of the input when `copy` is false, or an owned copy when `copy` is true.
///
/// # Errors
///
/// - [`DiagramError::Shape`] if the input is not `(batch, points, 3)`.
/// - [`DiagramError::MixedDimensions`] if `+inf` is not the only homology
///   dimension of the first batch element.
/// - [`DiagramError::InvalidDimension`] for negative or fractional labels.
/// - [`DiagramError::BelowDiagonal`] with the number of points having
///   `death < birth` (or a NaN coordinate) across the whole batch.
pub fn check_diagram<'a, S, D>(
    diagram: &'a ArrayBase<S, D>,
    copy: bool,
) -> Result<CowArray<'a, f64, Ix3>, DiagramError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let result = check_view(diagram);
    let view = match result {
        Ok(view) => view,
        Err(e) => {
            tracing::debug!(shape = ?diagram.shape(), error = %e, "diagram rejected");
            return Err(e);
        }
    };

    if copy {
        Ok(CowArray::from(view.to_owned()))
    } else {
        Ok(CowArray::from(view))
    }
}

fn check_view<'a, S, D>(diagram: &'a ArrayBase<S, D>) -> Result<ArrayView3<'a, f64>, DiagramError>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let shape_error = |problem| DiagramError::Shape {
        problem,
        shape: diagram.shape().to_vec(),
    };

    if diagram.ndim() != 3 {
        return Err(shape_error(ShapeProblem::Rank));
    }
    if diagram.shape()[2] != POINT_WIDTH {
        return Err(shape_error(ShapeProblem::PointWidth));
    }
    let view = diagram
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| shape_error(ShapeProblem::Rank))?;

    check_dimensions(&homology_dimensions(&view))?;

    let count = count_below_diagonal(&view);
    if count > 0 {
        return Err(DiagramError::BelowDiagonal {
            count,
            total: view.len_of(Axis(0)) * view.len_of(Axis(1)),
        });
    }

    Ok(view)
}

/// Sorted, distinct homology dimensions of the first batch element.
///
/// Empty for an empty batch.
pub fn homology_dimensions(diagram: &ArrayView3<'_, f64>) -> Vec<f64> {
    if diagram.len_of(Axis(0)) == 0 {
        return Vec::new();
    }
    let mut dims: Vec<f64> = diagram.slice(s![0, .., 2]).iter().copied().collect();
    dims.sort_by(f64::total_cmp);
    dims.dedup_by(|a, b| a == b || (a.is_nan() && b.is_nan()));
    dims
}

fn check_dimensions(dims: &[f64]) -> Result<(), DiagramError> {
    for &dim in dims {
        if dim == f64::INFINITY {
            if dims.len() != 1 {
                return Err(DiagramError::MixedDimensions {
                    dimensions: dims.to_vec(),
                });
            }
        } else if dim.trunc() != dim || dim < 0.0 {
            // NaN and -inf also fail the truncation test.
            return Err(DiagramError::InvalidDimension { dimension: dim });
        }
    }
    Ok(())
}

/// Number of points in the batch that do not satisfy `death >= birth`.
pub fn count_below_diagonal(diagram: &ArrayView3<'_, f64>) -> usize {
    diagram
        .lanes(Axis(2))
        .into_iter()
        .filter(|point| !(point[1] >= point[0]))
        .count()
}
