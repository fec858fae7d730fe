//! Integration tests: validate diagram batches the way a downstream
//! consumer does, then use the returned array.

use ndarray::{Array3, Axis};
use tdv_diagram::{check_diagram, check_graph, DiagramError, ShapeProblem};

/// Build a `(batch, points, 3)` batch from `(birth, death, dim)` rows.
fn batch(batch: usize, points: usize, rows: &[(f64, f64, f64)]) -> Array3<f64> {
    let data: Vec<f64> = rows.iter().flat_map(|&(b, d, q)| [b, d, q]).collect();
    Array3::from_shape_vec((batch, points, 3), data).expect("rows match shape")
}

fn lifetimes(x: &Array3<f64>) -> Vec<f64> {
    let checked = check_diagram(x, false).expect("valid batch");
    checked
        .lanes(Axis(2))
        .into_iter()
        .map(|p| p[1] - p[0])
        .collect()
}

#[test]
fn test_shape_2_5_3_passes_and_copy_is_distinct() {
    let rows: Vec<(f64, f64, f64)> = (0..10)
        .map(|i| (i as f64, i as f64 + 0.5, (i % 2) as f64))
        .collect();
    let x = batch(2, 5, &rows);

    let copied = check_diagram(&x, true).expect("valid batch");
    assert!(copied.is_owned());
    assert_eq!(copied, x);

    let owned = copied.into_owned();
    assert_ne!(owned.as_ptr(), x.as_ptr());
}

#[test]
fn test_validated_view_feeds_downstream_computation() {
    let x = batch(1, 3, &[(0.0, 1.0, 0.0), (0.5, 2.0, 0.0), (1.0, 1.0, 1.0)]);
    assert_eq!(lifetimes(&x), vec![1.0, 1.5, 0.0]);
}

#[test]
fn test_single_violation_counted_once() {
    let x = batch(1, 2, &[(0.0, 1.0, 0.0), (2.0, 1.0, 0.0)]);
    match check_diagram(&x, false) {
        Err(DiagramError::BelowDiagonal { count, total }) => {
            assert_eq!(count, 1);
            assert_eq!(total, 2);
        }
        other => panic!("expected BelowDiagonal, got {other:?}"),
    }
}

#[test]
fn test_mixed_infinity_rejected() {
    let x = batch(1, 2, &[(0.0, 1.0, f64::INFINITY), (0.0, 1.0, 0.0)]);
    assert!(matches!(
        check_diagram(&x, false),
        Err(DiagramError::MixedDimensions { .. })
    ));
}

#[test]
fn test_wrong_width_rejected_first() {
    let x = Array3::<f64>::from_elem((4, 5, 2), f64::NAN);
    assert!(matches!(
        check_diagram(&x, false),
        Err(DiagramError::Shape {
            problem: ShapeProblem::PointWidth,
            ..
        })
    ));
}

#[test]
fn test_error_messages_are_actionable() {
    let x = batch(1, 1, &[(0.0, 1.0, 1.5)]);
    let message = check_diagram(&x, false).unwrap_err().to_string();
    assert!(message.contains("1.5"), "message should cite the dimension: {message}");
}

#[test]
fn test_graph_passthrough() {
    let x = batch(1, 1, &[(0.0, 1.0, 0.0)]);
    assert_eq!(check_graph(x.clone()), x);
}
