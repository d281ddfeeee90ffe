use crate::graph::{Graph, NodeId};

/// Checks that two slices of scalars are element-wise within `tolerance`.
/// Panics with the first offending index otherwise.
pub fn check_values_near(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "Length mismatch");

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let diff = (a - e).abs();
        if !(diff <= tolerance) {
            panic!(
                "Value mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Checks the stored gradients of `ids` against `expected`.
pub fn check_grads_near(graph: &Graph, ids: &[NodeId], expected: &[f64], tolerance: f64) {
    let grads: Vec<f64> = ids.iter().map(|id| graph.grad(*id)).collect();
    check_values_near(&grads, expected, tolerance);
}
