use super::{MseLoss, Reduction};
use crate::error::ScalarGradError;
use crate::graph::Graph;
use approx::assert_relative_eq;

#[test]
fn test_mse_sum_forward_and_backward() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let preds = [graph.leaf(1.0), graph.leaf(2.0)];
    let loss = MseLoss::new(Reduction::Sum).calculate(&graph, &preds, &[1.5, 1.0])?;

    assert_relative_eq!(loss.value(), 0.25 + 1.0, epsilon = 1e-12);
    loss.backward();
    // d/dŷ (y - ŷ)² = 2(ŷ - y)
    assert_relative_eq!(preds[0].grad(), -1.0, epsilon = 1e-12);
    assert_relative_eq!(preds[1].grad(), 2.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_mse_mean_divides_by_count() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let preds = [graph.leaf(1.0), graph.leaf(2.0)];
    let loss = MseLoss::new(Reduction::Mean).calculate(&graph, &preds, &[1.5, 1.0])?;

    assert_relative_eq!(loss.value(), 0.625, epsilon = 1e-12);
    loss.backward();
    assert_relative_eq!(preds[1].grad(), 1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_mse_default_reduction_is_sum() {
    assert_eq!(MseLoss::default().reduction(), Reduction::Sum);
}

#[test]
fn test_mse_mismatched_lengths() {
    let graph = Graph::new();
    let preds = [graph.leaf(1.0), graph.leaf(2.0)];
    let result = MseLoss::default().calculate(&graph, &preds, &[1.0, 2.0, 3.0]);
    assert!(matches!(result.err().unwrap(), ScalarGradError::ShapeMismatch { .. }));
}

#[test]
fn test_mse_empty_batch() {
    let graph = Graph::new();
    let sum = MseLoss::new(Reduction::Sum).calculate(&graph, &[], &[]).unwrap();
    assert_eq!(sum.value(), 0.0);
    let mean = MseLoss::new(Reduction::Mean).calculate(&graph, &[], &[]);
    assert!(matches!(mean, Err(ScalarGradError::InvalidOperation(_))));
}
