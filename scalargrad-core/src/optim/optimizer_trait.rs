use crate::error::ScalarGradError;
use crate::graph::Graph;
use crate::nn::Parameter;

/// Trait defining the common interface for all optimizers.
///
/// Optimizers are responsible for updating parameter values in place based on the
/// gradients accumulated by the last backward pass.
pub trait Optimizer {
    /// Performs a single optimization step.
    fn step(&mut self, graph: &Graph) -> Result<(), ScalarGradError>;

    /// Clears the gradients of all parameters managed by the optimizer.
    ///
    /// Call this before every backward pass: gradients accumulate otherwise.
    fn zero_grad(&mut self, graph: &Graph);

    /// The parameters this optimizer updates.
    fn params(&self) -> &[Parameter];
}
