use crate::error::ScalarGradError;
use crate::graph::{Graph, Var};
use crate::nn::Parameter;
use std::fmt::Debug;

/// The base trait for all neural network modules (neurons, layers, models).
///
/// Modules own [`Parameter`]s (node ids) rather than handles, so they can outlive
/// any single forward pass and the arena rewinds between passes.
pub trait Module: Debug {
    /// Performs a forward pass, recording the computation in `graph`.
    ///
    /// # Errors
    /// Returns `ScalarGradError::ShapeMismatch` if `input` does not have the number of
    /// features the module expects.
    fn forward<'g>(
        &self,
        graph: &'g Graph,
        input: &[Var<'g>],
    ) -> Result<Vec<Var<'g>>, ScalarGradError>;

    /// Returns all learnable parameters, including those of sub-modules.
    fn parameters(&self) -> Vec<Parameter>;

    /// Returns all learnable parameters with hierarchical names
    /// (e.g. `"layer1.neuron0.w2"`).
    fn named_parameters(&self) -> Vec<(String, Parameter)>;

    fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Resets the gradient of every parameter to zero.
    fn zero_grad(&self, graph: &Graph) {
        for param in self.parameters() {
            graph.set_grad(param.id(), 0.0);
        }
    }
}
