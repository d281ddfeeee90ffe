use crate::error::ScalarGradError;
use crate::graph::{Graph, Var};
use crate::nn::{Activation, Init, Module, Parameter};
use rand::Rng;

/// A single unit computing `activation(b + Σ wᵢ·xᵢ)`.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub(crate) weights: Vec<Parameter>,
    pub(crate) bias: Parameter,
    pub(crate) activation: Activation,
}

impl Neuron {
    /// Creates a neuron with `nin` weights and a bias, all drawn from `init`.
    ///
    /// Parameter nodes are labelled `{name}.w{i}` and `{name}.b`.
    ///
    /// # Errors
    /// Returns `ScalarGradError::InitError` if `init` is not a valid distribution.
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        nin: usize,
        activation: Activation,
        init: Init,
        rng: &mut R,
        name: &str,
    ) -> Result<Self, ScalarGradError> {
        let values = init.sample(rng, nin + 1)?;
        let weights = values[..nin]
            .iter()
            .enumerate()
            .map(|(i, &w)| Parameter::new(graph, w, &format!("{}.w{}", name, i)))
            .collect();
        let bias = Parameter::new(graph, values[nin], &format!("{}.b", name));

        Ok(Neuron {
            weights,
            bias,
            activation,
        })
    }

    pub fn nin(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[Parameter] {
        &self.weights
    }

    pub fn bias(&self) -> Parameter {
        self.bias
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// Forward pass for a single output value.
    pub fn activate<'g>(&self, graph: &'g Graph, input: &[Var<'g>]) -> Result<Var<'g>, ScalarGradError> {
        if input.len() != self.weights.len() {
            return Err(ScalarGradError::ShapeMismatch {
                expected: self.weights.len(),
                actual: input.len(),
                operation: "Neuron::forward".to_string(),
            });
        }
        let act = self
            .weights
            .iter()
            .zip(input.iter())
            .fold(self.bias.var(graph), |acc, (w, &x)| acc + w.var(graph) * x);
        Ok(self.activation.apply(act))
    }
}

impl Module for Neuron {
    fn forward<'g>(
        &self,
        graph: &'g Graph,
        input: &[Var<'g>],
    ) -> Result<Vec<Var<'g>>, ScalarGradError> {
        Ok(vec![self.activate(graph, input)?])
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.weights
            .iter()
            .copied()
            .chain(std::iter::once(self.bias))
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        self.weights
            .iter()
            .enumerate()
            .map(|(i, w)| (format!("w{}", i), *w))
            .chain(std::iter::once(("b".to_string(), self.bias)))
            .collect()
    }
}

#[cfg(test)]
#[path = "neuron_test.rs"]
mod tests;
