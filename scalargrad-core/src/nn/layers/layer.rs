use crate::error::ScalarGradError;
use crate::graph::{Graph, Var};
use crate::nn::{Activation, Init, Module, Neuron, Parameter};
use rand::Rng;

/// `nout` neurons reading the same input.
#[derive(Debug, Clone)]
pub struct Layer {
    pub(crate) neurons: Vec<Neuron>,
}

impl Layer {
    /// Creates a layer of `nout` neurons with `nin` inputs each, named
    /// `{name}.neuron{j}`.
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        nin: usize,
        nout: usize,
        activation: Activation,
        init: Init,
        rng: &mut R,
        name: &str,
    ) -> Result<Self, ScalarGradError> {
        let neurons = (0..nout)
            .map(|j| {
                Neuron::new(
                    graph,
                    nin,
                    activation,
                    init,
                    &mut *rng,
                    &format!("{}.neuron{}", name, j),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Layer { neurons })
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn nout(&self) -> usize {
        self.neurons.len()
    }
}

impl Module for Layer {
    fn forward<'g>(
        &self,
        graph: &'g Graph,
        input: &[Var<'g>],
    ) -> Result<Vec<Var<'g>>, ScalarGradError> {
        self.neurons
            .iter()
            .map(|n| n.activate(graph, input))
            .collect()
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.neurons.iter().flat_map(|n| n.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        self.neurons
            .iter()
            .enumerate()
            .flat_map(|(j, n)| {
                n.named_parameters()
                    .into_iter()
                    .map(move |(name, p)| (format!("neuron{}.{}", j, name), p))
            })
            .collect()
    }
}
