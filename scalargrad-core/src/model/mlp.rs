use crate::error::ScalarGradError;
use crate::graph::{Graph, Var};
use crate::nn::{Activation, Init, Layer, Module, Parameter};
use rand::Rng;

/// A multi-layer perceptron: a stack of fully connected [`Layer`]s.
#[derive(Debug, Clone)]
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Creates an MLP with `nin` inputs and one layer per entry of `nouts`.
    ///
    /// Every layer uses tanh and parameters are drawn from `Uniform(-1, 1)`.
    ///
    /// Parameters are appended to `graph`; take the per-iteration checkpoint only
    /// after the model is built.
    pub fn new<R: Rng + ?Sized>(
        graph: &Graph,
        nin: usize,
        nouts: &[usize],
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        Mlp::with_activations(
            graph,
            nin,
            nouts,
            Activation::Tanh,
            Activation::Tanh,
            Init::default(),
            rng,
        )
    }

    /// Creates an MLP with separate activations for hidden layers and the output
    /// layer.
    ///
    /// # Errors
    /// `InvalidConfig` if `nouts` is empty or contains a zero-width layer;
    /// `InitError` if `init` is not a valid distribution.
    pub fn with_activations<R: Rng + ?Sized>(
        graph: &Graph,
        nin: usize,
        nouts: &[usize],
        hidden: Activation,
        output: Activation,
        init: Init,
        rng: &mut R,
    ) -> Result<Self, ScalarGradError> {
        if nouts.is_empty() {
            return Err(ScalarGradError::InvalidConfig(
                "an MLP needs at least one layer".to_string(),
            ));
        }
        if let Some(i) = nouts.iter().position(|&n| n == 0) {
            return Err(ScalarGradError::InvalidConfig(format!(
                "layer {} has no neurons",
                i
            )));
        }
        init.validate()?;

        let sizes: Vec<usize> = std::iter::once(nin).chain(nouts.iter().copied()).collect();
        let last = nouts.len() - 1;
        let layers = sizes
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                let activation = if i == last { output } else { hidden };
                Layer::new(
                    graph,
                    w[0],
                    w[1],
                    activation,
                    init,
                    &mut *rng,
                    &format!("layer{}", i),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Mlp: created {} layers with {} parameters",
            layers.len(),
            layers.iter().map(|l| l.num_parameters()).sum::<usize>()
        );
        Ok(Mlp { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn nin(&self) -> usize {
        self.layers[0].neurons()[0].nin()
    }

    pub fn nout(&self) -> usize {
        self.layers[self.layers.len() - 1].nout()
    }
}

impl Module for Mlp {
    fn forward<'g>(
        &self,
        graph: &'g Graph,
        input: &[Var<'g>],
    ) -> Result<Vec<Var<'g>>, ScalarGradError> {
        let mut output = input.to_vec();
        for layer in &self.layers {
            output = layer.forward(graph, &output)?;
        }
        Ok(output)
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.layers.iter().flat_map(|l| l.parameters()).collect()
    }

    fn named_parameters(&self) -> Vec<(String, Parameter)> {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(i, l)| {
                l.named_parameters()
                    .into_iter()
                    .map(move |(name, p)| (format!("layer{}.{}", i, name), p))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "mlp_test.rs"]
mod tests;
