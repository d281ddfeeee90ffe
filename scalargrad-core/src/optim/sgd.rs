use crate::error::ScalarGradError;
use crate::graph::Graph;
use crate::nn::Parameter;
use crate::optim::Optimizer;
use log::{debug, warn};
use std::collections::HashMap;

/// Hyperparameters for [`Sgd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub lr: f64,
    /// Momentum factor (0 disables momentum).
    pub momentum: f64,
    /// L2 penalty added to the gradient.
    pub weight_decay: f64,
    pub nesterov: bool,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            lr: 0.01,
            momentum: 0.0,
            weight_decay: 0.0,
            nesterov: false,
        }
    }
}

impl SgdConfig {
    pub fn with_lr(lr: f64) -> Self {
        SgdConfig {
            lr,
            ..SgdConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), ScalarGradError> {
        if !(self.lr.is_finite() && self.lr > 0.0) {
            return Err(ScalarGradError::InvalidConfig(format!(
                "learning rate must be positive and finite, got {}",
                self.lr
            )));
        }
        if !(self.momentum.is_finite() && self.momentum >= 0.0) {
            return Err(ScalarGradError::InvalidConfig(format!(
                "momentum must be non-negative, got {}",
                self.momentum
            )));
        }
        if !(self.weight_decay.is_finite() && self.weight_decay >= 0.0) {
            return Err(ScalarGradError::InvalidConfig(format!(
                "weight decay must be non-negative, got {}",
                self.weight_decay
            )));
        }
        if self.nesterov && self.momentum == 0.0 {
            return Err(ScalarGradError::InvalidConfig(
                "nesterov momentum requires a non-zero momentum".to_string(),
            ));
        }
        Ok(())
    }
}

/// Implements the Stochastic Gradient Descent (SGD) optimizer.
///
/// Supports momentum, weight decay, and Nesterov momentum. With the defaults a step
/// is `value -= lr * grad`.
#[derive(Debug)]
pub struct Sgd {
    params: Vec<Parameter>,
    config: SgdConfig,
    momentum_buffers: HashMap<Parameter, f64>,
}

impl Sgd {
    pub fn new(
        params: impl IntoIterator<Item = Parameter>,
        config: SgdConfig,
    ) -> Result<Self, ScalarGradError> {
        config.validate()?;
        Ok(Sgd {
            params: params.into_iter().collect(),
            config,
            momentum_buffers: HashMap::new(),
        })
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    pub fn set_lr(&mut self, lr: f64) -> Result<(), ScalarGradError> {
        let config = SgdConfig { lr, ..self.config };
        config.validate()?;
        self.config = config;
        Ok(())
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, graph: &Graph) -> Result<(), ScalarGradError> {
        let SgdConfig {
            lr,
            momentum,
            weight_decay,
            nesterov,
        } = self.config;
        debug!("Sgd: step() over {} params, lr = {}", self.params.len(), lr);

        for param in &self.params {
            let value = param.value(graph);
            let mut d_p = param.grad(graph);
            if !d_p.is_finite() {
                warn!("Sgd: non-finite gradient {} for {:?}", d_p, param);
            }

            if weight_decay != 0.0 {
                d_p += weight_decay * value;
            }

            if momentum != 0.0 {
                let buf = self
                    .momentum_buffers
                    .entry(*param)
                    .and_modify(|b| *b = momentum * *b + d_p)
                    .or_insert(d_p);
                d_p = if nesterov { d_p + momentum * *buf } else { *buf };
            }

            graph.set_value(param.id(), value - lr * d_p);
        }
        Ok(())
    }

    fn zero_grad(&mut self, graph: &Graph) {
        for param in &self.params {
            graph.set_grad(param.id(), 0.0);
        }
    }

    fn params(&self) -> &[Parameter] {
        &self.params
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
