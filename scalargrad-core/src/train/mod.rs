//! Gradient-descent training loop for [`Module`]s.
//!
//! Each iteration records a fresh forward pass on top of the model's parameters,
//! back-propagates the loss, updates the parameters and rewinds the graph to the
//! checkpoint taken before the first iteration.

use crate::error::ScalarGradError;
use crate::graph::{Graph, Var};
use crate::nn::{Module, MseLoss, Reduction};
use crate::optim::{Optimizer, Sgd, SgdConfig};
use log::{info, warn};

/// Settings for [`fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub iterations: usize,
    pub learning_rate: f64,
    pub momentum: f64,
    pub reduction: Reduction,
    /// Log the loss every `log_every` iterations; defaults to a tenth of the run.
    pub log_every: Option<usize>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            iterations: 1000,
            learning_rate: 0.01,
            momentum: 0.0,
            reduction: Reduction::Sum,
            log_every: None,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), ScalarGradError> {
        if self.iterations == 0 {
            return Err(ScalarGradError::InvalidConfig(
                "iterations must be at least 1".to_string(),
            ));
        }
        if self.log_every == Some(0) {
            return Err(ScalarGradError::InvalidConfig(
                "log_every must be at least 1".to_string(),
            ));
        }
        self.sgd_config().validate()
    }

    fn sgd_config(&self) -> SgdConfig {
        SgdConfig {
            lr: self.learning_rate,
            momentum: self.momentum,
            ..SgdConfig::default()
        }
    }

    fn log_interval(&self) -> usize {
        self.log_every.unwrap_or((self.iterations / 10).max(1))
    }
}

/// Loss history of a [`fit`] run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitReport {
    /// Loss value before each parameter update.
    pub losses: Vec<f64>,
}

impl FitReport {
    pub fn initial_loss(&self) -> Option<f64> {
        self.losses.first().copied()
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.losses.last().copied()
    }
}

/// Trains `model` on `(xs, ys)` with plain gradient descent on the squared error.
///
/// The model's parameters must already live in `graph`; every node recorded during
/// training is discarded again before this returns.
///
/// # Errors
/// `InvalidConfig` for a rejected `config`, `ShapeMismatch` when `xs`/`ys` disagree
/// with each other or with the model, `InvalidOperation` for an empty dataset.
pub fn fit<M: Module>(
    graph: &mut Graph,
    model: &M,
    xs: &[Vec<f64>],
    ys: &[Vec<f64>],
    config: &TrainConfig,
) -> Result<FitReport, ScalarGradError> {
    config.validate()?;
    check_dataset(xs, ys)?;

    let mut optimizer = Sgd::new(model.parameters(), config.sgd_config())?;
    let loss_fn = MseLoss::new(config.reduction);
    let log_every = config.log_interval();
    let checkpoint = graph.checkpoint();
    let mut report = FitReport {
        losses: Vec::with_capacity(config.iterations),
    };

    for k in 0..config.iterations {
        let step = {
            let graph: &Graph = &*graph;
            training_step(graph, model, &loss_fn, &mut optimizer, xs, ys)
        };
        // Release this iteration's nodes even if the step failed.
        graph.rewind(checkpoint)?;
        let loss = step?;

        if !loss.is_finite() {
            warn!("Iteration: {}, loss is not finite: {}", k, loss);
        }
        if k % log_every == 0 {
            info!("Iteration: {}, Loss: {}", k, loss);
        }
        report.losses.push(loss);
    }
    Ok(report)
}

/// One forward pass, backward pass and parameter update; returns the loss value.
fn training_step<M: Module>(
    graph: &Graph,
    model: &M,
    loss_fn: &MseLoss,
    optimizer: &mut Sgd,
    xs: &[Vec<f64>],
    ys: &[Vec<f64>],
) -> Result<f64, ScalarGradError> {
    let mut predictions = Vec::new();
    let mut targets = Vec::new();
    for (x, y) in xs.iter().zip(ys.iter()) {
        let output = forward_sample(graph, model, x)?;
        if output.len() != y.len() {
            return Err(ScalarGradError::ShapeMismatch {
                expected: output.len(),
                actual: y.len(),
                operation: "fit (targets)".to_string(),
            });
        }
        predictions.extend(output);
        targets.extend_from_slice(y);
    }
    let loss = loss_fn.calculate(graph, &predictions, &targets)?;

    optimizer.zero_grad(graph);
    loss.backward();
    optimizer.step(graph)?;
    Ok(loss.value())
}

/// Runs the model on every sample and returns the output values.
///
/// Nodes recorded for the predictions are discarded before returning.
pub fn predict<M: Module>(
    graph: &mut Graph,
    model: &M,
    xs: &[Vec<f64>],
) -> Result<Vec<Vec<f64>>, ScalarGradError> {
    let checkpoint = graph.checkpoint();
    let predictions = {
        let graph: &Graph = &*graph;
        xs.iter()
            .map(|x| {
                let output = forward_sample(graph, model, x)?;
                Ok(output.iter().map(|v| v.value()).collect())
            })
            .collect::<Result<Vec<Vec<f64>>, ScalarGradError>>()
    };
    graph.rewind(checkpoint)?;
    predictions
}

fn forward_sample<'g, M: Module>(
    graph: &'g Graph,
    model: &M,
    x: &[f64],
) -> Result<Vec<Var<'g>>, ScalarGradError> {
    let inputs: Vec<Var<'g>> = x.iter().map(|&v| graph.constant(v)).collect();
    model.forward(graph, &inputs)
}

fn check_dataset(xs: &[Vec<f64>], ys: &[Vec<f64>]) -> Result<(), ScalarGradError> {
    if xs.len() != ys.len() {
        return Err(ScalarGradError::ShapeMismatch {
            expected: xs.len(),
            actual: ys.len(),
            operation: "fit (samples)".to_string(),
        });
    }
    if xs.is_empty() {
        return Err(ScalarGradError::InvalidOperation(
            "cannot fit on an empty dataset".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "train_test.rs"]
mod tests;
