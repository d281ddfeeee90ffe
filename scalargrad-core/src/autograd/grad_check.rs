//! Finite-difference verification of analytical gradients.

use crate::error::ScalarGradError;
use crate::graph::{Graph, Var};
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(ScalarGradError),
    #[error("Numerical gradient is NaN or infinite for input {input_index}. Details: Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
    #[error("Invalid gradient check settings: {0}")]
    InvalidSettings(String),
}

impl From<ScalarGradError> for GradCheckError {
    fn from(err: ScalarGradError) -> Self {
        GradCheckError::ForwardPassError(err)
    }
}

/// Checks the gradients from one backward pass against central finite differences.
///
/// `func` builds a scalar expression from one leaf per entry of `inputs` in a fresh
/// graph. For every input the analytical gradient must be within `tolerance` of
/// `(f(x + ε) - f(x - ε)) / 2ε`, either absolutely or relative to the larger
/// magnitude.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: for<'g> Fn(&'g Graph, &[Var<'g>]) -> Result<Var<'g>, ScalarGradError>,
{
    if !(epsilon > 0.0 && epsilon.is_finite()) {
        return Err(GradCheckError::InvalidSettings(format!(
            "epsilon must be positive and finite, got {}",
            epsilon
        )));
    }
    if !(tolerance >= 0.0) {
        return Err(GradCheckError::InvalidSettings(format!(
            "tolerance must be non-negative, got {}",
            tolerance
        )));
    }

    let analytical_grads = analytical_gradients(&func, inputs)?;

    for (input_index, &analytical_grad) in analytical_grads.iter().enumerate() {
        let (loss_plus, loss_minus) = perturbed_outputs(&func, inputs, input_index, epsilon)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index,
                loss_plus,
                loss_minus,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index,
                value: analytical_grad,
            });
        }

        if !relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = tolerance,
            max_relative = tolerance
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    Ok(())
}

/// Gradient of `func` with respect to each input, from a single backward pass.
pub fn analytical_gradients<F>(func: &F, inputs: &[f64]) -> Result<Vec<f64>, GradCheckError>
where
    F: for<'g> Fn(&'g Graph, &[Var<'g>]) -> Result<Var<'g>, ScalarGradError>,
{
    let graph = Graph::new();
    let leaves: Vec<Var<'_>> = inputs.iter().map(|&x| graph.leaf(x)).collect();
    let output = func(&graph, &leaves)?;
    output.backward();
    let grads = leaves.iter().map(|leaf| leaf.grad()).collect();
    Ok(grads)
}

/// Central finite-difference estimate of `∂func/∂inputs[index]`.
pub fn numerical_gradient<F>(
    func: &F,
    inputs: &[f64],
    index: usize,
    epsilon: f64,
) -> Result<f64, GradCheckError>
where
    F: for<'g> Fn(&'g Graph, &[Var<'g>]) -> Result<Var<'g>, ScalarGradError>,
{
    let (loss_plus, loss_minus) = perturbed_outputs(func, inputs, index, epsilon)?;
    Ok((loss_plus - loss_minus) / (2.0 * epsilon))
}

fn perturbed_outputs<F>(
    func: &F,
    inputs: &[f64],
    index: usize,
    epsilon: f64,
) -> Result<(f64, f64), GradCheckError>
where
    F: for<'g> Fn(&'g Graph, &[Var<'g>]) -> Result<Var<'g>, ScalarGradError>,
{
    let mut shifted = inputs.to_vec();
    shifted[index] = inputs[index] + epsilon;
    let loss_plus = evaluate(func, &shifted)?;
    shifted[index] = inputs[index] - epsilon;
    let loss_minus = evaluate(func, &shifted)?;
    Ok((loss_plus, loss_minus))
}

fn evaluate<F>(func: &F, inputs: &[f64]) -> Result<f64, GradCheckError>
where
    F: for<'g> Fn(&'g Graph, &[Var<'g>]) -> Result<Var<'g>, ScalarGradError>,
{
    let graph = Graph::new();
    let leaves: Vec<Var<'_>> = inputs.iter().map(|&x| graph.leaf(x)).collect();
    let output = func(&graph, &leaves)?;
    Ok(output.value())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
