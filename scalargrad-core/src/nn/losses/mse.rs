use crate::error::ScalarGradError;
use crate::graph::{Graph, Var};

/// How per-element squared errors are combined into one loss node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// `Σ (y - ŷ)²`
    #[default]
    Sum,
    /// `Σ (y - ŷ)² / n`
    Mean,
}

/// Squared-error loss between predicted nodes and plain target values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MseLoss {
    reduction: Reduction,
}

impl MseLoss {
    pub fn new(reduction: Reduction) -> Self {
        MseLoss { reduction }
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    /// Builds the loss node for `predictions` against `targets`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the slices differ in length; `InvalidOperation` if both are
    /// empty and the reduction is `Mean`.
    pub fn calculate<'g>(
        &self,
        graph: &'g Graph,
        predictions: &[Var<'g>],
        targets: &[f64],
    ) -> Result<Var<'g>, ScalarGradError> {
        if predictions.len() != targets.len() {
            return Err(ScalarGradError::ShapeMismatch {
                expected: targets.len(),
                actual: predictions.len(),
                operation: "MseLoss::calculate".to_string(),
            });
        }
        let squared = predictions
            .iter()
            .zip(targets.iter())
            .map(|(&pred, &target)| (target - pred).pow(2.0));
        let total = graph.sum(squared);

        match self.reduction {
            Reduction::Sum => Ok(total),
            Reduction::Mean if predictions.is_empty() => Err(ScalarGradError::InvalidOperation(
                "mean squared error of an empty batch".to_string(),
            )),
            Reduction::Mean => Ok(total / predictions.len() as f64),
        }
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
