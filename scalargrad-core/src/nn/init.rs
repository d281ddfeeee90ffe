use crate::error::ScalarGradError;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;

/// How the initial value of a parameter is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// Uniform over `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std: f64 },
    /// Every parameter gets the same value.
    Constant(f64),
}

impl Default for Init {
    /// `Uniform(-1, 1)`, as used for both weights and biases.
    fn default() -> Self {
        Init::Uniform {
            low: -1.0,
            high: 1.0,
        }
    }
}

impl Init {
    /// Checks that the distribution can be built.
    pub fn validate(&self) -> Result<(), ScalarGradError> {
        match *self {
            Init::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite() && low < high) {
                    return Err(ScalarGradError::InitError(format!(
                        "uniform bounds must be finite with low < high, got [{}, {})",
                        low, high
                    )));
                }
            }
            Init::Normal { mean, std } => {
                Normal::new(mean, std)
                    .map_err(|e| ScalarGradError::InitError(format!("normal({}, {}): {}", mean, std, e)))?;
            }
            Init::Constant(value) => {
                if !value.is_finite() {
                    return Err(ScalarGradError::InitError(format!(
                        "constant initial value must be finite, got {}",
                        value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Draws `count` initial values from `rng`.
    ///
    /// The generator is passed explicitly so that seeded runs are reproducible.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<f64>, ScalarGradError> {
        self.validate()?;
        let values = match *self {
            Init::Uniform { low, high } => {
                let dist = Uniform::new(low, high);
                (0..count).map(|_| dist.sample(rng)).collect()
            }
            Init::Normal { mean, std } => {
                let dist = Normal::new(mean, std)
                    .map_err(|e| ScalarGradError::InitError(e.to_string()))?;
                (0..count).map(|_| dist.sample(rng)).collect()
            }
            Init::Constant(value) => vec![value; count],
        };
        Ok(values)
    }
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
