//! Optimizers for training neural networks.
//!
//! This module provides the `Optimizer` trait and stochastic gradient descent.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::{Sgd, SgdConfig};
