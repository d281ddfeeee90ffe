//! Scalar reverse-mode automatic differentiation.
//!
//! Arithmetic on [`Var`] handles records a node per operation in an arena owned by a
//! [`Graph`]. Calling [`Var::backward`] on a scalar output walks the recorded graph in
//! reverse topological order and accumulates `∂output/∂node` into every reachable node.
//!
//! ```
//! use scalargrad_core::Graph;
//!
//! let graph = Graph::new();
//! let x = graph.leaf(3.0);
//! let y = x.pow(2.0) + 2.0 * x + 1.0;
//! y.backward();
//! assert_eq!(y.value(), 16.0);
//! assert_eq!(x.grad(), 8.0);
//! ```
//!
//! The [`nn`], [`model`], [`optim`] and [`train`] modules build a small multi-layer
//! perceptron and a gradient-descent loop on top of the engine.

pub mod autograd;
pub mod graph;

pub mod model;
pub mod nn;
pub mod optim;
pub mod train;
pub mod utils;

pub mod error;

pub use autograd::operator::Operator;
pub use error::ScalarGradError;
pub use graph::{Checkpoint, Graph, NodeId, Var};
