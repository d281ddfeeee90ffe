//! Reverse-mode differentiation over the node arena.
//!
//! [`graph::topological_sort`] orders the nodes reachable from a root,
//! [`backward::backward`] sweeps that order root-first applying each
//! [`operator::Operator`]'s local derivative rule, and [`trace::trace`] exposes the same
//! nodes and edges read-only.

pub mod backward;
pub mod grad_check;
pub mod graph;
pub mod operator;
pub mod trace;

pub use backward::backward;
pub use graph::topological_sort;
pub use operator::Operator;
pub use trace::{trace, GraphTrace, TraceNode};
