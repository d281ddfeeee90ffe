//! [`Var`], the `Copy` handle through which nodes are read, combined and differentiated.

use super::{Graph, NodeId};
use crate::autograd::backward::backward;
use crate::autograd::operator::Operator;
use crate::autograd::trace::{trace, GraphTrace};
use crate::error::ScalarGradError;
use std::fmt;
use std::ptr;

/// Handle to a scalar node of a [`Graph`].
///
/// Handles are `Copy`: using the same handle in several expressions makes the node an
/// operand of several consumers, and the backward pass sums the gradient flowing back
/// along each of them.
#[derive(Clone, Copy)]
pub struct Var<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl<'g> Var<'g> {
    pub(crate) fn new(graph: &'g Graph, id: NodeId) -> Self {
        Var { graph, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn graph(self) -> &'g Graph {
        self.graph
    }

    pub fn value(self) -> f64 {
        self.graph.value(self.id)
    }

    /// Accumulated `∂root/∂self` from the backward passes run so far.
    pub fn grad(self) -> f64 {
        self.graph.grad(self.id)
    }

    pub fn operator(self) -> Operator {
        self.graph.operator(self.id)
    }

    pub fn label(self) -> Option<String> {
        self.graph.label(self.id)
    }

    pub fn set_value(self, value: f64) {
        self.graph.set_value(self.id, value);
    }

    pub fn set_grad(self, grad: f64) {
        self.graph.set_grad(self.id, grad);
    }

    pub fn zero_grad(self) {
        self.graph.set_grad(self.id, 0.0);
    }

    /// Attaches a human-readable label and returns the same handle.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.graph.set_label(self.id, label);
        self
    }

    /// `self^exponent` for a fixed real exponent.
    pub fn pow(self, exponent: f64) -> Var<'g> {
        self.unary(self.value().powf(exponent), Operator::Pow(self.id, exponent))
    }

    /// `self^exponent` where the exponent is given as a node.
    ///
    /// Only constant exponents are differentiable here; any other node is rejected.
    pub fn try_pow(self, exponent: Var<'g>) -> Result<Var<'g>, ScalarGradError> {
        self.assert_same_graph(exponent);
        match exponent.operator() {
            Operator::Constant => Ok(self.pow(exponent.value())),
            other => Err(ScalarGradError::InvalidOperation(format!(
                "pow only supports constant exponents, got a '{}' node as exponent",
                other.kind()
            ))),
        }
    }

    pub fn tanh(self) -> Var<'g> {
        self.unary(self.value().tanh(), Operator::Tanh(self.id))
    }

    pub fn exp(self) -> Var<'g> {
        self.unary(self.value().exp(), Operator::Exp(self.id))
    }

    /// `max(0, self)`.
    pub fn relu(self) -> Var<'g> {
        let a = self.value();
        // NaN and +inf pass through unchanged.
        self.unary(if a < 0.0 { 0.0 } else { a }, Operator::Relu(self.id))
    }

    /// Runs reverse-mode differentiation from this node.
    ///
    /// Gradients accumulate: callers must zero them (e.g. with [`Graph::zero_grad`])
    /// before a fresh pass, otherwise every reachable gradient grows by the same
    /// amount again.
    pub fn backward(self) {
        backward(self.graph, self.id);
    }

    /// Read-only enumeration of the nodes and edges reachable from this node.
    pub fn trace(self) -> GraphTrace {
        trace(self.graph, self.id)
    }

    fn unary(self, value: f64, operator: Operator) -> Var<'g> {
        Var::new(self.graph, self.graph.push(value, operator))
    }

    pub(crate) fn binary(self, rhs: Var<'g>, value: f64, operator: Operator) -> Var<'g> {
        self.assert_same_graph(rhs);
        Var::new(self.graph, self.graph.push(value, operator))
    }

    fn assert_same_graph(self, other: Var<'g>) {
        assert!(
            ptr::eq(self.graph, other.graph),
            "cannot combine nodes from different graphs"
        );
    }
}

impl fmt::Debug for Var<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var")
            .field("id", &self.id)
            .field("value", &self.value())
            .field("grad", &self.grad())
            .field("operator", &self.operator())
            .finish()
    }
}

impl fmt::Display for Var<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Var(operator={}, value={}, grad={})",
            self.operator(),
            self.value(),
            self.grad()
        )
    }
}
