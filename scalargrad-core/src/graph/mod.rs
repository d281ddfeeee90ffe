//! Arena holding every node of a computation graph.
//!
//! Nodes are appended as operations execute and addressed by [`NodeId`]. Operands
//! always refer to earlier entries, so the graph is acyclic by construction. The
//! arena can be rewound to a [`Checkpoint`] to release the nodes of one forward pass
//! while keeping the parameters created before it.

use crate::autograd::operator::Operator;
use crate::error::ScalarGradError;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;

pub mod ops;
pub mod var;

pub use var::Var;

/// Stable identity of a node inside its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// Storage for a single scalar node.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) operator: Operator,
    pub(crate) label: Option<String>,
}

/// Arena length captured by [`Graph::checkpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Number of nodes that survive a rewind to this checkpoint.
    pub fn len(self) -> usize {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Append-only arena of scalar nodes.
///
/// A `Graph` is single-threaded: nodes are mutated through a `RefCell`, which makes the
/// type `!Sync`.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: RefCell<Vec<Node>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Creates a trainable leaf node (an input or parameter).
    pub fn leaf(&self, value: f64) -> Var<'_> {
        let id = self.push(value, Operator::Leaf);
        Var::new(self, id)
    }

    /// Creates a constant leaf node, as used for auto-wrapped literals.
    pub fn constant(&self, value: f64) -> Var<'_> {
        let id = self.push(value, Operator::Constant);
        Var::new(self, id)
    }

    /// Returns a handle to an existing node.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this graph (for example after a rewind
    /// discarded it).
    pub fn var(&self, id: NodeId) -> Var<'_> {
        assert!(
            id.index() < self.len(),
            "{} is not part of a graph holding {} nodes",
            id,
            self.len()
        );
        Var::new(self, id)
    }

    /// Sums the given handles left to right with `Add` nodes.
    ///
    /// An empty iterator yields a constant `0.0`.
    pub fn sum<'g, I>(&'g self, vars: I) -> Var<'g>
    where
        I: IntoIterator<Item = Var<'g>>,
    {
        let mut iter = vars.into_iter();
        match iter.next() {
            Some(first) => iter.fold(first, |acc, v| acc + v),
            None => self.constant(0.0),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    pub fn value(&self, id: NodeId) -> f64 {
        self.nodes.borrow()[id.index()].value
    }

    pub fn grad(&self, id: NodeId) -> f64 {
        self.nodes.borrow()[id.index()].grad
    }

    pub fn operator(&self, id: NodeId) -> Operator {
        self.nodes.borrow()[id.index()].operator
    }

    pub fn label(&self, id: NodeId) -> Option<String> {
        self.nodes.borrow()[id.index()].label.clone()
    }

    /// Overwrites a node's value, as an optimizer step does for parameters.
    ///
    /// Nodes computed from the old value are not recomputed.
    pub fn set_value(&self, id: NodeId, value: f64) {
        self.nodes.borrow_mut()[id.index()].value = value;
    }

    pub fn set_grad(&self, id: NodeId, grad: f64) {
        self.nodes.borrow_mut()[id.index()].grad = grad;
    }

    pub fn set_label(&self, id: NodeId, label: impl Into<String>) {
        self.nodes.borrow_mut()[id.index()].label = Some(label.into());
    }

    /// Resets the gradient of every node in the arena to zero.
    pub fn zero_grad(&self) {
        for node in self.nodes.borrow_mut().iter_mut() {
            node.grad = 0.0;
        }
    }

    /// Marks the current end of the arena.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.len())
    }

    /// Drops every node created after `checkpoint`.
    ///
    /// Requires exclusive access, so no [`Var`] handle can outlive the nodes it points
    /// to. Bare [`NodeId`]s past the checkpoint become dangling and must not be reused.
    pub fn rewind(&mut self, checkpoint: Checkpoint) -> Result<(), ScalarGradError> {
        let nodes = self.nodes.get_mut();
        if checkpoint.0 > nodes.len() {
            return Err(ScalarGradError::InvalidCheckpoint {
                checkpoint: checkpoint.0,
                len: nodes.len(),
            });
        }
        log::trace!("Rewinding graph from {} to {} nodes", nodes.len(), checkpoint.0);
        nodes.truncate(checkpoint.0);
        Ok(())
    }

    pub(crate) fn push(&self, value: f64, operator: Operator) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId::new(nodes.len());
        debug_assert!(operator.operands().iter().all(|operand| *operand < id));
        nodes.push(Node {
            value,
            grad: 0.0,
            operator,
            label: None,
        });
        id
    }

    pub(crate) fn nodes(&self) -> Ref<'_, Vec<Node>> {
        self.nodes.borrow()
    }

    pub(crate) fn nodes_mut(&self) -> RefMut<'_, Vec<Node>> {
        self.nodes.borrow_mut()
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
