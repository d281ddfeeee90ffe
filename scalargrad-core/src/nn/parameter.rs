use crate::graph::{Graph, NodeId, Var};
use std::fmt;
use std::ops::Deref;

/// A trainable leaf node owned by a module.
///
/// Parameters must be created before the graph checkpoint used for per-iteration
/// rewinds, so that they survive every rewind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Parameter(NodeId);

impl Parameter {
    /// Creates a labelled leaf holding `value`.
    pub fn new(graph: &Graph, value: f64, name: &str) -> Self {
        Parameter(graph.leaf(value).with_label(name).id())
    }

    pub fn id(&self) -> NodeId {
        self.0
    }

    /// Handle for use in a forward pass.
    pub fn var<'g>(&self, graph: &'g Graph) -> Var<'g> {
        graph.var(self.0)
    }

    pub fn value(&self, graph: &Graph) -> f64 {
        graph.value(self.0)
    }

    pub fn grad(&self, graph: &Graph) -> f64 {
        graph.grad(self.0)
    }
}

// Allow using a Parameter wherever a NodeId is expected.
impl Deref for Parameter {
    type Target = NodeId;

    fn deref(&self) -> &NodeId {
        &self.0
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_is_labelled_leaf() {
        let graph = Graph::new();
        let p = Parameter::new(&graph, 0.3, "layer0.neuron0.w0");
        assert_eq!(p.value(&graph), 0.3);
        assert_eq!(p.grad(&graph), 0.0);
        assert_eq!(graph.label(p.id()).as_deref(), Some("layer0.neuron0.w0"));
        assert!(p.var(&graph).operator().is_leaf());
        assert_eq!(*p, p.id());
    }
}
