use crate::autograd::graph::topological_sort;
use crate::autograd::operator::Operator;
use crate::graph::{Graph, NodeId};
use std::collections::HashSet;
use std::fmt;

/// Snapshot of one node, as handed to graph visualizers.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceNode {
    pub id: NodeId,
    pub label: Option<String>,
    pub operator: Operator,
    pub value: f64,
    pub grad: f64,
}

impl fmt::Display for TraceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | data: {:.4} | grad: {:.4}",
            self.label.as_deref().unwrap_or("?"),
            self.operator,
            self.value,
            self.grad
        )
    }
}

/// Nodes reachable from a root and the operand edges between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphTrace {
    /// Nodes in topological order (root last).
    pub nodes: Vec<TraceNode>,
    /// Directed `(operand, consumer)` pairs, each listed once.
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphTrace {
    pub fn node(&self, id: NodeId) -> Option<&TraceNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Enumerates the nodes and edges reachable from `root` without mutating the graph.
pub fn trace(graph: &Graph, root: NodeId) -> GraphTrace {
    let order = topological_sort(graph, root);
    let nodes = graph.nodes();

    let mut seen_edges = HashSet::new();
    let mut trace = GraphTrace {
        nodes: Vec::with_capacity(order.len()),
        edges: Vec::new(),
    };
    for id in order {
        let node = &nodes[id.index()];
        for &operand in node.operator.operands().iter() {
            if seen_edges.insert((operand, id)) {
                trace.edges.push((operand, id));
            }
        }
        trace.nodes.push(TraceNode {
            id,
            label: node.label.clone(),
            operator: node.operator,
            value: node.value,
            grad: node.grad,
        });
    }
    trace
}
