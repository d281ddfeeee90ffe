use crate::autograd::graph::topological_sort;
use crate::graph::{Graph, NodeId};
use std::collections::HashMap;

/// Computes `∂root/∂node` for every node reachable from `root` and adds it to the
/// node's stored gradient.
///
/// The pass seeds `root` with `1.0`, walks the topological order root-first and, for
/// each node, pushes `upstream * local_derivative` onto every operand. Contributions
/// from several consumers of the same node are summed in a per-pass map before being
/// added to the stored gradients, so a second call without zeroing adds exactly the
/// same amounts again.
///
/// Non-finite values are propagated as IEEE-754 arithmetic dictates.
pub fn backward(graph: &Graph, root: NodeId) {
    let sorted_nodes = topological_sort(graph, root);
    log::debug!(
        "backward: propagating from {} through {} nodes",
        root,
        sorted_nodes.len()
    );

    // Key: NodeId, Value: gradient accumulated during this pass
    let mut grad_map: HashMap<NodeId, f64> = HashMap::with_capacity(sorted_nodes.len());
    grad_map.insert(root, 1.0);

    let mut nodes = graph.nodes_mut();
    for node_id in sorted_nodes.iter().rev() {
        let upstream = grad_map.get(node_id).copied().unwrap_or(0.0);
        let node = &nodes[node_id.index()];
        let derivatives = node.operator.local_derivatives(node.value, &nodes);
        for (operand, local) in derivatives.into_iter().flatten() {
            *grad_map.entry(operand).or_insert(0.0) += upstream * local;
        }
    }

    for node_id in &sorted_nodes {
        if let Some(grad) = grad_map.get(node_id) {
            nodes[node_id.index()].grad += grad;
        }
    }
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
