use crate::graph::{Graph, NodeId};
use std::collections::HashSet;

/// Topologically sorts the nodes reachable from `root` through operand edges.
///
/// Every node appears exactly once and after all of its operands, so `root` is last.
/// The depth-first post-order walk keeps its own stack instead of recursing, which
/// keeps long chains (e.g. a loss summed over many samples) off the call stack.
pub fn topological_sort(graph: &Graph, root: NodeId) -> Vec<NodeId> {
    let nodes = graph.nodes();
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut sorted_list: Vec<NodeId> = Vec::new();
    // (node, operands_pushed)
    let mut stack: Vec<(NodeId, bool)> = vec![(root, false)];

    while let Some((node_id, operands_pushed)) = stack.pop() {
        if operands_pushed {
            sorted_list.push(node_id);
            continue;
        }
        if !visited.insert(node_id) {
            continue;
        }
        stack.push((node_id, true));
        // Reversed so the first operand is visited first.
        for &operand in nodes[node_id.index()].operator.operands().iter().rev() {
            if !visited.contains(&operand) {
                stack.push((operand, false));
            }
        }
    }

    log::trace!(
        "topological_sort: {} nodes reachable from {}",
        sorted_list.len(),
        root
    );
    sorted_list
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
