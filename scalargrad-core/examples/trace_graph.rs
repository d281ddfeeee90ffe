//! Builds a single tanh neuron, back-propagates through it and prints the graph.

use scalargrad_core::Graph;

fn main() {
    env_logger::init();

    let graph = Graph::new();
    let x1 = graph.leaf(2.0).with_label("x1");
    let x2 = graph.leaf(0.0).with_label("x2");
    let w1 = graph.leaf(-3.0).with_label("w1");
    let w2 = graph.leaf(1.0).with_label("w2");
    let b = graph.leaf(6.881_373_587_019_543).with_label("b");

    let n = (x1 * w1 + x2 * w2 + b).with_label("n");
    let o = n.tanh().with_label("o");
    o.backward();

    let trace = o.trace();
    println!("nodes:");
    for node in &trace.nodes {
        println!("  {}: {}", node.id, node);
    }
    println!("edges:");
    for (from, to) in &trace.edges {
        println!("  {} -> {}", from, to);
    }
}
