use crate::graph::{Node, NodeId};
use std::fmt;
use std::ops::Deref;

/// The operation that produced a node, together with the operands it read.
///
/// This is the closed set of primitives the engine differentiates. Negation,
/// subtraction and division are not primitives: they are recorded as
/// `Mul(a, -1)`, `Add(a, -b)` and `Mul(a, b^-1)` respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operator {
    /// Trainable input or parameter.
    Leaf,
    /// Literal wrapped by the graph builder (e.g. the `2.0` in `2.0 * x`).
    Constant,
    Add(NodeId, NodeId),
    Mul(NodeId, NodeId),
    /// Power with a fixed real exponent.
    Pow(NodeId, f64),
    Tanh(NodeId),
    Exp(NodeId),
    Relu(NodeId),
}

/// Operand list of a node: at most two ids, stored inline.
#[derive(Debug, Clone, Copy)]
pub struct Operands {
    ids: [NodeId; 2],
    len: usize,
}

impl Operands {
    fn none() -> Self {
        Operands { ids: [NodeId::new(0); 2], len: 0 }
    }

    fn one(a: NodeId) -> Self {
        Operands { ids: [a, a], len: 1 }
    }

    fn two(a: NodeId, b: NodeId) -> Self {
        Operands { ids: [a, b], len: 2 }
    }
}

impl Deref for Operands {
    type Target = [NodeId];

    fn deref(&self) -> &[NodeId] {
        &self.ids[..self.len]
    }
}

impl Operator {
    /// Returns the nodes this operator read, in operand order.
    pub fn operands(&self) -> Operands {
        match *self {
            Operator::Leaf | Operator::Constant => Operands::none(),
            Operator::Add(a, b) | Operator::Mul(a, b) => Operands::two(a, b),
            Operator::Pow(a, _) | Operator::Tanh(a) | Operator::Exp(a) | Operator::Relu(a) => {
                Operands::one(a)
            }
        }
    }

    /// True for nodes without operands.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Operator::Leaf | Operator::Constant)
    }

    /// Short tag naming the operator kind, used by graph traces.
    pub fn kind(&self) -> &'static str {
        match self {
            Operator::Leaf => "leaf",
            Operator::Constant => "const",
            Operator::Add(..) => "+",
            Operator::Mul(..) => "*",
            Operator::Pow(..) => "pow",
            Operator::Tanh(_) => "tanh",
            Operator::Exp(_) => "exp",
            Operator::Relu(_) => "relu",
        }
    }

    /// Local partial derivatives `∂out/∂operand` for each operand.
    ///
    /// `out` is the node's own forward value and `nodes` the arena the operands
    /// live in. A repeated operand (as in `Mul(a, a)`) yields two entries, which the
    /// backward pass sums.
    pub(crate) fn local_derivatives(&self, out: f64, nodes: &[Node]) -> [Option<(NodeId, f64)>; 2] {
        let value = |id: NodeId| nodes[id.index()].value;
        match *self {
            Operator::Leaf | Operator::Constant => [None, None],
            Operator::Add(a, b) => [Some((a, 1.0)), Some((b, 1.0))],
            Operator::Mul(a, b) => [Some((a, value(b))), Some((b, value(a)))],
            Operator::Pow(a, k) => [Some((a, k * value(a).powf(k - 1.0))), None],
            Operator::Tanh(a) => [Some((a, 1.0 - out * out)), None],
            Operator::Exp(a) => [Some((a, out)), None],
            Operator::Relu(a) => {
                let local = if out.is_nan() {
                    f64::NAN
                } else if out > 0.0 {
                    1.0
                } else {
                    0.0
                };
                [Some((a, local)), None]
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Pow(_, k) => write!(f, "**{}", k),
            other => f.write_str(other.kind()),
        }
    }
}
