use thiserror::Error;

use crate::NodeId;

/// Faults in the graph data itself, as opposed to "no route" outcomes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("node {0} is not in the graph")]
    UnknownNode(NodeId),

    #[error("node {0} is declared more than once")]
    DuplicateNode(NodeId),

    #[error("no edge from {from} to {to}")]
    MissingEdge { from: NodeId, to: NodeId },

    #[error("edge {from} -> {to} has a non-finite \"{key}\" weight")]
    NonFiniteWeight { from: NodeId, to: NodeId, key: String },

    #[error("edge {from} -> {to} has negative weight {weight}")]
    NegativeWeight { from: NodeId, to: NodeId, weight: f64 },
}
