//! Error types for the visual state model.

use thiserror::Error;

use crate::graph::NodeId;

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a model value would violate its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Node ids must equal their position in the node list.
    #[error("node at position {position} has id {id}")]
    MisnumberedNode { position: usize, id: NodeId },

    /// An edge endpoint does not name an existing node.
    #[error("edge {edge} references unknown node {node}")]
    UnknownNode { edge: usize, node: NodeId },

    /// Edges must connect two distinct nodes.
    #[error("edge {edge} is a self-loop on node {node}")]
    SelfLoop { edge: usize, node: NodeId },

    /// The link table must have one slot per node.
    #[error("linked list has {nodes} nodes but {links} links")]
    LinkCountMismatch { nodes: usize, links: usize },

    /// A link or head index points past the end of the node list.
    #[error("link index {index} out of range for {len} nodes")]
    LinkOutOfRange { index: usize, len: usize },
}
