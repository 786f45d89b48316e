//! Undirected graphs for the traversal, shortest-path and MST visualizers.
//!
//! Node ids are dense: the node with id `n` lives at position `n` in the
//! node list. Construction through [`Graph::new`] checks this along with the
//! edge endpoint invariant, so algorithms can index without bounds surprises.

use std::fmt;

use crate::error::{Error, Result};

/// Identifier of a graph node (its index in the node list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canvas position of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Visual status of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeStatus {
    #[default]
    Default,
    /// Currently being expanded
    Processing,
    /// Fully explored / part of the tree
    Visited,
    /// Finalized
    Sorted,
}

impl NodeStatus {
    /// Whether the status only makes sense while a run is in progress.
    pub fn is_transient(&self) -> bool {
        matches!(self, NodeStatus::Processing)
    }
}

/// Visual status of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EdgeStatus {
    #[default]
    Default,
    /// Candidate under consideration
    Comparing,
    /// Taken by the traversal or accepted into a tree
    Traversed,
}

/// A node in the graph visualizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphNode {
    pub id: NodeId,
    pub position: Position,
    pub label: String,
    pub status: NodeStatus,
}

impl GraphNode {
    /// Create a node labelled after its id (`A`, `B`, ...).
    pub fn new(id: usize, position: Position) -> Self {
        Self {
            id: NodeId(id),
            position,
            label: default_label(id),
            status: NodeStatus::Default,
        }
    }

    /// Override the generated label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// An undirected edge. `weight` is absent for unweighted graphs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub weight: Option<u32>,
    pub status: EdgeStatus,
}

impl GraphEdge {
    /// Create an unweighted edge.
    pub fn new(source: usize, target: usize) -> Self {
        Self {
            source: NodeId(source),
            target: NodeId(target),
            weight: None,
            status: EdgeStatus::Default,
        }
    }

    /// Create a weighted edge.
    pub fn weighted(source: usize, target: usize, weight: u32) -> Self {
        Self {
            weight: Some(weight),
            ..Self::new(source, target)
        }
    }

    /// Whether this edge joins `a` and `b` in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint.
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.source == node {
            Some(self.target)
        } else if self.target == node {
            Some(self.source)
        } else {
            None
        }
    }

    /// Weight used by weighted algorithms; unweighted edges count as 1.
    pub fn cost(&self) -> u64 {
        u64::from(self.weight.unwrap_or(1))
    }
}

/// Neighbor entry in an adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub node: NodeId,
    pub edge: usize,
}

/// A validated undirected graph.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl Graph {
    /// Build a graph, checking dense ids and edge endpoints.
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Result<Self> {
        for (position, node) in nodes.iter().enumerate() {
            if node.id.0 != position {
                return Err(Error::MisnumberedNode { position, id: node.id });
            }
        }
        for (index, edge) in edges.iter().enumerate() {
            for endpoint in [edge.source, edge.target] {
                if endpoint.0 >= nodes.len() {
                    return Err(Error::UnknownNode { edge: index, node: endpoint });
                }
            }
            if edge.source == edge.target {
                return Err(Error::SelfLoop { edge: index, node: edge.source });
            }
        }
        Ok(Self { nodes, edges })
    }

    /// The empty graph.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.0)
    }

    /// Label of a node, falling back to its numeric id.
    pub fn label(&self, id: NodeId) -> String {
        self.node(id)
            .map(|n| n.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Find a node by its label.
    pub fn find_by_label(&self, label: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.label == label).map(|n| n.id)
    }

    /// Whether an edge already joins `a` and `b`.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.edges.iter().any(|e| e.connects(a, b))
    }

    /// Set a node's status. Unknown ids are ignored.
    pub fn set_node_status(&mut self, id: NodeId, status: NodeStatus) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.status = status;
        }
    }

    /// Set an edge's status by edge index. Unknown indices are ignored.
    pub fn set_edge_status(&mut self, edge: usize, status: EdgeStatus) {
        if let Some(e) = self.edges.get_mut(edge) {
            e.status = status;
        }
    }

    /// Reset all node and edge statuses to their defaults.
    pub fn reset_statuses(&mut self) {
        for node in &mut self.nodes {
            node.status = NodeStatus::Default;
        }
        for edge in &mut self.edges {
            edge.status = EdgeStatus::Default;
        }
    }

    /// Undirected adjacency lists in edge insertion order.
    pub fn adjacency(&self) -> Vec<Vec<Neighbor>> {
        let mut adj = vec![Vec::new(); self.nodes.len()];
        for (index, edge) in self.edges.iter().enumerate() {
            adj[edge.source.0].push(Neighbor { node: edge.target, edge: index });
            adj[edge.target.0].push(Neighbor { node: edge.source, edge: index });
        }
        adj
    }

    /// Whether every node is reachable from node 0.
    pub fn is_connected(&self) -> bool {
        if self.nodes.is_empty() {
            return true;
        }
        let adj = self.adjacency();
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![0usize];
        seen[0] = true;
        while let Some(current) = stack.pop() {
            for n in &adj[current] {
                if !seen[n.node.0] {
                    seen[n.node.0] = true;
                    stack.push(n.node.0);
                }
            }
        }
        seen.into_iter().all(|s| s)
    }
}

/// Letter label for small ids, `N<id>` beyond `Z`.
pub fn default_label(id: usize) -> String {
    if id < 26 {
        char::from(b'A' + id as u8).to_string()
    } else {
        format!("N{}", id)
    }
}
