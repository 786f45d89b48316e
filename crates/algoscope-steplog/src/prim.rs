//! Prim's minimum spanning tree, recorded eagerly.
//!
//! The tree grows from node 0. Every round marks all edges crossing the cut
//! as comparing and takes the lightest one; among equal weights the edge
//! listed first in the graph wins. A round with no crossing edge means the
//! rest of the graph is unreachable and the run ends with a spanning tree of
//! the start component only.

use algoscope_engine::{Generated, Snapshot};
use algoscope_model::{EdgeStatus, Graph, NodeId, NodeStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::recorder::{Annotate, Recorder};

/// One recorded instant: the graph with its statuses plus the tree so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimSnapshot {
    pub graph: Graph,
    pub in_tree: Vec<bool>,
    /// Edge index chosen this round, if any.
    pub candidate: Option<usize>,
    pub total_weight: u64,
    pub description: String,
}

impl Snapshot for PrimSnapshot {
    fn description(&self) -> &str {
        &self.description
    }
}

impl Annotate for PrimSnapshot {
    fn annotate(&mut self, description: String) {
        self.description = description;
    }
}

/// An accepted tree edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MstEdge {
    pub edge: usize,
    pub from: NodeId,
    pub to: NodeId,
    pub weight: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrimResult {
    /// Accepted edges in the order they joined the tree.
    pub edges: Vec<MstEdge>,
    pub total_weight: u64,
    /// Whether the tree reaches every node.
    pub spanning: bool,
}

/// Record Prim's algorithm on `graph`, starting from node 0.
pub fn generate_prim(graph: &Graph) -> Generated<PrimSnapshot, PrimResult> {
    let n = graph.node_count();
    let mut working = graph.clone();
    working.reset_statuses();
    let mut rec = Recorder::new(PrimSnapshot {
        graph: working,
        in_tree: vec![false; n],
        candidate: None,
        total_weight: 0,
        description: String::new(),
    });

    if n == 0 {
        rec.record("Graph is empty, no spanning tree to build.");
        return Generated {
            steps: rec.finish(),
            aux: PrimResult {
                spanning: true,
                ..PrimResult::default()
            },
        };
    }

    let start = NodeId(0);
    rec.state.in_tree[0] = true;
    rec.state.graph.set_node_status(start, NodeStatus::Processing);
    rec.record(format!("Starting MST from node {}.", graph.label(start)));

    let mut accepted = Vec::with_capacity(n - 1);
    let mut reached = 1;
    while reached < n {
        let mut best: Option<(usize, u64)> = None;
        let mut crossing = 0;
        for (index, edge) in graph.edges().iter().enumerate() {
            if rec.state.in_tree[edge.source.0] == rec.state.in_tree[edge.target.0] {
                continue;
            }
            crossing += 1;
            rec.state.graph.set_edge_status(index, EdgeStatus::Comparing);
            let weight = edge.cost();
            if best.map_or(true, |(_, lightest)| weight < lightest) {
                best = Some((index, weight));
            }
        }

        let Some((index, weight)) = best else {
            rec.state.candidate = None;
            rec.state.graph.set_node_status(start, NodeStatus::Visited);
            rec.record("Graph is disconnected. MST complete for this component.");
            break;
        };

        rec.state.candidate = Some(index);
        rec.record(format!(
            "Comparing {crossing} crossing edges; the lightest weighs {weight}."
        ));

        let edge = &graph.edges()[index];
        let (from, to) = if rec.state.in_tree[edge.source.0] {
            (edge.source, edge.target)
        } else {
            (edge.target, edge.source)
        };
        rec.state.in_tree[to.0] = true;
        rec.state.graph.set_node_status(to, NodeStatus::Visited);
        for other in 0..graph.edge_count() {
            if other != index && rec.state.graph.edges()[other].status == EdgeStatus::Comparing {
                rec.state.graph.set_edge_status(other, EdgeStatus::Default);
            }
        }
        rec.state.graph.set_edge_status(index, EdgeStatus::Traversed);
        rec.state.total_weight += weight;
        rec.state.candidate = None;
        accepted.push(MstEdge { edge: index, from, to, weight });
        reached += 1;
        rec.record(format!(
            "Added edge {} - {} with weight {weight} to MST.",
            graph.label(from),
            graph.label(to)
        ));
    }

    rec.state.graph.set_node_status(start, NodeStatus::Visited);
    let spanning = reached == n;
    if spanning {
        let total = rec.state.total_weight;
        rec.record(format!("MST complete: total weight {total}."));
    }

    let total_weight = rec.state.total_weight;
    debug!(nodes = n, edges = accepted.len(), total_weight, spanning, "prim recorded");
    Generated {
        steps: rec.finish(),
        aux: PrimResult {
            edges: accepted,
            total_weight,
            spanning,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_model::{GraphEdge, GraphNode, Position};

    fn nodes(count: usize) -> Vec<GraphNode> {
        (0..count).map(|i| GraphNode::new(i, Position::default())).collect()
    }

    #[test]
    fn square_with_diagonal() {
        let graph = Graph::new(
            nodes(4),
            vec![
                GraphEdge::weighted(0, 1, 1),
                GraphEdge::weighted(1, 2, 4),
                GraphEdge::weighted(2, 3, 2),
                GraphEdge::weighted(3, 0, 5),
                GraphEdge::weighted(0, 2, 3),
            ],
        )
        .unwrap();
        let Generated { steps, aux } = generate_prim(&graph);
        assert!(aux.spanning);
        assert_eq!(aux.total_weight, 6);
        let chosen: Vec<usize> = aux.edges.iter().map(|e| e.edge).collect();
        assert_eq!(chosen, vec![0, 4, 2]);

        let last = steps.last().unwrap();
        assert_eq!(last.description, "MST complete: total weight 6.");
        assert!(last.graph.nodes().iter().all(|n| n.status == NodeStatus::Visited));
        let traversed = last
            .graph
            .edges()
            .iter()
            .filter(|e| e.status == EdgeStatus::Traversed)
            .count();
        assert_eq!(traversed, 3);
        assert!(last.graph.edges().iter().all(|e| e.status != EdgeStatus::Comparing));
    }

    #[test]
    fn ties_prefer_earlier_edge() {
        let graph = Graph::new(
            nodes(3),
            vec![GraphEdge::weighted(0, 2, 2), GraphEdge::weighted(0, 1, 2)],
        )
        .unwrap();
        let Generated { aux, .. } = generate_prim(&graph);
        assert_eq!(aux.edges[0].to, NodeId(2));
    }

    #[test]
    fn disconnected_graph_stops_at_component() {
        let graph = Graph::new(nodes(4), vec![GraphEdge::weighted(0, 1, 7), GraphEdge::weighted(2, 3, 1)]).unwrap();
        let Generated { steps, aux } = generate_prim(&graph);
        assert!(!aux.spanning);
        assert_eq!(aux.total_weight, 7);
        assert_eq!(
            steps.last().map(|s| s.description.as_str()),
            Some("Graph is disconnected. MST complete for this component.")
        );
    }

    #[test]
    fn source_graph_untouched() {
        let graph = Graph::new(nodes(2), vec![GraphEdge::weighted(0, 1, 3)]).unwrap();
        let before = graph.clone();
        let _ = generate_prim(&graph);
        assert_eq!(graph, before);
    }

    #[test]
    fn empty_and_single_node() {
        let Generated { steps, aux } = generate_prim(&Graph::empty());
        assert_eq!(steps.len(), 1);
        assert!(aux.spanning);

        let Generated { steps, aux } = generate_prim(&Graph::new(nodes(1), Vec::new()).unwrap());
        assert_eq!(steps.len(), 2);
        assert!(aux.edges.is_empty());
    }
}
