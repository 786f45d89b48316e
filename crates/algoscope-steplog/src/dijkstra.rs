//! Dijkstra's shortest paths, recorded eagerly.
//!
//! The graph is read as undirected with non-negative weights (unweighted
//! edges cost 1). The priority queue orders by distance and then by push
//! order, so equal-distance ties always resolve the same way and the log is
//! a pure function of the input graph.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use algoscope_engine::{Generated, Snapshot, StepLog};
use algoscope_model::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::recorder::{Annotate, Recorder};

/// One recorded instant of a Dijkstra run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DijkstraSnapshot {
    /// Best known distance per node; `None` is infinity.
    pub distances: Vec<Option<u64>>,
    pub visited: Vec<bool>,
    /// Node popped from the queue for this step.
    pub processing: Option<NodeId>,
    /// Edge being relaxed, as `(from, to)`.
    pub highlight_edge: Option<(NodeId, NodeId)>,
    pub description: String,
}

impl Snapshot for DijkstraSnapshot {
    fn description(&self) -> &str {
        &self.description
    }
}

impl Annotate for DijkstraSnapshot {
    fn annotate(&mut self, description: String) {
        self.description = description;
    }
}

/// Final distances and the shortest-path tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DijkstraResult {
    /// `None` when the graph was empty or the start node was missing.
    pub start: Option<NodeId>,
    pub distances: Vec<Option<u64>>,
    /// Predecessor of each node on its shortest path.
    pub previous: Vec<Option<NodeId>>,
}

impl DijkstraResult {
    /// Shortest distance to `target`, `None` if unreachable.
    pub fn distance_to(&self, target: NodeId) -> Option<u64> {
        self.distances.get(target.0).copied().flatten()
    }

    /// Nodes on the shortest path from the start to `target`, both ends
    /// included. `None` if `target` is unreachable.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        let start = self.start?;
        self.distance_to(target)?;

        let mut path = vec![target];
        let mut current = target;
        while current != start {
            current = self.previous.get(current.0).copied().flatten()?;
            path.push(current);
            if path.len() > self.previous.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

fn single_step(description: String, node_count: usize) -> Generated<DijkstraSnapshot, DijkstraResult> {
    let mut steps = StepLog::new();
    steps.push(DijkstraSnapshot {
        distances: vec![None; node_count],
        visited: vec![false; node_count],
        processing: None,
        highlight_edge: None,
        description,
    });
    Generated {
        steps,
        aux: DijkstraResult {
            start: None,
            distances: vec![None; node_count],
            previous: vec![None; node_count],
        },
    }
}

/// Record every step of Dijkstra's algorithm from `start`.
///
/// Steps, in order: initialization; for each queue pop a "processing" step
/// (recorded even for stale entries, which are then skipped), a "visited"
/// step, one step per neighbor check and one per distance update; and a
/// final completion step.
pub fn generate_dijkstra(graph: &Graph, start: NodeId) -> Generated<DijkstraSnapshot, DijkstraResult> {
    let n = graph.node_count();
    if n == 0 {
        return single_step("Graph is empty, no paths to compute.".to_string(), 0);
    }
    if !graph.contains(start) {
        return single_step(format!("Start node {start} is not in the graph."), n);
    }

    let adjacency = graph.adjacency();
    let mut rec = Recorder::new(DijkstraSnapshot {
        distances: vec![None; n],
        visited: vec![false; n],
        processing: None,
        highlight_edge: None,
        description: String::new(),
    });
    let mut previous: Vec<Option<NodeId>> = vec![None; n];
    let mut queue = BinaryHeap::new();
    let mut pushed = 0u64;

    rec.state.distances[start.0] = Some(0);
    queue.push(Reverse((0u64, pushed, start.0)));
    rec.record("Initialize distances to Infinity, start node to 0.");

    while let Some(Reverse((distance, _, u))) = queue.pop() {
        let u = NodeId(u);
        rec.state.processing = Some(u);
        rec.state.highlight_edge = None;
        rec.record(format!("Processing node {} with distance {distance}.", graph.label(u)));

        if rec.state.distances[u.0].is_some_and(|best| distance > best) {
            continue;
        }
        rec.state.visited[u.0] = true;
        rec.record(format!("Marked node {} as visited.", graph.label(u)));

        for neighbor in &adjacency[u.0] {
            let v = neighbor.node;
            let weight = graph.edges()[neighbor.edge].cost();
            rec.state.highlight_edge = Some((u, v));
            rec.record(format!(
                "Checking neighbor {} with edge weight {weight}.",
                graph.label(v)
            ));

            let candidate = distance + weight;
            if rec.state.distances[v.0].map_or(true, |current| candidate < current) {
                rec.state.distances[v.0] = Some(candidate);
                previous[v.0] = Some(u);
                pushed += 1;
                queue.push(Reverse((candidate, pushed, v.0)));
                rec.record(format!(
                    "Updated distance for node {} to {candidate}.",
                    graph.label(v)
                ));
            }
        }
    }

    rec.state.processing = None;
    rec.state.highlight_edge = None;
    rec.record("Algorithm complete.");

    let distances = rec.state.distances.clone();
    debug!(nodes = n, steps = rec.len(), "dijkstra recorded");
    Generated {
        steps: rec.finish(),
        aux: DijkstraResult {
            start: Some(start),
            distances,
            previous,
        },
    }
}
