//! Live depth-first traversal of an undirected graph.

use algoscope_engine::{FrameSink, Instrument, LiveFrame};
use algoscope_model::{EdgeStatus, Graph, Neighbor, NodeId, NodeStatus};
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

/// Frame sink for graph visualizations.
pub trait GraphSink: FrameSink<LiveFrame<Graph>> + Send {}

impl<K> GraphSink for K where K: FrameSink<LiveFrame<Graph>> + Send {}

struct Walk<'g> {
    adjacency: &'g [Vec<Neighbor>],
    visited: Vec<bool>,
}

fn visit<'a, K: GraphSink>(
    graph: &'a mut Graph,
    walk: &'a mut Walk<'_>,
    node: NodeId,
    parent: Option<NodeId>,
    inst: &'a mut Instrument<K>,
) -> BoxFuture<'a, bool> {
    async move {
        walk.visited[node.0] = true;
        graph.set_node_status(node, NodeStatus::Processing);
        if !inst.step(&*graph, format!("Visiting node {}", graph.label(node))).await {
            return false;
        }
        graph.set_node_status(node, NodeStatus::Visited);
        inst.advance(1);

        let edge_delay = inst.config().scaled_delay(0.5);
        let adjacency = walk.adjacency;
        for neighbor in &adjacency[node.0] {
            if Some(neighbor.node) == parent || walk.visited[neighbor.node.0] {
                continue;
            }
            graph.set_edge_status(neighbor.edge, EdgeStatus::Traversed);
            let description = format!(
                "Traversing edge {} - {}",
                graph.label(node),
                graph.label(neighbor.node)
            );
            if !inst.step_for(&*graph, description, edge_delay).await {
                return false;
            }
            if !visit(graph, walk, neighbor.node, Some(node), inst).await {
                return false;
            }
        }
        true
    }
    .boxed()
}

/// Recursive depth-first search from `start`.
///
/// Each node is shown as processing, then visited; each tree edge is
/// marked traversed and held for half the nominal delay. Nodes unreachable
/// from `start` are left untouched. A lone node is visited in a single frame.
pub async fn depth_first_search<K: GraphSink>(
    graph: &mut Graph,
    start: NodeId,
    inst: &mut Instrument<K>,
) -> bool {
    if graph.is_empty() {
        return inst.complete(&*graph, "Graph is empty, nothing to traverse");
    }
    if !graph.contains(start) {
        return inst.complete(&*graph, format!("Start node {start} is not in the graph"));
    }
    if graph.node_count() == 1 {
        inst.set_total(1);
        graph.set_node_status(start, NodeStatus::Visited);
        return inst.complete(&*graph, "DFS traversal complete: visited 1 of 1 nodes");
    }

    let adjacency = graph.adjacency();
    let mut walk = Walk {
        adjacency: &adjacency,
        visited: vec![false; graph.node_count()],
    };
    inst.set_total(graph.node_count());
    debug!(nodes = graph.node_count(), start = %start, "dfs started");

    if !visit(graph, &mut walk, start, None, inst).await {
        return false;
    }
    let reached = walk.visited.iter().filter(|v| **v).count();
    inst.complete(
        &*graph,
        format!("DFS traversal complete: visited {} of {} nodes", reached, graph.node_count()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_engine::{CancellationTokens, LiveConfig};
    use algoscope_model::{random_connected_graph, GraphConfig, GraphEdge, GraphNode, Position};

    fn path_graph() -> Graph {
        let nodes = (0..4).map(|i| GraphNode::new(i, Position::new(i as f64, 0.0))).collect();
        let edges = vec![
            GraphEdge::new(0, 1),
            GraphEdge::new(1, 2),
            GraphEdge::new(0, 3),
        ];
        Graph::new(nodes, edges).unwrap()
    }

    async fn dfs(graph: &mut Graph, start: NodeId) -> (bool, Vec<LiveFrame<Graph>>) {
        let mut frames = Vec::new();
        let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), LiveConfig::from_millis(0));
        let completed = depth_first_search(graph, start, &mut inst).await;
        drop(inst);
        (completed, frames)
    }

    #[tokio::test]
    async fn visits_in_depth_first_order() {
        let mut graph = path_graph();
        let (completed, frames) = dfs(&mut graph, NodeId(0)).await;
        assert!(completed);

        let visits: Vec<&str> = frames
            .iter()
            .filter_map(|f| f.description.strip_prefix("Visiting node "))
            .collect();
        assert_eq!(visits, vec!["A", "B", "C", "D"]);
        assert!(graph.nodes().iter().all(|n| n.status == NodeStatus::Visited));
        assert!(graph.edges().iter().all(|e| e.status == EdgeStatus::Traversed));
    }

    #[tokio::test]
    async fn node_is_processing_when_first_shown() {
        let mut graph = path_graph();
        let (_, frames) = dfs(&mut graph, NodeId(0)).await;
        let first = &frames[0].state;
        assert_eq!(first.nodes()[0].status, NodeStatus::Processing);
        assert_eq!(first.nodes()[1].status, NodeStatus::Default);
    }

    #[tokio::test]
    async fn spanning_tree_edges_only() {
        let config = GraphConfig::default().with_nodes(10).with_seed(3);
        let mut graph = random_connected_graph(&config).unwrap();
        let (completed, _) = dfs(&mut graph, NodeId(0)).await;
        assert!(completed);
        let traversed = graph
            .edges()
            .iter()
            .filter(|e| e.status == EdgeStatus::Traversed)
            .count();
        assert_eq!(traversed, graph.node_count() - 1);
    }

    #[tokio::test]
    async fn single_node_renders_once() {
        let nodes = vec![GraphNode::new(0, Position::default())];
        let mut graph = Graph::new(nodes, Vec::new()).unwrap();
        let (completed, frames) = dfs(&mut graph, NodeId(0)).await;
        assert!(completed);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].state.nodes()[0].status, NodeStatus::Visited);
        assert!(frames[0].progress.is_complete());
    }

    #[tokio::test]
    async fn empty_graph_single_frame() {
        let mut graph = Graph::empty();
        let (completed, frames) = dfs(&mut graph, NodeId(0)).await;
        assert!(completed);
        assert_eq!(frames.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn edge_hold_is_half_delay() {
        use tokio::time::{Duration, Instant};

        let nodes = (0..2).map(|i| GraphNode::new(i, Position::default())).collect();
        let mut graph = Graph::new(nodes, vec![GraphEdge::new(0, 1)]).unwrap();
        let mut frames = Vec::new();
        let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), LiveConfig::from_millis(200));
        let started = Instant::now();
        assert!(depth_first_search(&mut graph, NodeId(0), &mut inst).await);
        // two node visits at 200ms plus one edge at 100ms
        assert_eq!(started.elapsed(), Duration::from_millis(500));
    }
}
