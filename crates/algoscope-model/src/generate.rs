//! Seeded input generators.
//!
//! Every generator takes an explicit seed so fixtures are reproducible. Graphs
//! are connected by construction: a spanning structure is laid down first and
//! random extra edges are added afterwards.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::graph::{Graph, GraphEdge, GraphNode, NodeId, Position};
use crate::item::Item;
use crate::linked_list::LinkedListState;

/// Configuration for random arrays.
#[derive(Debug, Clone)]
pub struct ArrayConfig {
    /// Number of items
    pub size: usize,
    /// Smallest value (inclusive)
    pub min: u32,
    /// Largest value (inclusive)
    pub max: u32,
    /// RNG seed
    pub seed: u64,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            size: 40,
            min: 5,
            max: 100,
            seed: 42,
        }
    }
}

impl ArrayConfig {
    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generate a random array of items.
pub fn random_items(config: &ArrayConfig) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (lo, hi) = if config.min <= config.max {
        (config.min, config.max)
    } else {
        (config.max, config.min)
    };
    (0..config.size)
        .map(|i| Item::new(i as u32, rng.gen_range(lo..=hi)))
        .collect()
}

/// Configuration for random graphs.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Number of nodes
    pub node_count: usize,
    /// Extra edges to attempt, as a fraction of the node count
    pub extra_edge_ratio: f64,
    /// Inclusive weight range; `None` produces an unweighted graph
    pub weight_range: Option<(u32, u32)>,
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Keep nodes this far from the canvas border
    pub padding: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_count: 8,
            extra_edge_ratio: 0.5,
            weight_range: None,
            width: 800.0,
            height: 450.0,
            padding: 40.0,
            seed: 42,
        }
    }
}

impl GraphConfig {
    /// Weighted defaults used by the MST visualizer.
    pub fn weighted() -> Self {
        Self {
            weight_range: Some((1, 20)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_nodes(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, lo: u32, hi: u32) -> Self {
        self.weight_range = Some((lo.min(hi), lo.max(hi)));
        self
    }
}

fn random_nodes(config: &GraphConfig, rng: &mut StdRng) -> Vec<GraphNode> {
    let x_span = (config.width - 2.0 * config.padding).max(1.0);
    let y_span = (config.height - 2.0 * config.padding).max(1.0);
    (0..config.node_count)
        .map(|i| {
            let x = rng.gen::<f64>() * x_span + config.padding;
            let y = rng.gen::<f64>() * y_span + config.padding;
            GraphNode::new(i, Position::new(x, y))
        })
        .collect()
}

fn make_edge(config: &GraphConfig, rng: &mut StdRng, u: usize, v: usize) -> GraphEdge {
    match config.weight_range {
        Some((lo, hi)) => GraphEdge::weighted(u, v, rng.gen_range(lo..=hi)),
        None => GraphEdge::new(u, v),
    }
}

fn add_extra_edges(config: &GraphConfig, rng: &mut StdRng, edges: &mut Vec<GraphEdge>) {
    let n = config.node_count;
    if n < 2 {
        return;
    }
    let extra = (n as f64 * config.extra_edge_ratio).floor() as usize;
    for _ in 0..extra {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        let duplicate = edges.iter().any(|e| e.connects(NodeId(u), NodeId(v)));
        if u != v && !duplicate {
            let edge = make_edge(config, rng, u, v);
            edges.push(edge);
        }
    }
}

/// Random spanning tree plus random extra edges.
///
/// Each not-yet-connected node is attached to a random already-connected
/// node, which guarantees connectivity before any density is added.
/// Construction errors from [`Graph::new`] are returned, never swallowed.
pub fn random_connected_graph(config: &GraphConfig) -> Result<Graph> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let nodes = random_nodes(config, &mut rng);
    let n = nodes.len();

    let mut edges = Vec::new();
    if n > 0 {
        let mut connected = vec![0usize];
        let mut pending: Vec<usize> = (1..n).collect();
        while !pending.is_empty() {
            let u = connected[rng.gen_range(0..connected.len())];
            let v = pending.swap_remove(rng.gen_range(0..pending.len()));
            let edge = make_edge(config, &mut rng, u, v);
            edges.push(edge);
            connected.push(v);
        }
    }
    add_extra_edges(config, &mut rng, &mut edges);

    Graph::new(nodes, edges)
}

/// Chain `0-1-2-...` plus random extra edges, weighted when configured.
pub fn chain_graph(config: &GraphConfig) -> Result<Graph> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let nodes = random_nodes(config, &mut rng);
    let n = nodes.len();

    let mut edges = Vec::new();
    for i in 1..n {
        let edge = make_edge(config, &mut rng, i - 1, i);
        edges.push(edge);
    }
    add_extra_edges(config, &mut rng, &mut edges);

    Graph::new(nodes, edges)
}

/// Random list of `size` values in `10..=99`, linked in order.
pub fn random_linked_list(size: usize, seed: u64) -> LinkedListState {
    let mut rng = StdRng::seed_from_u64(seed);
    let values: Vec<u32> = (0..size).map(|_| rng.gen_range(10..=99)).collect();
    LinkedListState::sequential(&values)
}
