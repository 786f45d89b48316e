//! Shared fixtures for the cross-crate tests in `tests/`.

use algoscope_engine::{CancellationTokens, Instrument, LiveConfig, LiveFrame};
use algoscope_live::SortAlgorithm;
use algoscope_model::{items_from_values, Graph, GraphEdge, GraphNode, Item, Position};

pub type ArrayFrames = Vec<LiveFrame<Vec<Item>>>;

/// `A-B:2, B-C:3, A-C:10` plus a pendant `D` hanging off `C` with weight 1.
pub fn weighted_diamond() -> Graph {
    let nodes = (0..4)
        .map(|i| GraphNode::new(i, Position::new(100.0 * i as f64, 0.0)))
        .collect();
    let edges = vec![
        GraphEdge::weighted(0, 1, 2),
        GraphEdge::weighted(1, 2, 3),
        GraphEdge::weighted(0, 2, 10),
        GraphEdge::weighted(2, 3, 1),
    ];
    Graph::new(nodes, edges).expect("diamond fixture is a valid graph")
}

/// Run `algorithm` on `values` in the current task, collecting every frame.
pub async fn sort_collect(
    algorithm: SortAlgorithm,
    values: &[u32],
    config: LiveConfig,
) -> (bool, Vec<Item>, ArrayFrames) {
    let mut items = items_from_values(values);
    let mut frames = ArrayFrames::new();
    let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), config);
    let completed = algorithm.run(&mut items, &mut inst).await;
    drop(inst);
    (completed, items, frames)
}

/// The state drawn by the last frame, if any frame was rendered.
pub fn last_state<T: Clone>(frames: &[LiveFrame<T>]) -> Option<T> {
    frames.last().map(|frame| frame.state.clone())
}
