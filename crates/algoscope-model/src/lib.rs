//! Algoscope Visual State Model
//!
//! Leaf data types shared by every algorithm animation.
//!
//! # Domains
//!
//! - **Items**: array bars for sorting and searching, each with a [`ItemStatus`]
//! - **Graphs**: nodes with canvas positions and undirected, optionally
//!   weighted edges; every edge endpoint names an existing node
//! - **Linked lists**: a node vector plus a parallel successor table, with
//!   cycle detection instead of an acyclicity assumption
//!
//! All types are plain values. Renderers receive owned copies, so a frame can
//! never be changed retroactively by a later mutation.
//!
//! Enable the `serde` feature to serialize model values.

mod error;
mod generate;
mod graph;
mod item;
mod linked_list;

pub use error::{Error, Result};
pub use generate::{
    chain_graph, random_connected_graph, random_items, random_linked_list, ArrayConfig,
    GraphConfig,
};
pub use graph::{
    default_label, EdgeStatus, Graph, GraphEdge, GraphNode, Neighbor, NodeId, NodeStatus,
    Position,
};
pub use item::{count_with_status, items_from_values, reset_statuses, values_of, Item, ItemStatus};
pub use linked_list::{LinkedListState, ListMarkers, ListNode, ListNodeStatus, Traversal};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn generated_graphs_keep_edge_invariant(nodes in 0usize..30, seed in any::<u64>()) {
            let config = GraphConfig::default().with_nodes(nodes).with_seed(seed);
            let graph = random_connected_graph(&config).unwrap();
            prop_assert_eq!(graph.node_count(), nodes);
            prop_assert!(graph.is_connected());
            for edge in graph.edges() {
                prop_assert!(graph.contains(edge.source));
                prop_assert!(graph.contains(edge.target));
                prop_assert_ne!(edge.source, edge.target);
            }
        }

        #[test]
        fn sequential_lists_are_acyclic(values in proptest::collection::vec(0u32..100, 0..40)) {
            let list = LinkedListState::sequential(&values);
            let walk = list.traverse();
            prop_assert!(!walk.has_cycle);
            prop_assert_eq!(walk.order.len(), values.len());
            prop_assert_eq!(list.values_in_order(), values);
        }
    }
}
