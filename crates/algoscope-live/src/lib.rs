//! Algoscope Live: algorithms rewritten to run cooperatively.
//!
//! Every algorithm here mutates its own copy of the visual state and reports
//! each meaningful step through an [`algoscope_engine::Instrument`]. The
//! instrument renders an owned frame and then suspends in the cooperative
//! delay, where pause and stop requests take effect. Recursive algorithms
//! (quick sort, merge sort, heapify, DFS) pass the same instrument down every
//! call and unwind as soon as any frame reports a stop.
//!
//! # Algorithms
//!
//! - Sorting: bubble, selection, insertion, quick, merge, heap, radix
//! - Searching: linear search
//! - Graph: depth-first search
//! - Linked list: reversal, middle node (slow/fast pointers)
//!
//! The [`registry`] maps display names to implementations.

mod linked_list;
pub mod registry;
mod runner;
mod searching;
mod sorting;
mod traversal;

pub use linked_list::{
    find_middle, relink_hold, reverse_list, settle_hold, ListAlgorithm, ListSink, ListView,
};
pub use registry::{catalog, lookup, resolve, AlgorithmInfo, Category, Complexity, LiveAlgorithm};
pub use runner::{spawn_dfs, spawn_list, spawn_search, spawn_sort};
pub use searching::{default_target, linear_search};
pub use sorting::{
    bubble_sort, heap_sort, insertion_sort, merge_sort, quick_sort, radix_sort, selection_sort,
    ArraySink, SortAlgorithm,
};
pub use traversal::{depth_first_search, GraphSink};
