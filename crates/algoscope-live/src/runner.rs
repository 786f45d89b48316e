//! Spawn helpers that pair a live algorithm with a [`LiveRun`] channel.

use algoscope_engine::{CancellationTokens, LiveConfig, LiveRun};
use algoscope_model::{Graph, Item, NodeId};

use crate::linked_list::{ListAlgorithm, ListView};
use crate::searching::linear_search;
use crate::sorting::SortAlgorithm;
use crate::traversal::depth_first_search;

/// Sort an owned copy of `items` on a new task.
pub fn spawn_sort(
    algorithm: SortAlgorithm,
    items: Vec<Item>,
    config: LiveConfig,
    tokens: CancellationTokens,
) -> LiveRun<Vec<Item>> {
    LiveRun::spawn(config, tokens, move |mut inst| async move {
        let mut items = items;
        algorithm.run(&mut items, &mut inst).await
    })
}

pub fn spawn_search(
    items: Vec<Item>,
    target: u32,
    config: LiveConfig,
    tokens: CancellationTokens,
) -> LiveRun<Vec<Item>> {
    LiveRun::spawn(config, tokens, move |mut inst| async move {
        let mut items = items;
        linear_search(&mut items, target, &mut inst).await
    })
}

pub fn spawn_dfs(
    graph: Graph,
    start: NodeId,
    config: LiveConfig,
    tokens: CancellationTokens,
) -> LiveRun<Graph> {
    LiveRun::spawn(config, tokens, move |mut inst| async move {
        let mut graph = graph;
        depth_first_search(&mut graph, start, &mut inst).await
    })
}

pub fn spawn_list(
    algorithm: ListAlgorithm,
    view: ListView,
    config: LiveConfig,
    tokens: CancellationTokens,
) -> LiveRun<ListView> {
    LiveRun::spawn(config, tokens, move |mut inst| async move {
        let mut view = view;
        algorithm.run(&mut view, &mut inst).await
    })
}
