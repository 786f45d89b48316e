//! Cross-cutting properties: cancellation, terminality, determinism and
//! self-contained snapshots.

use std::time::Duration;

use algoscope_engine::{
    CancellationTokens, Instrument, LiveConfig, LiveController, Playback, PlaybackConfig,
    RunState, Snapshot, StepLog,
};
use algoscope_integration_tests::{sort_collect, weighted_diamond};
use algoscope_live::{
    default_target, linear_search, spawn_dfs, spawn_list, spawn_search, spawn_sort, ListAlgorithm,
    ListView, SortAlgorithm,
};
use algoscope_model::{
    items_from_values, random_connected_graph, random_items, random_linked_list, ArrayConfig,
    GraphConfig, Item, ItemStatus, ListNodeStatus, NodeId, NodeStatus,
};
use algoscope_steplog::{generate_dijkstra, generate_huffman, generate_prim};
use proptest::prelude::*;
use tokio::sync::mpsc;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn second_stop_changes_nothing() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut controller = LiveController::new();
    let items = random_items(&ArrayConfig::default().with_size(12).with_seed(5));
    controller
        .start(move |tokens| async move {
            let mut inst = Instrument::new(tx, tokens, LiveConfig::from_millis(50));
            let mut items: Vec<Item> = items;
            SortAlgorithm::Selection.run(&mut items, &mut inst).await
        })
        .await
        .unwrap();
    assert!(rx.recv().await.is_some());

    controller.stop().await;
    let mut after_first = 0;
    while rx.try_recv().is_ok() {
        after_first += 1;
    }
    assert_eq!(controller.state(), RunState::Idle);

    controller.stop().await;
    assert_eq!(controller.state(), RunState::Idle);
    assert!(rx.recv().await.is_none());
    // at most the frame already in flight when the stop landed
    assert!(after_first <= 1);
    assert_eq!(controller.wait().await, None);
}

#[tokio::test(start_paused = true)]
async fn stop_is_noticed_within_one_slice() {
    for (delay_ms, slice_ms) in [(10_000, 50), (1_000, 20), (300, 100), (75, 5)] {
        let slice = Duration::from_millis(slice_ms);
        let config = LiveConfig::from_millis(delay_ms).with_slice(slice);
        let items = random_items(&ArrayConfig::default().with_size(16).with_seed(delay_ms));
        let mut run = spawn_sort(SortAlgorithm::Heap, items, config, CancellationTokens::new());

        assert!(run.next_frame().await.is_some());
        tokio::time::sleep(Duration::from_millis(delay_ms / 3)).await;
        let stopped_at = Instant::now();
        run.tokens().request_stop();
        let (completed, _) = run.collect().await;

        assert!(!completed);
        assert!(stopped_at.elapsed() <= slice, "delay {delay_ms}ms slice {slice_ms}ms");
    }
}

#[tokio::test]
async fn every_sort_ends_in_terminal_statuses() {
    let inputs: [&[u32]; 4] = [&[], &[7], &[4, 4, 1, 9, 0, 3], &[10, 9, 8, 7, 6, 5, 4, 3, 2, 1]];
    for algorithm in SortAlgorithm::ALL {
        for values in inputs {
            let (completed, items, frames) =
                sort_collect(algorithm, values, LiveConfig::from_millis(0)).await;
            assert!(completed, "{algorithm} on {values:?}");
            assert!(
                items.iter().all(|item| item.status.is_terminal()),
                "{algorithm} on {values:?}"
            );
            assert!(!frames.is_empty());
            assert!(frames.last().is_some_and(|f| f.progress.is_complete()));
        }
    }
}

fn quick() -> LiveConfig {
    LiveConfig::from_millis(0)
}

#[tokio::test(start_paused = true)]
async fn traversal_runs_end_with_every_node_visited() {
    for nodes in [0, 1, 2, 9] {
        let config = GraphConfig::default().with_nodes(nodes).with_seed(8);
        let graph = random_connected_graph(&config).unwrap();
        let run = spawn_dfs(graph, NodeId(0), quick(), CancellationTokens::new());
        let (completed, frames) = run.collect().await;
        assert!(completed, "{nodes} nodes");

        let last = frames.last().expect("final frame");
        assert!(last.progress.is_complete());
        assert!(
            last.state.nodes().iter().all(|n| n.status == NodeStatus::Visited),
            "{nodes} nodes"
        );
        if nodes <= 1 {
            assert_eq!(frames.len(), 1, "{nodes} nodes");
        }
    }
}

#[tokio::test(start_paused = true)]
async fn list_runs_end_without_pointer_highlights() {
    for size in [0, 1, 2, 7] {
        let view = ListView::new(random_linked_list(size, 4));

        let run = spawn_list(ListAlgorithm::Reverse, view.clone(), quick(), CancellationTokens::new());
        let (completed, frames) = run.collect().await;
        assert!(completed);
        let last = frames.last().expect("final frame");
        assert!(
            last.state.list.nodes.iter().all(|n| n.status == ListNodeStatus::Reversed),
            "reverse of {size}"
        );
        if size <= 1 {
            assert_eq!(frames.len(), 1, "reverse of {size}");
        }

        let run = spawn_list(ListAlgorithm::FindMiddle, view, quick(), CancellationTokens::new());
        let (completed, frames) = run.collect().await;
        assert!(completed);
        let last = frames.last().expect("final frame");
        assert!(last.progress.is_complete());
        let nodes = &last.state.list.nodes;
        assert!(nodes.iter().all(|n| !n.status.is_transient()), "middle of {size}");
        let middles = nodes.iter().filter(|n| n.status == ListNodeStatus::Middle).count();
        assert_eq!(middles, size.min(1), "middle of {size}");
        if size <= 1 {
            assert_eq!(frames.len(), 1, "middle of {size}");
        }
    }
}

#[tokio::test(start_paused = true)]
async fn search_runs_end_in_terminal_statuses() {
    for size in [0, 1, 2, 9] {
        let items = random_items(&ArrayConfig::default().with_size(size).with_seed(6));
        let hit = default_target(&items).unwrap_or(0);
        // generated values stay below 1000, so the second target always misses
        for target in [hit, 1000] {
            let run = spawn_search(items.clone(), target, quick(), CancellationTokens::new());
            let (completed, frames) = run.collect().await;
            assert!(completed);

            let last = frames.last().expect("final frame");
            assert!(last.progress.is_complete());
            assert!(
                last.state.iter().all(|item| item.status.is_terminal()),
                "{size} items, target {target}"
            );
            if size <= 1 {
                assert_eq!(frames.len(), 1, "{size} items, target {target}");
            }
        }
    }
}

fn replay_independently<S: Snapshot + PartialEq>(log: &StepLog<S>) {
    let mut playback = Playback::new(PlaybackConfig::default());
    playback.start(log.clone()).unwrap();
    // visit back to front: no step may depend on having rendered its predecessor
    for index in (0..log.len()).rev() {
        assert_eq!(playback.seek(index).unwrap(), &log[index]);
    }
}

#[test]
fn logs_replay_from_any_step() {
    let graph = weighted_diamond();
    replay_independently(&generate_dijkstra(&graph, NodeId(0)).steps);
    replay_independently(&generate_prim(&graph).steps);
    replay_independently(&generate_huffman("mississippi").steps);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn logs_are_byte_identical(nodes in 1usize..12, seed in any::<u64>(), text in "[a-z ]{0,40}") {
        let config = GraphConfig::weighted().with_nodes(nodes).with_seed(seed);
        let graph = random_connected_graph(&config).unwrap();

        let first = serde_json::to_string(&generate_dijkstra(&graph, NodeId(0)).steps).unwrap();
        let second = serde_json::to_string(&generate_dijkstra(&graph, NodeId(0)).steps).unwrap();
        prop_assert_eq!(first, second);

        let first = serde_json::to_string(&generate_prim(&graph).steps).unwrap();
        let second = serde_json::to_string(&generate_prim(&graph).steps).unwrap();
        prop_assert_eq!(first, second);

        let first = serde_json::to_string(&generate_huffman(&text).steps).unwrap();
        let second = serde_json::to_string(&generate_huffman(&text).steps).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn searches_leave_nothing_undecided(values in prop::collection::vec(0u32..50, 0..20), target in 0u32..60) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let (completed, items) = runtime.block_on(async {
            let mut items = items_from_values(&values);
            let mut frames = Vec::new();
            let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), quick());
            let completed = linear_search(&mut items, target, &mut inst).await;
            (completed, items)
        });
        prop_assert!(completed);
        prop_assert!(items.iter().all(|item| item.status.is_terminal()));
        let hits = items.iter().filter(|item| item.status == ItemStatus::Target).count();
        prop_assert_eq!(hits, usize::from(values.contains(&target)));
    }

    #[test]
    fn seek_anywhere_matches_log(seed in any::<u64>(), seeks in prop::collection::vec(0usize..200, 1..20)) {
        let config = GraphConfig::weighted().with_nodes(7).with_seed(seed);
        let graph = random_connected_graph(&config).unwrap();
        let log = generate_dijkstra(&graph, NodeId(0)).steps;
        let mut playback = Playback::new(PlaybackConfig::default());
        playback.start(log.clone()).unwrap();
        for index in seeks {
            let expected = &log[index.min(log.len() - 1)];
            prop_assert_eq!(playback.seek(index).unwrap(), expected);
        }
    }
}
