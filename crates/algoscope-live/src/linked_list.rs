//! Live linked-list algorithms: in-place reversal and the slow/fast
//! middle finder.
//!
//! A cyclic list has no tail, so neither algorithm could terminate on one.
//! Both check with [`LinkedListState::traverse`] first and finish with a
//! single explanatory frame instead.

use std::time::Duration;

use algoscope_engine::{FrameSink, Instrument, LiveConfig, LiveFrame};
use algoscope_model::{LinkedListState, ListMarkers, ListNodeStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest hold after a pointer change or at the final answer.
const MIN_HOLD: Duration = Duration::from_millis(120);

/// Everything drawn for one linked-list frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    pub list: LinkedListState,
    pub markers: ListMarkers,
    /// Loop iterations performed so far.
    pub step: u32,
}

impl ListView {
    pub fn new(list: LinkedListState) -> Self {
        let markers = ListMarkers::head_only(list.head);
        Self {
            list,
            markers,
            step: 0,
        }
    }
}

/// Frame sink for linked-list visualizations.
pub trait ListSink: FrameSink<LiveFrame<ListView>> + Send {}

impl<K> ListSink for K where K: FrameSink<LiveFrame<ListView>> + Send {}

/// The linked-list operations with a live implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListAlgorithm {
    Reverse,
    FindMiddle,
}

impl ListAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            ListAlgorithm::Reverse => "Reverse Linked List",
            ListAlgorithm::FindMiddle => "Find Middle Node",
        }
    }

    pub async fn run<K: ListSink>(self, view: &mut ListView, inst: &mut Instrument<K>) -> bool {
        match self {
            ListAlgorithm::Reverse => reverse_list(view, inst).await,
            ListAlgorithm::FindMiddle => find_middle(view, inst).await,
        }
    }
}

/// Hold after relinking a pointer: 65% of the delay, at least 120ms.
pub fn relink_hold(config: &LiveConfig) -> Duration {
    config.scaled_delay(0.65).max(MIN_HOLD)
}

/// Hold on the found middle node: 60% of the delay, at least 120ms.
pub fn settle_hold(config: &LiveConfig) -> Duration {
    config.scaled_delay(0.6).max(MIN_HOLD)
}

/// Shared fast paths. `Some` means the run is over.
fn precheck<K: ListSink>(view: &mut ListView, inst: &mut Instrument<K>) -> Option<bool> {
    if view.list.is_empty() {
        return Some(inst.complete(&*view, "List is empty"));
    }
    if view.list.traverse().has_cycle {
        debug!("cycle detected, skipping run");
        return Some(inst.complete(&*view, "Cycle detected: the list has no tail to reach"));
    }
    view.list.reset_statuses();
    view.step = 0;
    None
}

/// Reverse the list in place, one pointer at a time.
///
/// On completion every node is [`ListNodeStatus::Reversed`] and the head
/// points to the old tail. A one-node list finishes in a single frame.
pub async fn reverse_list<K: ListSink>(view: &mut ListView, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = precheck(view, inst) {
        return done;
    }
    let original_head = view.list.head;
    let reachable = view.list.traverse().order.len();
    inst.set_total(reachable);
    if reachable == 1 {
        for node in &mut view.list.nodes {
            node.status = ListNodeStatus::Reversed;
        }
        view.markers = ListMarkers::head_only(original_head);
        return inst.complete(&*view, "A single node is already reversed");
    }
    let hold = relink_hold(inst.config());

    let mut prev: Option<usize> = None;
    let mut current = original_head;
    while let Some(cur) = current {
        let next = view.list.next_of(cur);
        view.step += 1;

        for (index, node) in view.list.nodes.iter_mut().enumerate() {
            if index == cur {
                node.status = ListNodeStatus::Current;
            } else if Some(index) == prev {
                node.status = ListNodeStatus::Reversed;
            } else if node.status != ListNodeStatus::Reversed {
                node.status = ListNodeStatus::Default;
            }
        }
        view.markers = ListMarkers {
            head: original_head,
            current: Some(cur),
            prev,
            next,
            ..ListMarkers::default()
        };
        let description = format!(
            "Step {}: save next of {}, then reverse current pointer",
            view.step, view.list.nodes[cur].value
        );
        if !inst.step(&*view, description).await {
            return false;
        }

        view.list.next_links[cur] = prev;
        view.list.nodes[cur].status = ListNodeStatus::Reversed;
        let target = prev.map_or_else(|| "null".to_string(), |p| view.list.nodes[p].value.to_string());
        let description = format!("{} now points to {}", view.list.nodes[cur].value, target);
        if !inst.step_for(&*view, description, hold).await {
            return false;
        }
        inst.advance(1);

        prev = Some(cur);
        current = next;
    }

    for node in &mut view.list.nodes {
        node.status = ListNodeStatus::Reversed;
    }
    view.list.head = prev;
    view.markers = ListMarkers::head_only(prev);
    inst.complete(&*view, "Reversal complete. Head now points to the old tail.")
}

/// Find the middle node with slow and fast pointers.
///
/// For an even length the second of the two middle nodes is chosen.
pub async fn find_middle<K: ListSink>(view: &mut ListView, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = precheck(view, inst) {
        return done;
    }
    let Some(head) = view.list.head else {
        return inst.complete(&*view, "List is empty");
    };
    let iterations = view.list.traverse().order.len() / 2;
    inst.set_total(iterations);

    let mut slow = head;
    let mut fast = Some(head);
    while let Some(f) = fast {
        let Some(after) = view.list.next_of(f) else {
            break;
        };
        view.step += 1;

        for (index, node) in view.list.nodes.iter_mut().enumerate() {
            node.status = if index == slow {
                ListNodeStatus::Slow
            } else if index == f {
                ListNodeStatus::Fast
            } else {
                ListNodeStatus::Default
            };
        }
        view.markers = ListMarkers {
            head: Some(head),
            slow: Some(slow),
            fast: Some(f),
            ..ListMarkers::default()
        };
        let description = format!(
            "Step {}: move slow by 1 and fast by 2 until fast reaches the tail",
            view.step
        );
        if !inst.step(&*view, description).await {
            return false;
        }

        slow = view.list.next_of(slow).unwrap_or(slow);
        fast = view.list.next_of(after);
        inst.advance(1);
    }

    for (index, node) in view.list.nodes.iter_mut().enumerate() {
        node.status = if index == slow {
            ListNodeStatus::Middle
        } else {
            ListNodeStatus::Default
        };
    }
    view.markers = ListMarkers {
        head: Some(head),
        middle: Some(slow),
        ..ListMarkers::default()
    };
    inst.set_done(iterations);
    let description = format!("Middle node found: {}", view.list.nodes[slow].value);
    let hold = settle_hold(inst.config());
    inst.step_for(&*view, description, hold).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_engine::CancellationTokens;
    use algoscope_model::ListNode;

    type Frames = Vec<LiveFrame<ListView>>;

    fn config() -> LiveConfig {
        LiveConfig::from_millis(0)
    }

    #[tokio::test(start_paused = true)]
    async fn reverses_values() {
        let mut view = ListView::new(LinkedListState::sequential(&[10, 20, 30, 40]));
        let mut frames = Frames::new();
        let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), config());
        assert!(reverse_list(&mut view, &mut inst).await);
        drop(inst);

        assert_eq!(view.list.values_in_order(), vec![40, 30, 20, 10]);
        assert_eq!(view.list.head, Some(3));
        assert!(view.list.nodes.iter().all(|n| n.status == ListNodeStatus::Reversed));
        // two frames per node plus the final one
        assert_eq!(frames.len(), 9);
        assert_eq!(frames[0].state.markers.current, Some(0));
        assert_eq!(frames[0].state.markers.next, Some(1));
        assert_eq!(frames.last().map(|f| f.state.markers.head), Some(Some(3)));
    }

    #[tokio::test(start_paused = true)]
    async fn finds_middle_odd_and_even() {
        for (values, middle) in [(vec![1, 3, 5, 7, 9], 5), (vec![1, 2, 3, 4], 3), (vec![8], 8)] {
            let mut view = ListView::new(LinkedListState::sequential(&values));
            let mut frames = Frames::new();
            let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), config());
            assert!(find_middle(&mut view, &mut inst).await);
            drop(inst);

            let found = view.markers.middle.map(|i| view.list.nodes[i].value);
            assert_eq!(found, Some(middle));
            assert_eq!(frames.len(), values.len() / 2 + 1);
            assert!(frames.last().is_some_and(|f| f.progress.is_complete()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn cyclic_list_fast_path() {
        let nodes = (0..3)
            .map(|i| ListNode {
                id: i,
                value: i * 10,
                status: ListNodeStatus::Default,
            })
            .collect();
        let list = LinkedListState::from_parts(nodes, vec![Some(1), Some(2), Some(0)], Some(0)).unwrap();

        for algorithm in [ListAlgorithm::Reverse, ListAlgorithm::FindMiddle] {
            let mut view = ListView::new(list.clone());
            let mut frames = Frames::new();
            let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), config());
            let completed = algorithm.run(&mut view, &mut inst).await;
            drop(inst);
            assert!(completed);
            assert_eq!(frames.len(), 1);
            assert!(frames[0].description.contains("Cycle"));
            assert_eq!(view.list, list);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn single_node_reverse_renders_once() {
        let mut view = ListView::new(LinkedListState::sequential(&[42]));
        let mut frames = Frames::new();
        let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), config());
        assert!(reverse_list(&mut view, &mut inst).await);
        drop(inst);

        assert_eq!(frames.len(), 1);
        assert_eq!(view.list.head, Some(0));
        assert_eq!(view.list.next_links, vec![None]);
        assert_eq!(frames[0].state.list.nodes[0].status, ListNodeStatus::Reversed);
        assert_eq!(frames[0].state.markers, ListMarkers::head_only(Some(0)));
        assert!(frames[0].progress.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn single_node_middle_renders_once() {
        let mut view = ListView::new(LinkedListState::sequential(&[42]));
        let mut frames = Frames::new();
        let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), config());
        assert!(find_middle(&mut view, &mut inst).await);
        drop(inst);

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].state.list.nodes[0].status, ListNodeStatus::Middle);
        assert_eq!(frames[0].state.markers.middle, Some(0));
        assert!(frames[0].progress.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_list_single_frame() {
        let mut view = ListView::new(LinkedListState::default());
        let mut frames = Frames::new();
        let mut inst = Instrument::new(&mut frames, CancellationTokens::new(), config());
        assert!(reverse_list(&mut view, &mut inst).await);
        drop(inst);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn holds_have_floor() {
        assert_eq!(relink_hold(&LiveConfig::from_millis(0)), MIN_HOLD);
        assert_eq!(relink_hold(&LiveConfig::from_millis(1000)), Duration::from_millis(650));
        assert_eq!(settle_hold(&LiveConfig::from_millis(1000)), Duration::from_millis(600));
    }
}
