//! Index-linked list state for the pointer-manipulation visualizers.
//!
//! Nodes sit in a flat vector; `next_links[i]` holds the index of node `i`'s
//! successor. Reversal rewrites links without moving nodes, which is what
//! lets the renderer keep every node in place while arrows flip.

use crate::error::{Error, Result};

/// Visual status of a list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ListNodeStatus {
    #[default]
    Default,
    Current,
    Reversed,
    Slow,
    Fast,
    Middle,
}

impl ListNodeStatus {
    /// Pointer highlights that never survive a finished run.
    pub fn is_transient(&self) -> bool {
        matches!(self, ListNodeStatus::Current | ListNodeStatus::Slow | ListNodeStatus::Fast)
    }
}

/// A single list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListNode {
    pub id: u32,
    pub value: u32,
    pub status: ListNodeStatus,
}

/// Result of walking a list from its head.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Traversal {
    /// Node indices in visit order, each at most once.
    pub order: Vec<usize>,
    /// The walk revisited a node instead of reaching the end.
    pub has_cycle: bool,
}

/// Nodes plus a parallel successor table and a head pointer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkedListState {
    pub nodes: Vec<ListNode>,
    pub next_links: Vec<Option<usize>>,
    pub head: Option<usize>,
}

impl LinkedListState {
    /// Build a list whose nodes are linked in vector order.
    pub fn sequential(values: &[u32]) -> Self {
        let len = values.len();
        let nodes = values
            .iter()
            .enumerate()
            .map(|(i, &value)| ListNode {
                id: i as u32,
                value,
                status: ListNodeStatus::Default,
            })
            .collect();
        let next_links = (0..len).map(|i| (i + 1 < len).then_some(i + 1)).collect();
        Self {
            nodes,
            next_links,
            head: (len > 0).then_some(0),
        }
    }

    /// Build a list from explicit parts, checking that every index is in range.
    pub fn from_parts(
        nodes: Vec<ListNode>,
        next_links: Vec<Option<usize>>,
        head: Option<usize>,
    ) -> Result<Self> {
        if nodes.len() != next_links.len() {
            return Err(Error::LinkCountMismatch {
                nodes: nodes.len(),
                links: next_links.len(),
            });
        }
        let len = nodes.len();
        for index in next_links.iter().flatten().chain(head.iter()) {
            if *index >= len {
                return Err(Error::LinkOutOfRange { index: *index, len });
            }
        }
        Ok(Self {
            nodes,
            next_links,
            head,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Successor of a node, `None` at the tail or for out-of-range indices.
    pub fn next_of(&self, index: usize) -> Option<usize> {
        self.next_links.get(index).copied().flatten()
    }

    /// Walk from the head, stopping at the tail or the first revisit.
    pub fn traverse(&self) -> Traversal {
        let mut seen = vec![false; self.nodes.len()];
        let mut order = Vec::new();
        let mut cursor = self.head;
        while let Some(index) = cursor {
            if seen[index] {
                return Traversal {
                    order,
                    has_cycle: true,
                };
            }
            seen[index] = true;
            order.push(index);
            cursor = self.next_of(index);
        }
        Traversal {
            order,
            has_cycle: false,
        }
    }

    /// Values in list order (stops before a repeated node).
    pub fn values_in_order(&self) -> Vec<u32> {
        self.traverse()
            .order
            .into_iter()
            .map(|i| self.nodes[i].value)
            .collect()
    }

    pub fn reset_statuses(&mut self) {
        for node in &mut self.nodes {
            node.status = ListNodeStatus::Default;
        }
    }
}

/// Named pointers drawn above list nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListMarkers {
    pub head: Option<usize>,
    pub current: Option<usize>,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub slow: Option<usize>,
    pub fast: Option<usize>,
    pub middle: Option<usize>,
}

impl ListMarkers {
    /// Markers with only the head set.
    pub fn head_only(head: Option<usize>) -> Self {
        Self {
            head,
            ..Self::default()
        }
    }
}
