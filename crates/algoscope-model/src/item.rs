//! Array items for the sorting and searching visualizers.

use std::fmt;

/// Visual status of a single array item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemStatus {
    /// Untouched
    #[default]
    Default,
    /// Taking part in a comparison
    Comparing,
    /// About to move, or just moved
    Swapping,
    /// In its final position
    Sorted,
    /// Partition pivot, running minimum, or heap root
    Pivot,
    /// The value a search was looking for
    Target,
    /// Ruled out by a finished search
    Eliminated,
}

impl ItemStatus {
    /// Whether this status may appear on an item after a run has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ItemStatus::Sorted | ItemStatus::Target | ItemStatus::Eliminated)
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemStatus::Default => "default",
            ItemStatus::Comparing => "comparing",
            ItemStatus::Swapping => "swapping",
            ItemStatus::Sorted => "sorted",
            ItemStatus::Pivot => "pivot",
            ItemStatus::Target => "target",
            ItemStatus::Eliminated => "eliminated",
        };
        f.write_str(name)
    }
}

/// One bar in the array visualizer.
///
/// `id` is assigned at generation time and never changes, so stable
/// algorithms can be checked by comparing the id order of equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: u32,
    pub value: u32,
    pub status: ItemStatus,
}

impl Item {
    /// Create an item with the default status.
    pub const fn new(id: u32, value: u32) -> Self {
        Self {
            id,
            value,
            status: ItemStatus::Default,
        }
    }

    /// Copy of this item with a different status.
    pub const fn with_status(self, status: ItemStatus) -> Self {
        Self { status, ..self }
    }
}

/// Build items from raw values, numbering them in order.
pub fn items_from_values(values: &[u32]) -> Vec<Item> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Item::new(i as u32, value))
        .collect()
}

/// Reset every item to [`ItemStatus::Default`].
pub fn reset_statuses(items: &mut [Item]) {
    for item in items {
        item.status = ItemStatus::Default;
    }
}

/// Extract the values in array order.
pub fn values_of(items: &[Item]) -> Vec<u32> {
    items.iter().map(|item| item.value).collect()
}

/// Count items carrying the given status.
pub fn count_with_status(items: &[Item], status: ItemStatus) -> usize {
    items.iter().filter(|item| item.status == status).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_are_numbered_in_order() {
        let items = items_from_values(&[5, 3, 8]);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], Item::new(0, 5));
        assert_eq!(items[2].id, 2);
        assert!(items.iter().all(|i| i.status == ItemStatus::Default));
    }

    #[test]
    fn reset_clears_statuses() {
        let mut items = vec![
            Item::new(0, 1).with_status(ItemStatus::Sorted),
            Item::new(1, 2).with_status(ItemStatus::Pivot),
        ];
        reset_statuses(&mut items);
        assert_eq!(count_with_status(&items, ItemStatus::Default), 2);
    }

    #[test]
    fn terminal_statuses() {
        assert!(ItemStatus::Sorted.is_terminal());
        assert!(ItemStatus::Target.is_terminal());
        assert!(ItemStatus::Eliminated.is_terminal());
        assert!(!ItemStatus::Comparing.is_terminal());
        assert!(!ItemStatus::Default.is_terminal());
    }

    #[test]
    fn status_display() {
        assert_eq!(ItemStatus::Swapping.to_string(), "swapping");
        assert_eq!(ItemStatus::Default.to_string(), "default");
    }
}
