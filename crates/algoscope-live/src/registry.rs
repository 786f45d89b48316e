//! Catalogue of visualizable algorithms, keyed by display name.
//!
//! Some catalogue entries are declared without an implementation. Looking
//! one of those up succeeds but [`resolve`] returns `None`, which callers
//! turn into [`algoscope_engine::RunState::Unavailable`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::linked_list::ListAlgorithm;
use crate::sorting::SortAlgorithm;

/// Catalogue section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sorting,
    Searching,
    Graph,
    LinkedList,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Sorting => write!(f, "Sorting"),
            Category::Searching => write!(f, "Searching"),
            Category::Graph => write!(f, "Graph"),
            Category::LinkedList => write!(f, "Linked List"),
        }
    }
}

/// A live algorithm that can actually be run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiveAlgorithm {
    Sort(SortAlgorithm),
    LinearSearch,
    DepthFirstSearch,
    List(ListAlgorithm),
}

/// Asymptotic costs shown next to the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

const fn complexity(
    best: &'static str,
    average: &'static str,
    worst: &'static str,
    space: &'static str,
) -> Complexity {
    Complexity {
        best,
        average,
        worst,
        space,
    }
}

/// One catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    /// URL-style key, e.g. `bubble-sort`.
    pub slug: &'static str,
    pub category: Category,
    pub complexity: Complexity,
    pub description: &'static str,
    /// `None` for declared algorithms without an implementation.
    pub implementation: Option<LiveAlgorithm>,
}

static CATALOG: [AlgorithmInfo; 12] = [
    AlgorithmInfo {
        name: "Bubble Sort",
        slug: "bubble-sort",
        category: Category::Sorting,
        complexity: complexity("O(n)", "O(n^2)", "O(n^2)", "O(1)"),
        description: "Compares adjacent bars and swaps them until larger values settle at the end.",
        implementation: Some(LiveAlgorithm::Sort(SortAlgorithm::Bubble)),
    },
    AlgorithmInfo {
        name: "Selection Sort",
        slug: "selection-sort",
        category: Category::Sorting,
        complexity: complexity("O(n^2)", "O(n^2)", "O(n^2)", "O(1)"),
        description: "Repeatedly chooses the smallest unsorted value and places it into position.",
        implementation: Some(LiveAlgorithm::Sort(SortAlgorithm::Selection)),
    },
    AlgorithmInfo {
        name: "Insertion Sort",
        slug: "insertion-sort",
        category: Category::Sorting,
        complexity: complexity("O(n)", "O(n^2)", "O(n^2)", "O(1)"),
        description: "Grows a sorted prefix by shifting each new value left past larger ones.",
        implementation: Some(LiveAlgorithm::Sort(SortAlgorithm::Insertion)),
    },
    AlgorithmInfo {
        name: "Quick Sort",
        slug: "quick-sort",
        category: Category::Sorting,
        complexity: complexity("O(n log n)", "O(n log n)", "O(n^2)", "O(log n)"),
        description: "Partitions around a pivot and recursively solves left and right subarrays.",
        implementation: Some(LiveAlgorithm::Sort(SortAlgorithm::Quick)),
    },
    AlgorithmInfo {
        name: "Merge Sort",
        slug: "merge-sort",
        category: Category::Sorting,
        complexity: complexity("O(n log n)", "O(n log n)", "O(n log n)", "O(n)"),
        description: "Splits the array in halves, sorts each half, and merges them back in order.",
        implementation: Some(LiveAlgorithm::Sort(SortAlgorithm::Merge)),
    },
    AlgorithmInfo {
        name: "Heap Sort",
        slug: "heap-sort",
        category: Category::Sorting,
        complexity: complexity("O(n log n)", "O(n log n)", "O(n log n)", "O(1)"),
        description: "Builds a max heap and repeatedly extracts the maximum to sort in place.",
        implementation: Some(LiveAlgorithm::Sort(SortAlgorithm::Heap)),
    },
    AlgorithmInfo {
        name: "Radix Sort",
        slug: "radix-sort",
        category: Category::Sorting,
        complexity: complexity("O(nk)", "O(nk)", "O(nk)", "O(n+k)"),
        description: "Distributes values into buckets by each digit instead of comparing them.",
        implementation: Some(LiveAlgorithm::Sort(SortAlgorithm::Radix)),
    },
    AlgorithmInfo {
        name: "Linear Search",
        slug: "linear-search",
        category: Category::Searching,
        complexity: complexity("O(1)", "O(n)", "O(n)", "O(1)"),
        description: "Scans each value from left to right until the target value is discovered.",
        implementation: Some(LiveAlgorithm::LinearSearch),
    },
    AlgorithmInfo {
        name: "Interpolation Search",
        slug: "interpolation-search",
        category: Category::Searching,
        complexity: complexity("O(1)", "O(log log n)", "O(n)", "O(1)"),
        description: "Probes where the target should be on a uniformly distributed sorted array.",
        implementation: None,
    },
    AlgorithmInfo {
        name: "Depth First Search",
        slug: "dfs",
        category: Category::Graph,
        complexity: complexity("O(V+E)", "O(V+E)", "O(V+E)", "O(V)"),
        description: "Follows each branch as deep as it goes before backtracking.",
        implementation: Some(LiveAlgorithm::DepthFirstSearch),
    },
    AlgorithmInfo {
        name: "Reverse Linked List",
        slug: "reverse-linked-list",
        category: Category::LinkedList,
        complexity: complexity("O(n)", "O(n)", "O(n)", "O(1)"),
        description: "Walks the list once, turning every next pointer around.",
        implementation: Some(LiveAlgorithm::List(ListAlgorithm::Reverse)),
    },
    AlgorithmInfo {
        name: "Find Middle Node",
        slug: "middle-node",
        category: Category::LinkedList,
        complexity: complexity("O(n)", "O(n)", "O(n)", "O(1)"),
        description: "Moves slow by one step and fast by two until fast reaches the tail.",
        implementation: Some(LiveAlgorithm::List(ListAlgorithm::FindMiddle)),
    },
];

/// Every catalogue entry, in display order.
pub fn catalog() -> &'static [AlgorithmInfo] {
    &CATALOG
}

/// Find an entry by display name or slug, ignoring ASCII case.
pub fn lookup(name: &str) -> Option<&'static AlgorithmInfo> {
    let name = name.trim();
    CATALOG
        .iter()
        .find(|info| info.name.eq_ignore_ascii_case(name) || info.slug.eq_ignore_ascii_case(name))
}

/// The runnable implementation for `name`, or `None` when the name is
/// unknown or declared without an implementation.
pub fn resolve(name: &str) -> Option<LiveAlgorithm> {
    lookup(name).and_then(|info| info.implementation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = catalog().iter().map(|i| i.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn lookup_by_name_or_slug() {
        assert_eq!(resolve("Bubble Sort"), Some(LiveAlgorithm::Sort(SortAlgorithm::Bubble)));
        assert_eq!(resolve("quick-sort"), Some(LiveAlgorithm::Sort(SortAlgorithm::Quick)));
        assert_eq!(resolve("  heap sort "), Some(LiveAlgorithm::Sort(SortAlgorithm::Heap)));
        assert_eq!(lookup("dfs").map(|i| i.category), Some(Category::Graph));
    }

    #[test]
    fn declared_but_unimplemented() {
        assert!(lookup("Interpolation Search").is_some());
        assert_eq!(resolve("Interpolation Search"), None);
    }

    #[test]
    fn unknown_name() {
        assert!(lookup("Bogo Sort").is_none());
        assert_eq!(resolve("Bogo Sort"), None);
    }

    #[test]
    fn every_sort_is_listed_under_its_name() {
        for sort in SortAlgorithm::ALL {
            assert_eq!(resolve(sort.name()), Some(LiveAlgorithm::Sort(sort)));
        }
        for list in [ListAlgorithm::Reverse, ListAlgorithm::FindMiddle] {
            assert_eq!(resolve(list.name()), Some(LiveAlgorithm::List(list)));
        }
    }
}
