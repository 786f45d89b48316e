//! Live instrumented sorting algorithms.
//!
//! Each sort mutates the caller's `Vec<Item>` in place and renders through
//! an [`Instrument`] at every comparison and move. A `false` from any
//! checkpoint means a stop was seen: the sort returns `false` at once and
//! every recursive frame above it does the same.
//!
//! On natural completion every item is [`ItemStatus::Sorted`], including
//! for empty and single-item input, which finish with one explanatory frame.

use std::fmt;

use algoscope_engine::{FrameSink, Instrument, LiveFrame};
use algoscope_model::{Item, ItemStatus};
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Frame sink for array visualizations.
pub trait ArraySink: FrameSink<LiveFrame<Vec<Item>>> + Send {}

impl<K> ArraySink for K where K: FrameSink<LiveFrame<Vec<Item>>> + Send {}

/// The sorting algorithms with a live implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
    Heap,
    Radix,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 7] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
        SortAlgorithm::Heap,
        SortAlgorithm::Radix,
    ];

    /// Display name, as used by the registry.
    pub fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Heap => "Heap Sort",
            SortAlgorithm::Radix => "Radix Sort",
        }
    }

    /// Whether equal values keep their input order.
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            SortAlgorithm::Bubble
                | SortAlgorithm::Insertion
                | SortAlgorithm::Merge
                | SortAlgorithm::Radix
        )
    }

    /// Run this sort. Returns `true` on natural completion.
    pub async fn run<K: ArraySink>(self, items: &mut Vec<Item>, inst: &mut Instrument<K>) -> bool {
        debug!(algorithm = %self, len = items.len(), "sort started");
        let completed = match self {
            SortAlgorithm::Bubble => bubble_sort(items, inst).await,
            SortAlgorithm::Selection => selection_sort(items, inst).await,
            SortAlgorithm::Insertion => insertion_sort(items, inst).await,
            SortAlgorithm::Quick => quick_sort(items, inst).await,
            SortAlgorithm::Merge => merge_sort(items, inst).await,
            SortAlgorithm::Heap => heap_sort(items, inst).await,
            SortAlgorithm::Radix => radix_sort(items, inst).await,
        };
        debug!(algorithm = %self, completed, frames = inst.frames_rendered(), "sort finished");
        completed
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn mark(items: &mut [Item], indices: &[usize], status: ItemStatus) {
    for &i in indices {
        items[i].status = status;
    }
}

/// Mark everything sorted and render the terminal frame.
fn finish<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>, description: &str) -> bool {
    for item in items.iter_mut() {
        item.status = ItemStatus::Sorted;
    }
    inst.complete(&*items, description)
}

/// Fast path for input with nothing to sort.
fn trivial<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>) -> Option<bool> {
    match items.len() {
        0 => Some(finish(items, inst, "Array is empty, nothing to sort")),
        1 => Some(finish(items, inst, "A single element is already sorted")),
        _ => None,
    }
}

/// Repeatedly compares adjacent items and swaps them until the largest
/// unsorted value settles at the end. Stops early after a pass with no swaps.
pub async fn bubble_sort<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = trivial(items, inst) {
        return done;
    }
    let n = items.len();
    inst.set_total(n);

    for pass in 0..n {
        let end = n - 1 - pass;
        let mut swapped = false;
        for j in 0..end {
            mark(items, &[j, j + 1], ItemStatus::Comparing);
            let description = format!("Comparing {} and {}", items[j].value, items[j + 1].value);
            if !inst.step(&*items, description).await {
                return false;
            }
            if items[j].value > items[j + 1].value {
                mark(items, &[j, j + 1], ItemStatus::Swapping);
                items.swap(j, j + 1);
                let description = format!("Swapped {} and {}", items[j].value, items[j + 1].value);
                if !inst.step(&*items, description).await {
                    return false;
                }
                swapped = true;
            }
            mark(items, &[j, j + 1], ItemStatus::Default);
        }
        items[end].status = ItemStatus::Sorted;
        inst.set_done(pass + 1);
        if !swapped {
            break;
        }
    }

    finish(items, inst, "Bubble Sort complete")
}

/// Finds the minimum of the unsorted suffix and swaps it into place.
pub async fn selection_sort<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = trivial(items, inst) {
        return done;
    }
    let n = items.len();
    inst.set_total(n);

    for i in 0..n {
        let mut min = i;
        items[i].status = ItemStatus::Pivot;
        for j in i + 1..n {
            items[j].status = ItemStatus::Comparing;
            let description = format!(
                "Comparing {} with current minimum {}",
                items[j].value, items[min].value
            );
            if !inst.step(&*items, description).await {
                return false;
            }
            if items[j].value < items[min].value {
                items[min].status = ItemStatus::Default;
                min = j;
                items[min].status = ItemStatus::Pivot;
            } else {
                items[j].status = ItemStatus::Default;
            }
        }
        if min != i {
            mark(items, &[i, min], ItemStatus::Swapping);
            let description = format!("Moving {} to position {}", items[min].value, i);
            if !inst.step(&*items, description).await {
                return false;
            }
            items.swap(i, min);
            items[min].status = ItemStatus::Default;
        }
        items[i].status = ItemStatus::Sorted;
        inst.set_done(i + 1);
    }

    finish(items, inst, "Selection Sort complete")
}

/// Grows a sorted prefix by sinking each new item left past larger ones.
pub async fn insertion_sort<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = trivial(items, inst) {
        return done;
    }
    let n = items.len();
    inst.set_total(n - 1);
    items[0].status = ItemStatus::Sorted;

    for i in 1..n {
        let mut j = i;
        items[j].status = ItemStatus::Comparing;
        while j > 0 {
            items[j - 1].status = ItemStatus::Comparing;
            let description = format!("Comparing {} with {}", items[j - 1].value, items[j].value);
            if !inst.step(&*items, description).await {
                return false;
            }
            // equal keys are never shifted past each other, which keeps the sort stable
            if items[j - 1].value <= items[j].value {
                items[j - 1].status = ItemStatus::Sorted;
                break;
            }
            mark(items, &[j - 1, j], ItemStatus::Swapping);
            items.swap(j - 1, j);
            let description = format!("Shifting {} right", items[j].value);
            if !inst.step(&*items, description).await {
                return false;
            }
            items[j].status = ItemStatus::Sorted;
            items[j - 1].status = ItemStatus::Comparing;
            j -= 1;
        }
        items[j].status = ItemStatus::Sorted;
        inst.set_done(i);
    }

    finish(items, inst, "Insertion Sort complete")
}

/// Index of the median value among three positions.
fn median_of_three(items: &[Item], a: usize, b: usize, c: usize) -> usize {
    let (x, y, z) = (items[a].value, items[b].value, items[c].value);
    if (x <= y) == (y <= z) {
        b
    } else if (y <= x) == (x <= z) {
        a
    } else {
        c
    }
}

/// Lomuto-partition quicksort on the half-open range `lo..hi`, pivoting on
/// the median of the first, middle and last values.
fn quick_range<'a, K: ArraySink>(
    items: &'a mut Vec<Item>,
    lo: usize,
    hi: usize,
    inst: &'a mut Instrument<K>,
) -> BoxFuture<'a, bool> {
    async move {
        if hi <= lo {
            return true;
        }
        if hi - lo == 1 {
            items[lo].status = ItemStatus::Sorted;
            inst.advance(1);
            return inst.checkpoint().await;
        }

        let pivot = hi - 1;
        if hi - lo >= 3 {
            let median = median_of_three(items, lo, lo + (hi - lo) / 2, pivot);
            if median != pivot {
                mark(items, &[median, pivot], ItemStatus::Swapping);
                items.swap(median, pivot);
                let description = format!("Moving median {} to the end as pivot", items[pivot].value);
                if !inst.step(&*items, description).await {
                    return false;
                }
                items[median].status = ItemStatus::Default;
            }
        }
        let pivot_value = items[pivot].value;
        items[pivot].status = ItemStatus::Pivot;
        if !inst.step(&*items, format!("Pivot is {pivot_value}")).await {
            return false;
        }

        let mut store = lo;
        for j in lo..pivot {
            items[j].status = ItemStatus::Comparing;
            let description = format!("Comparing {} with pivot {}", items[j].value, pivot_value);
            if !inst.step(&*items, description).await {
                return false;
            }
            if items[j].value < pivot_value {
                if j != store {
                    mark(items, &[store, j], ItemStatus::Swapping);
                    items.swap(store, j);
                    let description =
                        format!("Swapping {} and {}", items[store].value, items[j].value);
                    if !inst.step(&*items, description).await {
                        return false;
                    }
                    items[j].status = ItemStatus::Default;
                }
                items[store].status = ItemStatus::Default;
                store += 1;
            } else {
                items[j].status = ItemStatus::Default;
            }
        }

        if store != pivot {
            mark(items, &[store, pivot], ItemStatus::Swapping);
            items.swap(store, pivot);
            let description = format!("Placing pivot {pivot_value} at position {store}");
            if !inst.step(&*items, description).await {
                return false;
            }
            items[pivot].status = ItemStatus::Default;
        }
        items[store].status = ItemStatus::Sorted;
        inst.advance(1);

        quick_range(items, lo, store, inst).await && quick_range(items, store + 1, hi, inst).await
    }
    .boxed()
}

/// Partitions around a median-of-three pivot and recursively sorts both sides.
pub async fn quick_sort<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = trivial(items, inst) {
        return done;
    }
    let n = items.len();
    inst.set_total(n);
    if !quick_range(items, 0, n, inst).await {
        return false;
    }
    finish(items, inst, "Quick Sort complete")
}

/// Number of item writes a top-down merge sort performs on `n` items.
fn merge_work(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let left = (n + 1) / 2;
    merge_work(left) + merge_work(n - left) + n
}

async fn merge<K: ArraySink>(
    items: &mut Vec<Item>,
    lo: usize,
    mid: usize,
    hi: usize,
    inst: &mut Instrument<K>,
) -> bool {
    let left: Vec<Item> = items[lo..mid].to_vec();
    let right: Vec<Item> = items[mid..hi].to_vec();

    for item in &mut items[lo..hi] {
        item.status = ItemStatus::Comparing;
    }
    let description = format!("Merging positions {}..{} and {}..{}", lo, mid, mid, hi);
    if !inst.step(&*items, description).await {
        return false;
    }

    let (mut i, mut j) = (0, 0);
    for k in lo..hi {
        // `<=` takes from the left on ties, which keeps the sort stable
        let take_left = j >= right.len() || (i < left.len() && left[i].value <= right[j].value);
        let next = if take_left {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        items[k] = next.with_status(ItemStatus::Swapping);
        let description = format!("Writing {} to position {}", next.value, k);
        if !inst.step(&*items, description).await {
            return false;
        }
        items[k].status = ItemStatus::Default;
        inst.advance(1);
    }
    true
}

fn merge_range<'a, K: ArraySink>(
    items: &'a mut Vec<Item>,
    lo: usize,
    hi: usize,
    inst: &'a mut Instrument<K>,
) -> BoxFuture<'a, bool> {
    async move {
        if hi - lo <= 1 {
            return true;
        }
        let mid = lo + (hi - lo + 1) / 2;
        merge_range(items, lo, mid, inst).await
            && merge_range(items, mid, hi, inst).await
            && merge(items, lo, mid, hi, inst).await
    }
    .boxed()
}

/// Top-down, stable merge sort.
pub async fn merge_sort<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = trivial(items, inst) {
        return done;
    }
    let n = items.len();
    inst.set_total(merge_work(n));
    if !merge_range(items, 0, n, inst).await {
        return false;
    }
    finish(items, inst, "Merge Sort complete")
}

/// Sift the value at `root` down a max-heap of the first `size` items.
fn heapify<'a, K: ArraySink>(
    items: &'a mut Vec<Item>,
    size: usize,
    root: usize,
    inst: &'a mut Instrument<K>,
) -> BoxFuture<'a, bool> {
    async move {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        items[root].status = ItemStatus::Pivot;
        if !inst.step(&*items, format!("Heapifying at {}", items[root].value)).await {
            return false;
        }

        for child in [left, right] {
            if child >= size {
                continue;
            }
            items[child].status = ItemStatus::Comparing;
            let description = format!("Comparing {} with {}", items[child].value, items[largest].value);
            if !inst.step(&*items, description).await {
                return false;
            }
            if items[child].value > items[largest].value {
                largest = child;
            }
        }
        for child in [left, right] {
            if child < size {
                items[child].status = ItemStatus::Default;
            }
        }

        if largest == root {
            items[root].status = ItemStatus::Default;
            return true;
        }

        mark(items, &[root, largest], ItemStatus::Swapping);
        let description = format!("Swapping {} and {}", items[root].value, items[largest].value);
        if !inst.step(&*items, description).await {
            return false;
        }
        items.swap(root, largest);
        mark(items, &[root, largest], ItemStatus::Default);

        heapify(items, size, largest, inst).await
    }
    .boxed()
}

/// Builds a max-heap, then repeatedly moves the root behind the heap.
pub async fn heap_sort<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = trivial(items, inst) {
        return done;
    }
    let n = items.len();
    inst.set_total(n);

    for root in (0..n / 2).rev() {
        if !heapify(items, n, root, inst).await {
            return false;
        }
    }

    for end in (1..n).rev() {
        mark(items, &[0, end], ItemStatus::Swapping);
        let description = format!("Moving maximum {} to position {}", items[0].value, end);
        if !inst.step(&*items, description).await {
            return false;
        }
        items.swap(0, end);
        items[0].status = ItemStatus::Default;
        items[end].status = ItemStatus::Sorted;
        inst.advance(1);

        if !heapify(items, end, 0, inst).await {
            return false;
        }
    }
    items[0].status = ItemStatus::Sorted;
    inst.advance(1);

    finish(items, inst, "Heap Sort complete")
}

fn digit_count(mut value: u32) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// Least-significant-digit radix sort, base 10.
pub async fn radix_sort<K: ArraySink>(items: &mut Vec<Item>, inst: &mut Instrument<K>) -> bool {
    if let Some(done) = trivial(items, inst) {
        return done;
    }
    let n = items.len();
    let max = items.iter().map(|item| item.value).max().unwrap_or(0);
    let passes = digit_count(max);
    inst.set_total(passes * n);

    let mut place: u64 = 1;
    for _ in 0..passes {
        let mut buckets: Vec<Vec<Item>> = vec![Vec::new(); 10];
        for i in 0..n {
            let digit = (u64::from(items[i].value) / place % 10) as usize;
            items[i].status = ItemStatus::Comparing;
            let description = format!(
                "{} goes to bucket {} (digit at place {})",
                items[i].value, digit, place
            );
            if !inst.step(&*items, description).await {
                return false;
            }
            items[i].status = ItemStatus::Default;
            buckets[digit].push(items[i]);
            inst.advance(1);
        }

        items.clear();
        items.extend(
            buckets
                .into_iter()
                .flatten()
                .map(|item| item.with_status(ItemStatus::Swapping)),
        );
        if !inst.step(&*items, format!("Collected buckets by place {place}")).await {
            return false;
        }
        for item in items.iter_mut() {
            item.status = ItemStatus::Default;
        }
        place *= 10;
    }

    finish(items, inst, "Radix Sort complete")
}
