//! Live instrumented searching.

use algoscope_engine::Instrument;
use algoscope_model::{Item, ItemStatus};
use tracing::debug;

use crate::sorting::ArraySink;

/// Target used when the caller does not name one: the value in the middle
/// of the array, so a default run always finds something.
pub fn default_target(items: &[Item]) -> Option<u32> {
    items.get(items.len() / 2).map(|item| item.value)
}

/// Mark every item except the hit as eliminated and render the final frame.
fn conclude<K: ArraySink>(
    items: &mut Vec<Item>,
    hit: Option<usize>,
    inst: &mut Instrument<K>,
    description: String,
) -> bool {
    for (i, item) in items.iter_mut().enumerate() {
        item.status = if Some(i) == hit {
            ItemStatus::Target
        } else {
            ItemStatus::Eliminated
        };
    }
    inst.complete(&*items, description)
}

/// Scan left to right for `target`.
///
/// The first match is marked [`ItemStatus::Target`] and the run ends there;
/// every other item finishes as [`ItemStatus::Eliminated`]. A miss still
/// completes, with an explanatory final frame. A single item is decided in
/// that one frame. Returns `true` on natural completion either way; `false`
/// only on stop.
pub async fn linear_search<K: ArraySink>(
    items: &mut Vec<Item>,
    target: u32,
    inst: &mut Instrument<K>,
) -> bool {
    if items.is_empty() {
        return inst.complete(&*items, "Array is empty, nothing to search");
    }
    inst.set_total(items.len());

    if items.len() == 1 {
        let hit = (items[0].value == target).then_some(0);
        let description = match hit {
            Some(_) => format!("Found {target} at index 0"),
            None => format!("{target} is not in the array"),
        };
        return conclude(items, hit, inst, description);
    }

    for i in 0..items.len() {
        items[i].status = ItemStatus::Comparing;
        let description = format!("Checking index {}: is {} equal to {}?", i, items[i].value, target);
        if !inst.step(&*items, description).await {
            return false;
        }
        if items[i].value == target {
            debug!(target, index = i, "search hit");
            return conclude(items, Some(i), inst, format!("Found {target} at index {i}"));
        }
        items[i].status = ItemStatus::Default;
        inst.advance(1);
    }

    debug!(target, "search miss");
    conclude(items, None, inst, format!("{target} is not in the array"))
}
