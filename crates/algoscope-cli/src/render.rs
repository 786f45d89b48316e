//! Plain-text rendering of frames and snapshots.

use std::fmt::Write as _;

use algoscope_live::ListView;
use algoscope_model::{EdgeStatus, Graph, Item, ItemStatus, ListNodeStatus, NodeStatus};
use algoscope_steplog::{DijkstraSnapshot, HuffmanSnapshot, PrimSnapshot};

/// A visual state that can be drawn as terminal text.
pub trait TextFrame {
    fn render(&self) -> String;
}

fn item_mark(status: ItemStatus) -> &'static str {
    match status {
        ItemStatus::Default => "",
        ItemStatus::Comparing => "?",
        ItemStatus::Swapping => "~",
        ItemStatus::Sorted => "*",
        ItemStatus::Pivot => "^",
        ItemStatus::Target => "!",
        ItemStatus::Eliminated => "x",
    }
}

impl TextFrame for Vec<Item> {
    fn render(&self) -> String {
        let cells: Vec<String> = self
            .iter()
            .map(|item| format!("{}{}", item.value, item_mark(item.status)))
            .collect();
        format!("[{}]", cells.join(" "))
    }
}

fn graph_summary(graph: &Graph) -> String {
    let mut out = String::new();
    for node in graph.nodes() {
        let mark = match node.status {
            NodeStatus::Default => ' ',
            NodeStatus::Processing => '>',
            NodeStatus::Visited => '+',
            NodeStatus::Sorted => '*',
        };
        let _ = write!(out, "{}{} ", node.label, mark);
    }
    let taken: Vec<String> = graph
        .edges()
        .iter()
        .filter(|e| e.status != EdgeStatus::Default)
        .map(|e| {
            let sep = if e.status == EdgeStatus::Comparing { "?" } else { "-" };
            format!("{}{sep}{}", graph.label(e.source), graph.label(e.target))
        })
        .collect();
    if !taken.is_empty() {
        let _ = write!(out, "| {}", taken.join(" "));
    }
    out.trim_end().to_string()
}

impl TextFrame for Graph {
    fn render(&self) -> String {
        graph_summary(self)
    }
}

impl TextFrame for ListView {
    fn render(&self) -> String {
        let order = self.list.traverse().order;
        let cells: Vec<String> = order
            .iter()
            .map(|&i| {
                let node = &self.list.nodes[i];
                let mark = match node.status {
                    ListNodeStatus::Default => "",
                    ListNodeStatus::Current => "(cur)",
                    ListNodeStatus::Reversed => "(rev)",
                    ListNodeStatus::Slow => "(slow)",
                    ListNodeStatus::Fast => "(fast)",
                    ListNodeStatus::Middle => "(mid)",
                };
                format!("{}{mark}", node.value)
            })
            .collect();
        format!("{} -> null", cells.join(" -> "))
    }
}

impl TextFrame for DijkstraSnapshot {
    fn render(&self) -> String {
        let cells: Vec<String> = self
            .distances
            .iter()
            .zip(&self.visited)
            .enumerate()
            .map(|(i, (distance, visited))| {
                let d = distance.map_or_else(|| "inf".to_string(), |d| d.to_string());
                format!("{}={d}{}", algoscope_model::default_label(i), if *visited { "+" } else { "" })
            })
            .collect();
        cells.join(" ")
    }
}

impl TextFrame for HuffmanSnapshot {
    fn render(&self) -> String {
        let mut out = format!("[{}]", self.phase);
        if !self.codes.is_empty() {
            let codes: Vec<String> = self
                .codes
                .iter()
                .map(|(symbol, code)| format!("{symbol:?}={code}"))
                .collect();
            let _ = write!(out, " {}", codes.join(" "));
        } else if !self.forest.is_empty() {
            let roots: Vec<String> = self
                .forest
                .iter()
                .map(|&id| {
                    let node = &self.nodes[id];
                    format!("{}:{}", node.label(), node.frequency)
                })
                .collect();
            let _ = write!(out, " {}", roots.join(" "));
        }
        out
    }
}

impl TextFrame for PrimSnapshot {
    fn render(&self) -> String {
        format!("{} | weight {}", graph_summary(&self.graph), self.total_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoscope_model::{items_from_values, LinkedListState};
    use algoscope_steplog::generate_huffman;

    #[test]
    fn items_show_status_marks() {
        let mut items = items_from_values(&[3, 1]);
        items[0].status = ItemStatus::Sorted;
        items[1].status = ItemStatus::Comparing;
        assert_eq!(items.render(), "[3* 1?]");
    }

    #[test]
    fn list_in_link_order() {
        let view = ListView::new(LinkedListState::sequential(&[4, 5, 6]));
        assert_eq!(view.render(), "4 -> 5 -> 6 -> null");
    }

    #[test]
    fn huffman_final_codes() {
        let steps = generate_huffman("aab").steps;
        let last = steps.last().unwrap().render();
        assert!(last.starts_with("[Completed]"));
        assert!(last.contains("'a'=1"));
    }
}
