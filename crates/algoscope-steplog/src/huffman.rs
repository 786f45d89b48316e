//! Huffman coding, recorded eagerly.
//!
//! Symbols are counted in order of first appearance and leaves get ids in
//! that order. Each merge pops the two lightest trees by `(frequency, id)`,
//! so the tree shape is fully determined by the input text. Left children
//! carry bit `0`, right children bit `1`.

use std::collections::BTreeMap;
use std::fmt;

use algoscope_engine::{Generated, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::recorder::{Annotate, Recorder};

/// Stage of the construction a snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HuffmanPhase {
    CountingFrequencies,
    InitialForest,
    BuildingTree,
    GeneratingCodes,
    Completed,
}

impl fmt::Display for HuffmanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuffmanPhase::CountingFrequencies => write!(f, "Counting Frequencies"),
            HuffmanPhase::InitialForest => write!(f, "Initial Forest"),
            HuffmanPhase::BuildingTree => write!(f, "Building Tree"),
            HuffmanPhase::GeneratingCodes => write!(f, "Generating Codes"),
            HuffmanPhase::Completed => write!(f, "Completed"),
        }
    }
}

/// A tree node. Leaves carry a symbol; internal nodes carry both children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanNode {
    pub id: usize,
    pub symbol: Option<char>,
    pub frequency: usize,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl HuffmanNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// `'c'` for leaves, `*` for internal nodes.
    pub fn label(&self) -> String {
        match self.symbol {
            Some(symbol) => format!("'{symbol}'"),
            None => "'*'".to_string(),
        }
    }
}

/// Parent-to-child link labelled with its code bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanEdge {
    pub parent: usize,
    pub child: usize,
    pub bit: char,
}

/// One recorded instant of the construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuffmanSnapshot {
    pub phase: HuffmanPhase,
    /// Ids of the current tree roots, lightest first.
    pub forest: Vec<usize>,
    /// Every node created so far, indexed by id.
    pub nodes: Vec<HuffmanNode>,
    pub edges: Vec<HuffmanEdge>,
    /// Symbol counts in first-appearance order.
    pub frequencies: Vec<(char, usize)>,
    pub codes: BTreeMap<char, String>,
    pub highlight_nodes: Vec<usize>,
    /// Highlighted edges as `(parent, child)`.
    pub highlight_edges: Vec<(usize, usize)>,
    pub description: String,
}

impl Snapshot for HuffmanSnapshot {
    fn description(&self) -> &str {
        &self.description
    }
}

impl Annotate for HuffmanSnapshot {
    fn annotate(&mut self, description: String) {
        self.description = description;
    }
}

/// The finished code table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HuffmanResult {
    /// Root node id, `None` for empty text.
    pub root: Option<usize>,
    pub frequencies: Vec<(char, usize)>,
    pub codes: BTreeMap<char, String>,
}

impl HuffmanResult {
    pub fn code(&self, symbol: char) -> Option<&str> {
        self.codes.get(&symbol).map(String::as_str)
    }

    /// Encode `text`, or `None` if it uses a symbol outside the table.
    pub fn encode(&self, text: &str) -> Option<String> {
        text.chars().map(|c| self.code(c)).collect()
    }

    /// Total encoded length in bits of the text the table was built from.
    pub fn encoded_bits(&self) -> usize {
        self.frequencies
            .iter()
            .map(|(symbol, count)| count * self.code(*symbol).map_or(0, str::len))
            .sum()
    }
}

fn count_frequencies(text: &str) -> Vec<(char, usize)> {
    let mut frequencies: Vec<(char, usize)> = Vec::new();
    for c in text.chars() {
        match frequencies.iter_mut().find(|(symbol, _)| *symbol == c) {
            Some((_, count)) => *count += 1,
            None => frequencies.push((c, 1)),
        }
    }
    frequencies
}

fn sort_forest(state: &mut HuffmanSnapshot) {
    let nodes = &state.nodes;
    state.forest.sort_by_key(|id| (nodes[*id].frequency, *id));
}

fn assign_codes(rec: &mut Recorder<HuffmanSnapshot>, node: usize, prefix: String) {
    let (symbol, left, right, label, frequency) = {
        let n = &rec.state.nodes[node];
        (n.symbol, n.left, n.right, n.label(), n.frequency)
    };
    rec.state.highlight_nodes = vec![node];
    rec.state.highlight_edges.clear();
    let name = if symbol.is_some() { label } else { frequency.to_string() };
    rec.record(format!("Traversing to node {name}, code so far: '{prefix}'"));

    if let Some(symbol) = symbol {
        // a single-symbol text still needs one bit per symbol
        let code = if prefix.is_empty() { "0".to_string() } else { prefix.clone() };
        rec.state.codes.insert(symbol, code.clone());
        rec.record(format!("Assigned code '{code}' to '{symbol}'."));
    }
    if let Some(left) = left {
        rec.state.highlight_edges = vec![(node, left)];
        assign_codes(rec, left, format!("{prefix}0"));
    }
    if let Some(right) = right {
        rec.state.highlight_edges = vec![(node, right)];
        assign_codes(rec, right, format!("{prefix}1"));
    }
}

/// Record the construction of a Huffman code for `text`.
///
/// Empty text yields a single step and an empty table. A text with one
/// distinct symbol yields a one-node tree whose symbol gets code `0`.
pub fn generate_huffman(text: &str) -> Generated<HuffmanSnapshot, HuffmanResult> {
    let mut rec = Recorder::new(HuffmanSnapshot {
        phase: HuffmanPhase::CountingFrequencies,
        forest: Vec::new(),
        nodes: Vec::new(),
        edges: Vec::new(),
        frequencies: Vec::new(),
        codes: BTreeMap::new(),
        highlight_nodes: Vec::new(),
        highlight_edges: Vec::new(),
        description: String::new(),
    });

    if text.is_empty() {
        rec.record("Empty text provided.");
        return Generated {
            steps: rec.finish(),
            aux: HuffmanResult::default(),
        };
    }

    rec.record("Calculating character frequencies...");
    let frequencies = count_frequencies(text);
    rec.state.frequencies = frequencies.clone();
    rec.state.nodes = frequencies
        .iter()
        .enumerate()
        .map(|(id, (symbol, frequency))| HuffmanNode {
            id,
            symbol: Some(*symbol),
            frequency: *frequency,
            left: None,
            right: None,
        })
        .collect();
    rec.state.forest = (0..frequencies.len()).collect();
    sort_forest(&mut rec.state);
    rec.state.phase = HuffmanPhase::InitialForest;
    rec.record(format!("Found {} unique characters.", frequencies.len()));

    rec.state.phase = HuffmanPhase::BuildingTree;
    while rec.state.forest.len() > 1 {
        sort_forest(&mut rec.state);
        let left = rec.state.forest.remove(0);
        let right = rec.state.forest.remove(0);
        let (left_label, left_freq) = (rec.state.nodes[left].label(), rec.state.nodes[left].frequency);
        let (right_label, right_freq) = (rec.state.nodes[right].label(), rec.state.nodes[right].frequency);

        rec.state.highlight_nodes = vec![left, right];
        rec.state.highlight_edges.clear();
        rec.record(format!(
            "Popping two nodes with smallest frequencies: {left_label} ({left_freq}) and {right_label} ({right_freq})."
        ));

        let parent = rec.state.nodes.len();
        let frequency = left_freq + right_freq;
        rec.state.nodes.push(HuffmanNode {
            id: parent,
            symbol: None,
            frequency,
            left: Some(left),
            right: Some(right),
        });
        rec.state.edges.push(HuffmanEdge { parent, child: left, bit: '0' });
        rec.state.edges.push(HuffmanEdge { parent, child: right, bit: '1' });
        rec.state.forest.push(parent);
        sort_forest(&mut rec.state);

        rec.state.highlight_nodes = vec![parent];
        rec.state.highlight_edges = vec![(parent, left), (parent, right)];
        rec.record(format!("Created parent node with frequency {frequency}."));
    }

    let root = rec.state.forest.first().copied();
    rec.state.phase = HuffmanPhase::GeneratingCodes;
    rec.state.highlight_nodes.clear();
    rec.state.highlight_edges.clear();
    rec.record("Tree built! Generating codes by traversing from root.");
    if let Some(root) = root {
        assign_codes(&mut rec, root, String::new());
    }

    rec.state.phase = HuffmanPhase::Completed;
    rec.state.highlight_nodes.clear();
    rec.state.highlight_edges.clear();
    rec.record("Huffman Coding complete.");

    let codes = rec.state.codes.clone();
    debug!(symbols = frequencies.len(), steps = rec.len(), "huffman recorded");
    Generated {
        steps: rec.finish(),
        aux: HuffmanResult {
            root,
            frequencies,
            codes,
        },
    }
}
