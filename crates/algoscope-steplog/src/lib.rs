//! Algoscope Steplog: algorithms recorded ahead of time.
//!
//! Each generator runs its algorithm to completion in one synchronous call
//! and returns an [`algoscope_engine::Generated`]: the ordered snapshots for
//! playback plus the algorithm's own result. Snapshots own deep copies of
//! everything they show, so any step can be rendered on its own and a
//! [`algoscope_engine::Playback`] can seek freely.
//!
//! Generators are deterministic: the same input always yields the same log.
//!
//! ```
//! use algoscope_steplog::generate_huffman;
//!
//! let generated = generate_huffman("BEEP BOOP");
//! assert_eq!(generated.aux.codes.len(), 5);
//! assert_eq!(generated.steps.last().map(|s| s.description.as_str()), Some("Huffman Coding complete."));
//! ```

mod dijkstra;
mod huffman;
mod prim;
mod recorder;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use dijkstra::{generate_dijkstra, DijkstraResult, DijkstraSnapshot};
pub use huffman::{
    generate_huffman, HuffmanEdge, HuffmanNode, HuffmanPhase, HuffmanResult, HuffmanSnapshot,
};
pub use prim::{generate_prim, MstEdge, PrimResult, PrimSnapshot};

/// The step-log algorithms, by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepAlgorithm {
    Dijkstra,
    Huffman,
    Prim,
}

impl StepAlgorithm {
    pub const ALL: [StepAlgorithm; 3] = [StepAlgorithm::Dijkstra, StepAlgorithm::Huffman, StepAlgorithm::Prim];

    pub fn name(&self) -> &'static str {
        match self {
            StepAlgorithm::Dijkstra => "Dijkstra",
            StepAlgorithm::Huffman => "Huffman Coding",
            StepAlgorithm::Prim => "Prim's MST",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            StepAlgorithm::Dijkstra => "dijkstra",
            StepAlgorithm::Huffman => "huffman",
            StepAlgorithm::Prim => "prim",
        }
    }

    /// Match a display name or slug, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name) || a.slug().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for StepAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
