use serde::{Deserialize, Serialize};

/// A single edge in a genome's connection list: source node ID, target node
/// ID, and weight (section 3). IDs are the genome's sparse, non-contiguous
/// historical IDs, not the runtime graph's dense indices.
///
/// Self-loops and parallel edges are permitted; the builder does not dedupe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedConnection {
    pub source: i32,
    pub target: i32,
    pub weight: f32,
}

impl WeightedConnection {
    pub fn new(source: i32, target: i32, weight: f32) -> Self {
        Self { source, target, weight }
    }
}
