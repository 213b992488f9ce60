//! Graph Builder (Cyclic) — spec.md section 4.1.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::errors::{PhenomeError, PhenomeResult};
use crate::graph::connection::WeightedConnection;

/// A compacted, cache-friendly runtime graph with dense `[0, totalNodeCount)`
/// node indices and connections sorted ascending by `(sourceId, targetId)`
/// (section 3).
///
/// Immutable after construction and cheaply `Clone`-able (all fields are
/// flat `Vec`s), so it can be wrapped in an `Arc` and shared read-only across
/// worker threads evaluating different genomes in parallel (section 5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CyclicGraph {
    input_count: usize,
    output_count: usize,
    total_node_count: usize,
    source_id: Vec<usize>,
    target_id: Vec<usize>,
    weight: Vec<f32>,
}

impl CyclicGraph {
    /// Compiles a sparse, ID-based connection list into a dense runtime
    /// graph. See section 4.1 for the compaction algorithm.
    #[tracing::instrument(skip(connections), fields(conn_count = connections.len()))]
    pub fn build(
        connections: &[WeightedConnection],
        input_count: usize,
        output_count: usize,
    ) -> PhenomeResult<Self> {
        let reserved = input_count + output_count;

        for c in connections {
            if c.source < 0 || c.target < 0 {
                return Err(PhenomeError::InvalidGraph(format!(
                    "negative node id in connection ({}, {})",
                    c.source, c.target
                )));
            }
        }

        // Step 2: collect hidden node IDs (anything outside the reserved
        // input/output range), sorted ascending.
        let mut hidden_ids: BTreeSet<i32> = BTreeSet::new();
        for c in connections {
            if c.source as usize >= reserved {
                hidden_ids.insert(c.source);
            }
            if c.target as usize >= reserved {
                hidden_ids.insert(c.target);
            }
        }

        // Step 3: dense hidden-id mapping, starting right after the
        // reserved input/output range.
        let hidden_idx_by_id: std::collections::HashMap<i32, usize> = hidden_ids
            .into_iter()
            .enumerate()
            .map(|(offset, id)| (id, reserved + offset))
            .collect();
        let total_node_count = reserved + hidden_idx_by_id.len();

        // Step 4-5: rewrite and materialize.
        let mut triples: Vec<(usize, usize, f32)> = Vec::with_capacity(connections.len());
        for c in connections {
            let source = remap(c.source, reserved, &hidden_idx_by_id);
            let target = remap(c.target, reserved, &hidden_idx_by_id);
            triples.push((source, target, c.weight));
        }

        // Step 1: sort ascending by (sourceId, targetId). Duplicates are a
        // genome-contract error, not collapsed here (section 4.1).
        triples.sort_by_key(|&(s, t, _)| (s, t));

        let mut source_id = Vec::with_capacity(triples.len());
        let mut target_id = Vec::with_capacity(triples.len());
        let mut weight = Vec::with_capacity(triples.len());
        for (s, t, w) in triples {
            source_id.push(s);
            target_id.push(t);
            weight.push(w);
        }

        Ok(Self {
            input_count,
            output_count,
            total_node_count,
            source_id,
            target_id,
            weight,
        })
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn output_count(&self) -> usize {
        self.output_count
    }

    pub fn total_node_count(&self) -> usize {
        self.total_node_count
    }

    pub fn connection_count(&self) -> usize {
        self.source_id.len()
    }

    pub fn source_ids(&self) -> &[usize] {
        &self.source_id
    }

    pub fn target_ids(&self) -> &[usize] {
        &self.target_id
    }

    pub fn weights(&self) -> &[f32] {
        &self.weight
    }

    /// Adjacency list grouped by source node, built on demand for the depth
    /// analyzer and for tests. `source_id`/`target_id` are already sorted by
    /// source, so this is a single linear pass.
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adj = vec![Vec::new(); self.total_node_count];
        for (&s, &t) in self.source_id.iter().zip(self.target_id.iter()) {
            adj[s].push(t);
        }
        adj
    }
}

fn remap(id: i32, reserved: usize, hidden_idx_by_id: &std::collections::HashMap<i32, usize>) -> usize {
    if (id as usize) < reserved {
        id as usize
    } else {
        hidden_idx_by_id[&id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_sparse_hidden_ids() {
        // 2 inputs, 1 output (ids 0,1,2); hidden ids 100, 55 (sparse, out of order).
        let conns = vec![
            WeightedConnection::new(0, 100, 0.5),
            WeightedConnection::new(100, 2, 0.25),
            WeightedConnection::new(1, 55, 1.0),
            WeightedConnection::new(55, 2, -1.0),
        ];
        let g = CyclicGraph::build(&conns, 2, 1).unwrap();
        assert_eq!(g.total_node_count(), 5); // 2 in + 1 out + 2 hidden
        // Hidden ids sorted ascending (55, 100) map to dense ids (3, 4).
        assert!(g.source_ids().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn rejects_negative_ids() {
        let conns = vec![WeightedConnection::new(-1, 0, 1.0)];
        let err = CyclicGraph::build(&conns, 1, 1).unwrap_err();
        assert!(matches!(err, PhenomeError::InvalidGraph(_)));
    }

    #[test]
    fn connections_sorted_by_source_then_target() {
        let conns = vec![
            WeightedConnection::new(1, 0, 1.0),
            WeightedConnection::new(0, 1, 1.0),
            WeightedConnection::new(0, 0, 1.0),
        ];
        let g = CyclicGraph::build(&conns, 1, 1).unwrap();
        let pairs: Vec<(usize, usize)> = g
            .source_ids()
            .iter()
            .zip(g.target_ids())
            .map(|(&s, &t)| (s, t))
            .collect();
        let mut sorted = pairs.clone();
        sorted.sort();
        assert_eq!(pairs, sorted);
    }

    #[test]
    fn round_trips_through_json() {
        // A compiled graph is immutable and flat-array-backed, so it's a
        // candidate for the same persist/inspect step the teacher's graph
        // takes in `graph_persistence.rs` — here exercised as a roundtrip
        // rather than an on-disk artifact, since persistence itself is out
        // of this crate's scope.
        let conns = vec![
            WeightedConnection::new(0, 2, 0.5),
            WeightedConnection::new(2, 1, -0.25),
        ];
        let g = CyclicGraph::build(&conns, 1, 1).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let round_tripped: CyclicGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(round_tripped.source_ids(), g.source_ids());
        assert_eq!(round_tripped.target_ids(), g.target_ids());
        assert_eq!(round_tripped.weights(), g.weights());
        assert_eq!(round_tripped.total_node_count(), g.total_node_count());
    }

    #[test]
    fn self_loop_and_parallel_edges_permitted() {
        let conns = vec![
            WeightedConnection::new(0, 0, 0.5),
            WeightedConnection::new(0, 0, 0.25),
        ];
        let g = CyclicGraph::build(&conns, 1, 0).unwrap();
        assert_eq!(g.connection_count(), 2);
    }
}
