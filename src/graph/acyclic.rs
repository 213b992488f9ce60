//! Layer Reordering (Acyclic Graph Builder) — spec.md section 4.3.

use serde::{Deserialize, Serialize};

use crate::errors::PhenomeResult;
use crate::graph::cyclic::CyclicGraph;
use crate::graph::depth::DepthInfo;

/// The connection-index and node-index cursor boundary for one depth layer.
///
/// `end_node_idx` / `end_connection_idx` are exclusive upper bounds: nodes
/// `[0, end_node_idx)` and connections `[0, end_connection_idx)` belong to
/// layers at or before this one. The acyclic activation engine (section 4.5)
/// advances two cursors through these bounds layer by layer, never
/// rescanning a connection or node it has already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerBounds {
    pub end_node_idx: usize,
    pub end_connection_idx: usize,
}

/// A [`CyclicGraph`] re-indexed so that node index is non-decreasing in
/// depth, with connections re-sorted to match. Built once per genome and
/// then walked layer-by-layer by [`crate::activation::acyclic::AcyclicActivation`]
/// with no further graph traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DagGraph {
    input_count: usize,
    output_count: usize,
    total_node_count: usize,
    source_id: Vec<usize>,
    target_id: Vec<usize>,
    weight: Vec<f32>,
    output_node_idx: Vec<usize>,
    layer_bounds: Vec<LayerBounds>,
}

impl DagGraph {
    /// Reorders `graph`'s nodes by `depth.node_depth` (stable, so nodes at
    /// equal depth keep their relative order from the cyclic graph — this
    /// preserves whatever locality the genome's connection order already
    /// had) and builds the per-layer cursor table.
    pub fn build(graph: &CyclicGraph, depth: &DepthInfo) -> PhenomeResult<Self> {
        let n = graph.total_node_count();

        // old_of_new[new_idx] = old_idx, nodes stably sorted by depth.
        let mut old_of_new: Vec<usize> = (0..n).collect();
        old_of_new.sort_by_key(|&old| depth.node_depth[old]);

        let mut new_of_old = vec![0usize; n];
        for (new_idx, &old_idx) in old_of_new.iter().enumerate() {
            new_of_old[old_idx] = new_idx;
        }

        let depth_of_new: Vec<usize> = old_of_new.iter().map(|&old| depth.node_depth[old]).collect();

        // Remap + re-sort connections ascending by (new source, new target),
        // carrying `order` as the connection-index permutation (section 4.3
        // step 4).
        let mut order: Vec<usize> = (0..graph.connection_count()).collect();
        let source_ids = graph.source_ids();
        let target_ids = graph.target_ids();
        let weights = graph.weights();
        let new_source: Vec<usize> = source_ids.iter().map(|&s| new_of_old[s]).collect();
        let new_target: Vec<usize> = target_ids.iter().map(|&t| new_of_old[t]).collect();
        order.sort_by_key(|&i| (new_source[i], new_target[i]));

        let mut source_id = Vec::with_capacity(order.len());
        let mut target_id = Vec::with_capacity(order.len());
        let mut weight = Vec::with_capacity(order.len());
        for &i in &order {
            source_id.push(new_source[i]);
            target_id.push(new_target[i]);
            weight.push(weights[i]);
        }

        let output_node_idx: Vec<usize> = (0..graph.output_count())
            .map(|i| new_of_old[graph.input_count() + i])
            .collect();

        let layer_bounds = build_layer_bounds(&depth_of_new, &source_id, depth.graph_depth);

        Ok(Self {
            input_count: graph.input_count(),
            output_count: graph.output_count(),
            total_node_count: n,
            source_id,
            target_id,
            weight,
            output_node_idx,
            layer_bounds,
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

    pub fn output_node_idx(&self) -> &[usize] {
        &self.output_node_idx
    }

    pub fn layer_bounds(&self) -> &[LayerBounds] {
        &self.layer_bounds
    }

    pub fn graph_depth(&self) -> usize {
        self.layer_bounds.len()
    }
}

/// Cumulative node/connection counts per depth layer. `depth_of_new` is
/// non-decreasing by construction (stable sort by depth), so both cursors
/// advance monotonically; a single linear scan over nodes and one over
/// connections fills the whole table.
fn build_layer_bounds(depth_of_new: &[usize], source_id: &[usize], graph_depth: usize) -> Vec<LayerBounds> {
    let mut end_node_idx = vec![0usize; graph_depth];
    for &d in depth_of_new {
        end_node_idx[d] += 1;
    }
    // Turn per-layer counts into cumulative (exclusive upper bound) counts.
    for l in 1..graph_depth {
        end_node_idx[l] += end_node_idx[l - 1];
    }

    let mut end_connection_idx = vec![0usize; graph_depth];
    let mut conn_cursor = 0usize;
    for l in 0..graph_depth {
        while conn_cursor < source_id.len() && source_id[conn_cursor] < end_node_idx[l] {
            conn_cursor += 1;
        }
        end_connection_idx[l] = conn_cursor;
    }

    end_node_idx
        .into_iter()
        .zip(end_connection_idx)
        .map(|(end_node_idx, end_connection_idx)| LayerBounds { end_node_idx, end_connection_idx })
        .collect()
}
