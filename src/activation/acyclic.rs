//! Acyclic Activation Engine — spec.md section 4.5.
//!
//! Walks a [`DagGraph`] in a single pass: two cursors advance through the
//! node and connection arrays together, layer by layer, so every connection
//! and every node is visited exactly once. No relaxation, no iteration
//! count — an acyclic network has one correct answer per input.

use crate::activation::function::{apply_in_place, ActivationFn};
use crate::graph::acyclic::DagGraph;

/// Single-pass feedforward evaluator for a [`DagGraph`].
pub struct AcyclicActivation {
    graph: DagGraph,
    activation_fn: ActivationFn,
    /// Weighted-sum accumulator, gathered into as earlier layers finish.
    acc: Vec<f32>,
    /// Final per-node activation (squashed for hidden/output, passthrough
    /// for input nodes).
    values: Vec<f32>,
}

/// Finalizes one layer's node range: writes `inputs` through for the input
/// range it overlaps, and squashes `acc` into `values` for the rest. Shared
/// by the scalar and bulk-squash paths, which differ only in how they do
/// the squash — both run the identical per-connection gather in [`Self::run`].
type LayerFinalizer = fn(values: &mut [f32], acc: &[f32], inputs: &[f32], input_count: usize, from: usize, to: usize, activation_fn: ActivationFn);

impl AcyclicActivation {
    pub fn new(graph: DagGraph, activation_fn: ActivationFn) -> Self {
        let n = graph.total_node_count();
        Self {
            graph,
            activation_fn,
            acc: vec![0.0; n],
            values: vec![0.0; n],
        }
    }

    /// Scalar single-pass evaluation: one `activation_fn` call per
    /// hidden/output node, interleaved with the gather step as each layer
    /// becomes available.
    pub fn activate(&mut self, inputs: &[f32]) -> Vec<f32> {
        self.run(inputs, finalize_layer_scalar)
    }

    /// Same result as [`AcyclicActivation::activate`], differing only in how
    /// a layer's squash step is applied: one bulk [`apply_in_place`] call
    /// over the whole layer instead of one `activation_fn` call per node —
    /// friendlier to auto-vectorization (and, with the `rayon` feature,
    /// data-parallel) than the node-by-node scalar loop.
    ///
    /// The per-connection gather immediately below (`self.acc[target] +=
    /// ...`) is identical in both paths and stays scalar: section 4.5's
    /// gather-multiply-scatter strip-mining needs a real SIMD facility to
    /// vectorize the gather/multiply while scalar-unrolling the scatter
    /// (target indices can collide within a block), and no such crate
    /// appears anywhere in the retrieval pack (see `DESIGN.md`). So this is
    /// a bulk-squash variant, not a vectorized gather — don't read the name
    /// as implying SIMD on the hot per-connection loop.
    pub fn activate_bulk_squash(&mut self, inputs: &[f32]) -> Vec<f32> {
        self.run(inputs, finalize_layer_bulk_squash)
    }

    fn run(&mut self, inputs: &[f32], finalize_layer: LayerFinalizer) -> Vec<f32> {
        let input_count = self.graph.input_count();
        debug_assert_eq!(inputs.len(), input_count);

        self.acc.iter_mut().for_each(|v| *v = 0.0);

        let source_ids = self.graph.source_ids();
        let target_ids = self.graph.target_ids();
        let weights = self.graph.weights();
        let activation_fn = self.activation_fn;

        let mut node_cursor = 0usize;
        let mut conn_cursor = 0usize;

        for bounds in self.graph.layer_bounds() {
            finalize_layer(&mut self.values, &self.acc, inputs, input_count, node_cursor, bounds.end_node_idx, activation_fn);
            node_cursor = bounds.end_node_idx;

            for i in conn_cursor..bounds.end_connection_idx {
                self.acc[target_ids[i]] += self.values[source_ids[i]] * weights[i];
            }
            conn_cursor = bounds.end_connection_idx;
        }

        self.graph
            .output_node_idx()
            .iter()
            .map(|&idx| self.values[idx])
            .collect()
    }

    pub fn graph(&self) -> &DagGraph {
        &self.graph
    }
}

fn finalize_layer_scalar(
    values: &mut [f32],
    acc: &[f32],
    inputs: &[f32],
    input_count: usize,
    from: usize,
    to: usize,
    activation_fn: ActivationFn,
) {
    for idx in from..to {
        values[idx] = if idx < input_count { inputs[idx] } else { activation_fn(acc[idx]) };
    }
}

fn finalize_layer_bulk_squash(
    values: &mut [f32],
    acc: &[f32],
    inputs: &[f32],
    input_count: usize,
    from: usize,
    to: usize,
    activation_fn: ActivationFn,
) {
    let input_hi = to.min(input_count);
    if from < input_hi {
        values[from..input_hi].copy_from_slice(&inputs[from..input_hi]);
    }
    let hidden_lo = from.max(input_count);
    if hidden_lo < to {
        values[hidden_lo..to].copy_from_slice(&acc[hidden_lo..to]);
        apply_in_place(&mut values[hidden_lo..to], activation_fn);
    }
}
