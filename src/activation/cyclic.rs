//! Cyclic Activation Engine — spec.md section 4.4.
//!
//! Relaxes a possibly-cyclic graph toward a fixed point over a caller-chosen
//! number of iterations rather than walking it in topological order, since a
//! cyclic graph has no topological order to walk.

use crate::activation::blackbox::{OutputRange, OutputView};
use crate::activation::function::ActivationFn;
use crate::graph::buffer_pool::BufferPool;
use crate::graph::cyclic::CyclicGraph;

/// Holds the two activation arrays a cyclic network relaxes across:
/// `pre` is the weighted-sum accumulator for the iteration in progress,
/// `post` is the squashed output of the previous iteration that `pre`'s
/// gather step reads from. Ping-ponging between them (rather than
/// overwriting in place) keeps every node's activation within an iteration
/// a pure function of the *previous* iteration's state, matching how an
/// unrolled-in-time recurrent net actually propagates signal.
pub struct CyclicActivation {
    graph: CyclicGraph,
    activation_fn: ActivationFn,
    pre: Vec<f32>,
    post: Vec<f32>,
    /// Section 4.4's `boundedOutput` flag, carried as the range to clamp to
    /// rather than a bare bool: `None` means unbounded (output reads return
    /// the raw squashed value), `Some(range)` clamps every read through
    /// [`CyclicActivation::output_view`].
    bounded_output: Option<OutputRange>,
}

impl CyclicActivation {
    pub fn new(graph: CyclicGraph, activation_fn: ActivationFn) -> Self {
        Self::new_with_bound(graph, activation_fn, None)
    }

    /// As [`CyclicActivation::new`], but with `boundedOutput` engaged:
    /// output reads clamp to `range` (section 4.4, section 9's "output
    /// bounding" note).
    pub fn new_bounded(graph: CyclicGraph, activation_fn: ActivationFn, range: OutputRange) -> Self {
        Self::new_with_bound(graph, activation_fn, Some(range))
    }

    fn new_with_bound(graph: CyclicGraph, activation_fn: ActivationFn, bounded_output: Option<OutputRange>) -> Self {
        let n = graph.total_node_count();
        Self {
            graph,
            activation_fn,
            pre: vec![0.0; n],
            post: vec![0.0; n],
            bounded_output,
        }
    }

    /// Builds the engine using pooled buffers instead of fresh allocations
    /// (section 5). The pool must later be given the buffers back via
    /// [`CyclicActivation::dispose`].
    pub fn with_pool(graph: CyclicGraph, activation_fn: ActivationFn, pool: &mut BufferPool) -> Self {
        Self::with_pool_bound(graph, activation_fn, pool, None)
    }

    /// As [`CyclicActivation::with_pool`], with `boundedOutput` engaged.
    pub fn with_pool_bounded(
        graph: CyclicGraph,
        activation_fn: ActivationFn,
        pool: &mut BufferPool,
        range: OutputRange,
    ) -> Self {
        Self::with_pool_bound(graph, activation_fn, pool, Some(range))
    }

    fn with_pool_bound(
        graph: CyclicGraph,
        activation_fn: ActivationFn,
        pool: &mut BufferPool,
        bounded_output: Option<OutputRange>,
    ) -> Self {
        let n = graph.total_node_count();
        let pre = pool.acquire(n);
        let post = pool.acquire(n);
        Self { graph, activation_fn, pre, post, bounded_output }
    }

    /// Releases this engine's buffers back to `pool` for reuse.
    pub fn dispose(self, pool: &mut BufferPool) {
        pool.release(self.pre);
        pool.release(self.post);
    }

    /// Runs `iterations` relaxation steps with `inputs` clamped onto the
    /// input nodes every step, then returns the output nodes' activations.
    ///
    /// Each step: gather `post[source] * weight` into `pre[target]` for
    /// every connection, overwrite `pre` at the input node indices with
    /// `inputs`, then squash into `post` for every non-input node (input
    /// nodes pass their clamped value through `post` unsquashed, since they
    /// carry an external signal rather than a computed one).
    pub fn activate(&mut self, inputs: &[f32], iterations: usize) -> &[f32] {
        debug_assert_eq!(inputs.len(), self.graph.input_count());

        let input_count = self.graph.input_count();
        let output_count = self.graph.output_count();
        let source_ids = self.graph.source_ids();
        let target_ids = self.graph.target_ids();
        let weights = self.graph.weights();

        for _ in 0..iterations {
            self.pre.iter_mut().for_each(|v| *v = 0.0);

            for ((&source, &target), &weight) in source_ids.iter().zip(target_ids).zip(weights) {
                self.pre[target] += self.post[source] * weight;
            }

            self.pre[..input_count].copy_from_slice(inputs);

            for node in 0..self.pre.len() {
                self.post[node] = if node < input_count {
                    self.pre[node]
                } else {
                    (self.activation_fn)(self.pre[node])
                };
            }
        }

        &self.post[input_count..input_count + output_count]
    }

    /// Clears accumulated state between independent evaluations of the same
    /// compiled graph (e.g. two different fitness trials for one genome).
    ///
    /// Only `post` is cleared; `pre` is left holding its last values. A
    /// fresh `activate` call overwrites every entry of `pre` before reading
    /// it (the gather loop above always runs before anything reads `pre`),
    /// so the stale values are never observed — clearing `pre` here would
    /// just be wasted work.
    pub fn reset_state(&mut self) {
        self.post.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn graph(&self) -> &CyclicGraph {
        &self.graph
    }

    /// A view over the output nodes from the most recent [`Self::activate`]
    /// call, clamped to this engine's `boundedOutput` range if one was
    /// configured at construction (section 4.4, section 4.6).
    pub fn output_view(&self) -> OutputView<'_> {
        let input_count = self.graph.input_count();
        let output_count = self.graph.output_count();
        OutputView {
            values: &self.post[input_count..input_count + output_count],
            range: self.bounded_output,
        }
    }
}
