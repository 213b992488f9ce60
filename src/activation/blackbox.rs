//! Black-Box Facade — spec.md section 6.
//!
//! Callers evaluating fitness shouldn't need to know whether a genome
//! compiled to a cyclic or an acyclic network. `BlackBox` is the
//! object-safe trait evaluators are written against; `Phenome` is the
//! concrete enum that dispatches to one engine or the other without the
//! cost of a trait object (see the module-level rationale in `DESIGN.md`
//! for choosing an enum over `Box<dyn BlackBox>`).

use crate::activation::acyclic::AcyclicActivation;
use crate::activation::cyclic::CyclicActivation;
use crate::activation::function::ActivationFn;
use crate::graph::acyclic::DagGraph;
use crate::graph::buffer_pool::BufferPool;
use crate::graph::cyclic::CyclicGraph;

/// The range an evaluator should clamp/expect outputs into. Chosen by the
/// caller at construction time rather than inferred from the activation
/// function, since a network's activation function and its intended output
/// semantics are independent choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputRange {
    /// `[-1, 1]`, the natural range of `tanh`-style activations.
    Bipolar,
    /// `[0, 1]`, the natural range of sigmoid-style activations.
    Unit,
}

impl OutputRange {
    pub fn clamp(self, value: f32) -> f32 {
        match self {
            OutputRange::Bipolar => value.clamp(-1.0, 1.0),
            OutputRange::Unit => value.clamp(0.0, 1.0),
        }
    }
}

/// A borrowed view over a completed activation's output nodes, with the
/// range they're expected to fall in attached so a caller can clamp or
/// interpret them without re-deriving it.
///
/// `range` is `None` for an engine constructed without `boundedOutput`
/// (section 4.4): reads then pass the raw activation straight through,
/// matching the spec's framing of bounding as an optional wrapper rather
/// than an always-on clamp.
#[derive(Debug, Clone, Copy)]
pub struct OutputView<'a> {
    pub values: &'a [f32],
    pub range: Option<OutputRange>,
}

impl<'a> OutputView<'a> {
    pub fn get(&self, index: usize) -> f32 {
        match self.range {
            Some(range) => range.clamp(self.values[index]),
            None => self.values[index],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Materializes every entry through [`OutputView::get`], i.e. clamped
    /// if `range` is set.
    pub fn to_vec(&self) -> Vec<f32> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

/// Object-safe evaluation surface shared by both engine variants.
///
/// `dispose` is deliberately not part of this trait: it consumes `self`,
/// which isn't a legal signature on a trait object. Pool-backed disposal is
/// only reachable through the concrete [`Phenome`] enum.
pub trait BlackBox {
    fn activate(&mut self, inputs: &[f32]) -> Vec<f32>;
    fn input_count(&self) -> usize;
    fn output_count(&self) -> usize;
    fn reset_state(&mut self);
}

impl BlackBox for CyclicActivation {
    /// One relaxation step per call, matching how a recurrent NEAT network
    /// is conventionally driven: once per external timestep, with
    /// recurrent connections (not a multi-iteration settle) carrying state
    /// across calls. Code that wants a configurable per-call iteration
    /// count instead of this trait's fixed single step should hold a
    /// [`Phenome::Cyclic`] and call its `activate` directly.
    fn activate(&mut self, inputs: &[f32]) -> Vec<f32> {
        CyclicActivation::activate(self, inputs, 1);
        self.output_view().to_vec()
    }

    fn input_count(&self) -> usize {
        self.graph().input_count()
    }

    fn output_count(&self) -> usize {
        self.graph().output_count()
    }

    fn reset_state(&mut self) {
        CyclicActivation::reset_state(self)
    }
}

impl BlackBox for AcyclicActivation {
    fn activate(&mut self, inputs: &[f32]) -> Vec<f32> {
        AcyclicActivation::activate(self, inputs)
    }

    fn input_count(&self) -> usize {
        self.graph().input_count()
    }

    fn output_count(&self) -> usize {
        self.graph().output_count()
    }

    fn reset_state(&mut self) {
        // An acyclic engine has no carried state across calls: every
        // `activate` recomputes every node from scratch. Nothing to clear.
    }
}

/// A compiled phenome, dispatching to whichever engine its genome compiled
/// to. Prefer matching on this directly in hot loops (section 9's
/// recommendation to avoid dynamic dispatch); use the [`BlackBox`] trait
/// only where code must stay agnostic to the variant.
pub enum Phenome {
    Cyclic {
        engine: CyclicActivation,
        iterations: usize,
    },
    Acyclic(AcyclicActivation),
}

impl Phenome {
    pub fn from_cyclic(graph: CyclicGraph, activation_fn: ActivationFn, iterations: usize) -> Self {
        Phenome::Cyclic {
            engine: CyclicActivation::new(graph, activation_fn),
            iterations,
        }
    }

    /// As [`Phenome::from_cyclic`], but with `boundedOutput` (section 4.4)
    /// engaged: output reads clamp to `range`.
    pub fn from_cyclic_bounded(
        graph: CyclicGraph,
        activation_fn: ActivationFn,
        iterations: usize,
        range: OutputRange,
    ) -> Self {
        Phenome::Cyclic {
            engine: CyclicActivation::new_bounded(graph, activation_fn, range),
            iterations,
        }
    }

    pub fn from_acyclic(graph: DagGraph, activation_fn: ActivationFn) -> Self {
        Phenome::Acyclic(AcyclicActivation::new(graph, activation_fn))
    }

    pub fn activate(&mut self, inputs: &[f32]) -> Vec<f32> {
        match self {
            Phenome::Cyclic { engine, iterations } => {
                engine.activate(inputs, *iterations);
                engine.output_view().to_vec()
            }
            Phenome::Acyclic(engine) => engine.activate(inputs),
        }
    }

    pub fn reset_state(&mut self) {
        match self {
            Phenome::Cyclic { engine, .. } => engine.reset_state(),
            Phenome::Acyclic(_) => {}
        }
    }

    pub fn input_count(&self) -> usize {
        match self {
            Phenome::Cyclic { engine, .. } => engine.graph().input_count(),
            Phenome::Acyclic(engine) => engine.graph().input_count(),
        }
    }

    pub fn output_count(&self) -> usize {
        match self {
            Phenome::Cyclic { engine, .. } => engine.graph().output_count(),
            Phenome::Acyclic(engine) => engine.graph().output_count(),
        }
    }

    /// Releases this phenome's activation buffers back to `pool`. Only the
    /// cyclic variant holds pool-eligible buffers today; the acyclic
    /// engine's arrays are consumed as part of its own struct drop.
    pub fn dispose(self, pool: &mut BufferPool) {
        if let Phenome::Cyclic { engine, .. } = self {
            engine.dispose(pool);
        }
    }
}
