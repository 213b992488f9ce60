//! Compiles NEAT-style genome connection lists into dense runtime graphs
//! and evaluates them, as either a cyclic (relaxation-based) or acyclic
//! (single-pass, layer-ordered) network behind one [`Phenome`] facade.

pub mod errors;
pub mod graph;
pub mod activation;
pub mod evaluators;

pub use errors::{PhenomeError, PhenomeResult};
pub use graph::acyclic::{DagGraph, LayerBounds};
pub use graph::buffer_pool::BufferPool;
pub use graph::connection::WeightedConnection;
pub use graph::cyclic::CyclicGraph;
pub use graph::depth::{self, DepthInfo};
pub use activation::acyclic::AcyclicActivation;
pub use activation::blackbox::{BlackBox, OutputRange, OutputView, Phenome};
pub use activation::cyclic::CyclicActivation;
pub use activation::function::{apply_in_place, bipolar_tanh, sigmoid_steep, ActivationFn};
pub use evaluators::{PoleBalanceConfig, PoleBalanceEvaluator, TruthTableEvaluator};
