//! Activation engines that walk a compiled graph and produce outputs.
//!
//! `function` holds the squashing functions and the vectorized apply helper
//! shared by both engines. `cyclic` relaxes a [`crate::graph::CyclicGraph`]
//! toward a fixed point (section 4.4); `acyclic` walks a
//! [`crate::graph::DagGraph`] layer by layer in a single pass (section 4.5).
//! `blackbox` is the facade the two engines are presented through (section 6).

pub mod function;
pub mod cyclic;
pub mod acyclic;
pub mod blackbox;

pub use function::ActivationFn;
