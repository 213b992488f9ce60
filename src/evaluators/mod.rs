//! Fitness evaluators — spec.md section 9.
//!
//! Each evaluator drives a [`crate::Phenome`] through a fixed protocol
//! (a pole-balance simulation, a truth table) and reduces the result to a
//! single scalar fitness. Evaluators never reach inside the phenome's
//! engine; they only call the [`crate::BlackBox`] surface.

pub mod pole_balance;
pub mod truth_table;

pub use pole_balance::{PoleBalanceConfig, PoleBalanceEvaluator};
pub use truth_table::TruthTableEvaluator;
