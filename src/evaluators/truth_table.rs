//! Truth-table evaluator — spec.md section 4.7.
//!
//! Drives a phenome across a fixed, bipolar-encoded truth table (XOR, a
//! multiplexer, or any other boolean function) and scores it with a
//! continuous reward rather than requiring an exact match, plus an
//! all-correct-signs bonus — a network can be fit enough to select on long
//! before its outputs are numerically exact.

use crate::activation::blackbox::BlackBox;

/// One row of data inputs (bias is prepended automatically) and the
/// expected output sign (`+1.0` or `-1.0`) per output node.
#[derive(Debug, Clone, PartialEq)]
pub struct TruthTableRow {
    pub inputs: Vec<f32>,
    pub expected_sign: Vec<f32>,
}

impl TruthTableRow {
    pub fn new(inputs: Vec<f32>, expected_sign: Vec<f32>) -> Self {
        Self { inputs, expected_sign }
    }
}

/// Bonus added to the total reward when every output across every row has
/// the expected sign — the "this phenome actually solves the task" signal,
/// as distinct from merely scoring well on the continuous reward.
const ALL_CORRECT_BONUS: f32 = 10.0;

pub struct TruthTableEvaluator {
    rows: Vec<TruthTableRow>,
}

impl TruthTableEvaluator {
    pub fn new(rows: Vec<TruthTableRow>) -> Self {
        Self { rows }
    }

    /// Standard two-input XOR table in bipolar encoding: `-1` is false,
    /// `+1` is true.
    pub fn xor() -> Self {
        Self::new(vec![
            TruthTableRow::new(vec![-1.0, -1.0], vec![-1.0]),
            TruthTableRow::new(vec![-1.0, 1.0], vec![1.0]),
            TruthTableRow::new(vec![1.0, -1.0], vec![1.0]),
            TruthTableRow::new(vec![1.0, 1.0], vec![-1.0]),
        ])
    }

    /// A 2-to-1 multiplexer in bipolar encoding: the first input selects
    /// which of the remaining two data inputs is routed to the output.
    pub fn multiplexer_2to1() -> Self {
        Self::new(vec![
            TruthTableRow::new(vec![-1.0, -1.0, -1.0], vec![-1.0]),
            TruthTableRow::new(vec![-1.0, -1.0, 1.0], vec![-1.0]),
            TruthTableRow::new(vec![-1.0, 1.0, -1.0], vec![1.0]),
            TruthTableRow::new(vec![-1.0, 1.0, 1.0], vec![1.0]),
            TruthTableRow::new(vec![1.0, -1.0, -1.0], vec![-1.0]),
            TruthTableRow::new(vec![1.0, 1.0, -1.0], vec![1.0]),
            TruthTableRow::new(vec![1.0, -1.0, 1.0], vec![-1.0]),
            TruthTableRow::new(vec![1.0, 1.0, 1.0], vec![1.0]),
        ])
    }

    /// Writes `[1.0 (bias), ...row.inputs]` as the input vector for each
    /// row (resetting the phenome's state first, since rows are
    /// independent trials, not a continuation of one another), accumulates
    /// `0.75 + 0.5*z - 0.25*z^2` per output (where `z = actual *
    /// expected_sign`, so the reward is maximal when `actual` agrees in
    /// sign and magnitude with what was expected), and adds
    /// [`ALL_CORRECT_BONUS`] once if every output in every row landed on
    /// the expected sign.
    pub fn evaluate(&self, phenome: &mut dyn BlackBox) -> f32 {
        let mut total = 0.0f32;
        let mut all_correct = true;

        for row in &self.rows {
            debug_assert_eq!(row.inputs.len() + 1, phenome.input_count());

            phenome.reset_state();
            let mut inputs = Vec::with_capacity(row.inputs.len() + 1);
            inputs.push(1.0);
            inputs.extend_from_slice(&row.inputs);
            let outputs = phenome.activate(&inputs);

            for (&actual, &expected_sign) in outputs.iter().zip(&row.expected_sign) {
                let z = actual * expected_sign;
                total += 0.75 + 0.5 * z - 0.25 * z * z;
                if actual.signum() != expected_sign.signum() {
                    all_correct = false;
                }
            }
        }

        if all_correct {
            total += ALL_CORRECT_BONUS;
        }
        total
    }

    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }
}
