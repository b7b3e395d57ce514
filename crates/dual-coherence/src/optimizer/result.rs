//! Outcome of one optimization run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::OptimizerState;
use crate::tracker::OptimizationRecord;

/// Summary returned alongside the final state pair.
///
/// Non-convergence is reported here (`converged = false`), never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Unique id of the run.
    pub run_id: Uuid,

    /// Whether the convergence rule held when the loop stopped.
    pub converged: bool,

    /// Whether the run stopped on its cancellation token.
    pub cancelled: bool,

    /// Terminal optimizer state.
    pub status: OptimizerState,

    /// Number of completed cycles.
    pub cycles_run: usize,

    /// Score of the normalized inputs.
    pub initial_score: f64,

    /// Score of the returned pair.
    pub final_score: f64,

    /// Highest score seen, including the initial one.
    pub best_score: f64,

    /// One record per completed cycle.
    pub history: Vec<OptimizationRecord>,

    /// Wall-clock duration in microseconds.
    pub elapsed_us: u64,
}

impl OptimizationResult {
    /// `final_score - initial_score`.
    pub fn improvement(&self) -> f64 {
        self.final_score - self.initial_score
    }

    /// Scores in cycle order.
    pub fn score_trace(&self) -> Vec<f64> {
        self.history.iter().map(|r| r.score).collect()
    }
}
