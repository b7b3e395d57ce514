//! Optimizer run states and legal transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Run state of a [`CoherenceOptimizer`](super::CoherenceOptimizer).
///
/// ```text
/// Idle -> Running -> { Converged | Exhausted | Cancelled | Failed }
/// ```
///
/// Terminal states only leave through [`OptimizerState::Idle`] when a new run
/// starts.
///
/// # Example
///
/// ```
/// use dual_coherence::optimizer::OptimizerState;
///
/// assert!(OptimizerState::Idle.can_transition_to(OptimizerState::Running));
/// assert!(OptimizerState::Running.can_transition_to(OptimizerState::Converged));
/// assert!(!OptimizerState::Converged.can_transition_to(OptimizerState::Running));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerState {
    /// No run in progress.
    #[default]
    Idle,
    /// Correction cycles in progress.
    Running,
    /// Stopped because the convergence rule held.
    Converged,
    /// Stopped because the cycle budget ran out.
    Exhausted,
    /// Stopped by the cancellation token.
    Cancelled,
    /// Stopped by a hard error.
    Failed,
}

impl OptimizerState {
    /// Whether the state ends a run.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OptimizerState::Idle | OptimizerState::Running)
    }

    /// Check if transition to another state is valid.
    pub fn can_transition_to(&self, target: OptimizerState) -> bool {
        match (self, target) {
            (OptimizerState::Idle, OptimizerState::Running) => true,
            (OptimizerState::Running, next) => next.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for OptimizerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptimizerState::Idle => "idle",
            OptimizerState::Running => "running",
            OptimizerState::Converged => "converged",
            OptimizerState::Exhausted => "exhausted",
            OptimizerState::Cancelled => "cancelled",
            OptimizerState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
