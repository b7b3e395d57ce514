//! Coherence optimizer: state machine, cancellation and result assembly.
//!
//! Per cycle:
//!
//! 1. check the cancellation token
//! 2. compute the coupling matrix
//! 3. correct the field state, then the adaptive state
//! 4. score the new pair and record it
//! 5. stop when the convergence rule holds
//!
//! Dimension mismatches and invalid configurations are the only errors.
//! Running out of cycles is reported through
//! [`OptimizationResult::converged`].

mod cancel;
mod engine;
mod result;
mod state;


pub use self::cancel::CancellationToken;
pub use self::engine::CoherenceOptimizer;
pub use self::result::OptimizationResult;
pub use self::state::OptimizerState;

use crate::config::OptimizerConfig;
use crate::error::CoherenceResult;
use crate::state::{AdaptiveState, FieldState};

/// Final field state, final adaptive state and run summary.
pub type OptimizationOutput = (FieldState, AdaptiveState, OptimizationResult);

/// Optimize a state pair with the canonical bridge.
///
/// # Errors
///
/// - [`CoherenceError::InvalidConfiguration`](crate::error::CoherenceError::InvalidConfiguration)
///   before any cycle runs
/// - [`CoherenceError::DimensionMismatch`](crate::error::CoherenceError::DimensionMismatch)
///   on the first coupling
pub fn optimize(
    field: &FieldState,
    adaptive: &AdaptiveState,
    config: &OptimizerConfig,
) -> CoherenceResult<OptimizationOutput> {
    CoherenceOptimizer::new(config.clone())?.run(field, adaptive)
}
