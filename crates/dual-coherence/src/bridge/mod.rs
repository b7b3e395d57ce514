//! Coupling between the field and adaptive representations.
//!
//! A [`CouplingBridge`] computes the per-cycle [`CouplingMatrix`] and derives
//! the correction applied to each side. [`SignatureBridge`] is the single
//! implementation; topology and jitter variants are selected through
//! [`CouplingConfig`](crate::config::CouplingConfig).
//!
//! Every correction is a bounded convex step toward a target, so a rate of 0
//! leaves amplitude, phase and weights untouched.

mod matrix;
mod signature;


pub use self::matrix::CouplingMatrix;
pub use self::signature::SignatureBridge;

use rand::Rng;

use crate::error::CoherenceResult;
use crate::state::{AdaptiveState, FieldState};

/// Coupling computation and per-side correction.
pub trait CouplingBridge {
    /// Compute the coupling matrix for the current pair.
    ///
    /// # Errors
    ///
    /// [`CoherenceError::DimensionMismatch`](crate::error::CoherenceError::DimensionMismatch)
    /// when the field dimension differs from the activation dimension.
    fn compute_coupling<R: Rng>(
        &self,
        field: &FieldState,
        adaptive: &AdaptiveState,
        rng: &mut R,
    ) -> CoherenceResult<CouplingMatrix>;

    /// Successor field state after one correction step.
    fn correct_field(&self, field: &FieldState, coupling: &CouplingMatrix, rate: f64) -> FieldState;

    /// Successor adaptive state after one correction step; appends one
    /// [`AdaptationRecord`](crate::state::AdaptationRecord) for `cycle`.
    fn correct_adaptive(
        &self,
        adaptive: &AdaptiveState,
        coupling: &CouplingMatrix,
        rate: f64,
        cycle: usize,
    ) -> AdaptiveState;
}
