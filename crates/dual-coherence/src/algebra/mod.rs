//! State algebra: normalization and the bounded scalar metrics.
//!
//! Every function here is total. Degenerate inputs (zero norm, empty
//! matrices, non-finite entries) produce a defined fallback value and, where
//! the caller would otherwise lose information silently, a `tracing::warn!`.
//!
//! # Metrics
//!
//! ```text
//! coherence(x)    = Σ_{i≠j} |x_i|·|x_j| / ((N-1)·Σ|x_i|²)   in [0, 1-ε]
//! stability(W)    = 1 / (1 + mean_k std(W_k))                 in (0, 1]
//! cross(a, b)     = 1 - |mean(a) - mean(b)|                   in [0, 1]
//! entanglement    = S(ρ_reduced) / log2 2                     in [0, 1]
//! ```

mod metrics;
mod normalize;


pub use self::metrics::{
    bounded_coherence, cross_coherence, entanglement, stability, tensor_moments, tensor_spread,
};
pub use self::normalize::{frobenius_norm, normalize_complex, normalize_real};

use std::f64::consts::PI;

/// Numerical floor used by normalization and the coherence upper bound.
pub const EPSILON: f64 = 1e-10;

/// Wrap an angle into `(-π, π]`.
///
/// Non-finite angles wrap to 0.
///
/// # Example
///
/// ```
/// use dual_coherence::algebra::wrap_phase;
/// use std::f64::consts::PI;
///
/// assert!((wrap_phase(2.5 * PI) - 0.5 * PI).abs() < 1e-12);
/// assert_eq!(wrap_phase(-PI), PI);
/// assert!((wrap_phase(0.5) - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn wrap_phase(theta: f64) -> f64 {
    if !theta.is_finite() {
        return 0.0;
    }
    let wrapped = (theta + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}
