//! L2 normalization of real and complex matrices.

use ndarray::Array2;
use num_complex::Complex64;

use super::EPSILON;

/// Frobenius (flattened L2) norm of a complex matrix.
#[inline]
pub fn frobenius_norm(x: &Array2<Complex64>) -> f64 {
    x.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt()
}

/// Scale a complex matrix to unit L2 norm: `x / sqrt(|<x, x>| + ε)`.
///
/// A zero-norm input has no direction to preserve and is returned unchanged.
pub fn normalize_complex(x: &Array2<Complex64>) -> Array2<Complex64> {
    let norm_sq: f64 = x.iter().map(|z| z.norm_sqr()).sum();
    if norm_sq <= 0.0 || !norm_sq.is_finite() {
        tracing::warn!(
            norm_sq,
            len = x.len(),
            "Cannot normalize complex matrix, returning input unchanged"
        );
        return x.clone();
    }
    let scale = 1.0 / (norm_sq + EPSILON).sqrt();
    x.mapv(|z| z * scale)
}

/// Scale a real matrix to unit L2 norm: `x / sqrt(<x, x> + ε)`.
pub fn normalize_real(x: &Array2<f64>) -> Array2<f64> {
    let norm_sq: f64 = x.iter().map(|v| v * v).sum();
    if norm_sq <= 0.0 || !norm_sq.is_finite() {
        tracing::warn!(
            norm_sq,
            len = x.len(),
            "Cannot normalize real matrix, returning input unchanged"
        );
        return x.clone();
    }
    let scale = 1.0 / (norm_sq + EPSILON).sqrt();
    x.mapv(|v| v * scale)
}
