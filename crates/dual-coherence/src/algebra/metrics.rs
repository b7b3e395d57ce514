//! Bounded scalar metrics over field and adaptive representations.

use ndarray::{Array2, Axis};
use num_complex::Complex64;

use super::EPSILON;

/// Bounded off-diagonal coherence of the density matrix `ρ = x·x†`.
///
/// Computed over the flattened amplitude of length `N`, after rescaling `ρ`
/// to a mean diagonal of 1:
///
/// ```text
/// C(x) = Σ_{i≠j} |ρ_ij| / ((N-1)·tr ρ)
///      = ((Σ|x_i|)² - Σ|x_i|²) / ((N-1)·Σ|x_i|²)
/// ```
///
/// The value is scale invariant and clipped into `[0, 1 - ε]`. Inputs with
/// fewer than two entries, zero trace or non-finite entries have coherence 0.
///
/// The denominator is `(N-1)·tr ρ`, not the plain pair count `N·(N-1)`.
/// Under the plain count a unit-norm amplitude never exceeds about `1/N`, so
/// a uniform vector would not reach thresholds such as 0.9.
///
/// # Example
///
/// ```
/// use dual_coherence::algebra::bounded_coherence;
/// use ndarray::{Array2, Axis};
/// use num_complex::Complex64;
///
/// let basis = Array2::from_shape_vec(
///     (3, 1),
///     vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
/// )
/// .unwrap();
/// assert_eq!(bounded_coherence(&basis), 0.0);
///
/// let uniform = Array2::from_elem((4, 1), Complex64::new(0.5, 0.0));
/// assert!(bounded_coherence(&uniform) > 0.999);
/// ```
pub fn bounded_coherence(x: &Array2<Complex64>) -> f64 {
    let n = x.len();
    if n < 2 {
        return 0.0;
    }

    let mut sum_abs = 0.0;
    let mut trace = 0.0;
    for z in x.iter() {
        let magnitude = z.norm();
        sum_abs += magnitude;
        trace += magnitude * magnitude;
    }

    if !sum_abs.is_finite() || !trace.is_finite() || trace <= 0.0 {
        return 0.0;
    }

    let off_diagonal = sum_abs * sum_abs - trace;
    let value = off_diagonal / ((n - 1) as f64 * trace);
    if value.is_finite() {
        value.clamp(0.0, 1.0 - EPSILON)
    } else {
        0.0
    }
}

/// Mean and population variance of a tensor's entries.
///
/// Empty tensors have no variation: `(0.0, 0.0)`. The variance overflows to
/// infinity for entries beyond about `1e154`; use [`tensor_spread`] where a
/// finite value is required.
pub fn tensor_moments(tensor: &Array2<f64>) -> (f64, f64) {
    let Some(mean) = tensor.mean() else {
        return (0.0, 0.0);
    };
    let variance = tensor.iter().map(|w| (w - mean).powi(2)).sum::<f64>() / tensor.len() as f64;
    (mean, variance)
}

/// Population standard deviation of a tensor's entries.
///
/// Entries are divided by the largest magnitude before squaring, so any
/// finite tensor has a finite spread. Empty tensors have spread 0.
pub fn tensor_spread(tensor: &Array2<f64>) -> f64 {
    if tensor.is_empty() {
        return 0.0;
    }
    let scale = tensor.iter().fold(0.0_f64, |acc, w| acc.max(w.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    if !scale.is_finite() {
        return f64::INFINITY;
    }

    let n = tensor.len() as f64;
    let mean = tensor.iter().map(|w| w / scale).sum::<f64>() / n;
    let variance = tensor
        .iter()
        .map(|w| (w / scale - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt() * scale
}

/// Weight stability `1 / (1 + mean(std(W_k)))` with population std.
///
/// Lies in `(0, 1]`; an empty list yields 1.0. Non-finite spread maps to the
/// smallest positive value.
pub fn stability(weights: &[Array2<f64>]) -> f64 {
    if weights.is_empty() {
        return 1.0;
    }
    let count = weights.len() as f64;
    let mean_std = weights
        .iter()
        .map(|tensor| tensor_spread(tensor) / count)
        .sum::<f64>();

    if !mean_std.is_finite() {
        tracing::warn!(mean_std, "Non-finite weight spread, stability floored");
        return f64::MIN_POSITIVE;
    }
    (1.0 / (1.0 + mean_std)).max(f64::MIN_POSITIVE)
}

/// Cross coherence `1 - |mean(amplitude) - mean(activations)|`, clipped to `[0, 1]`.
///
/// The distance is the complex modulus. An empty matrix contributes a mean of 0.
pub fn cross_coherence(amplitude: &Array2<Complex64>, activations: &Array2<f64>) -> f64 {
    let field_mean = if amplitude.is_empty() {
        Complex64::new(0.0, 0.0)
    } else {
        amplitude.sum() / amplitude.len() as f64
    };
    let adaptive_mean = activations.mean().unwrap_or(0.0);
    let distance = (field_mean - Complex64::new(adaptive_mean, 0.0)).norm();
    if distance.is_finite() {
        (1.0 - distance).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Number of subsystems in the composite state behind [`entanglement`].
const REDUCED_DIMENSION: f64 = 2.0;

/// Entanglement between the field and adaptive signatures.
///
/// The field signature `u` (row means of the amplitude) and the adaptive
/// signature `v` (column means of the activations) form the two rows of a
/// composite state. Tracing out the feature index leaves the reduced density
/// matrix
///
/// ```text
/// ρ = [[⟨u,u⟩, ⟨u,v⟩], [⟨v,u⟩, ⟨v,v⟩]] / (⟨u,u⟩ + ⟨v,v⟩)
/// ```
///
/// The result is the von Neumann entropy `-Σ λ·log2 λ` of `ρ` divided by
/// `log2` of its dimension, clipped to `[0, 1]`. Parallel signatures give 0
/// and orthogonal signatures of equal norm give 1. Signatures of different
/// length overlap on their common prefix. Empty or non-finite inputs give 0.
///
/// Reported alongside the score; it is not one of the score components.
///
/// # Example
///
/// ```
/// use dual_coherence::algebra::entanglement;
/// use ndarray::array;
/// use num_complex::Complex64;
///
/// let field = array![[Complex64::new(1.0, 0.0)], [Complex64::new(0.0, 0.0)]];
/// assert!(entanglement(&field, &array![[1.0, 0.0]]) < 1e-9);
/// assert!((entanglement(&field, &array![[0.0, 1.0]]) - 1.0).abs() < 1e-9);
/// ```
pub fn entanglement(amplitude: &Array2<Complex64>, activations: &Array2<f64>) -> f64 {
    if amplitude.is_empty() {
        return 0.0;
    }
    let Some(adaptive_signature) = activations.mean_axis(Axis(0)) else {
        return 0.0;
    };
    let field_signature: Vec<Complex64> = amplitude
        .rows()
        .into_iter()
        .map(|row| row.sum() / row.len() as f64)
        .collect();

    let uu: f64 = field_signature.iter().map(|u| u.norm_sqr()).sum();
    let vv: f64 = adaptive_signature.iter().map(|v| v * v).sum();
    let uv: Complex64 = field_signature
        .iter()
        .zip(adaptive_signature.iter())
        .map(|(u, v)| u * *v)
        .sum();

    let trace = uu + vv;
    if !trace.is_finite() || trace <= 0.0 {
        return 0.0;
    }

    let (a, d, b) = (uu / trace, vv / trace, uv.norm() / trace);
    let gap = ((a - d).powi(2) + 4.0 * b * b).sqrt().min(1.0);
    let entropy: f64 = [0.5 * (1.0 + gap), 0.5 * (1.0 - gap)]
        .iter()
        .filter(|&&lambda| lambda > EPSILON)
        .map(|&lambda| -lambda * lambda.log2())
        .sum();

    let value = entropy / REDUCED_DIMENSION.log2();
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
