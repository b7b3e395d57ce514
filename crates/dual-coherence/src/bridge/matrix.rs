//! Per-cycle coupling matrix.

use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;

use crate::algebra::frobenius_norm;

/// Complex coupling of shape `D × D_a` plus the descriptor strength it was
/// computed with. Recomputed every cycle and never persisted implicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingMatrix {
    values: Array2<Complex64>,
    strength: f64,
}

impl CouplingMatrix {
    pub fn new(values: Array2<Complex64>, strength: f64) -> Self {
        Self { values, strength }
    }

    #[inline]
    pub fn values(&self) -> &Array2<Complex64> {
        &self.values
    }

    /// Descriptor strength `s` used to build the entries.
    #[inline]
    pub fn strength(&self) -> f64 {
        self.strength
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn frobenius_norm(&self) -> f64 {
        frobenius_norm(&self.values)
    }

    /// Column sums `Σ_i C_ij`, one per adaptive component.
    pub fn column_sums(&self) -> Array1<Complex64> {
        self.values.sum_axis(Axis(0))
    }

    /// Entry-wise modulus.
    pub fn magnitude(&self) -> Array2<f64> {
        self.values.mapv(|z| z.norm())
    }
}
