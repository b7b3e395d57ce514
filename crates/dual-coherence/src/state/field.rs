//! Field state: a normalized complex amplitude with its phase map.

use ndarray::Array2;
use num_complex::Complex64;

use crate::algebra::{bounded_coherence, frobenius_norm, normalize_complex};
use crate::error::{CoherenceError, CoherenceResult};

/// Field-side representation.
///
/// The amplitude is either a `D×1` vector or a `D×D` matrix; the field
/// dimension `D` is its row count. The amplitude always has unit L2 norm
/// (within [`EPSILON`](crate::algebra::EPSILON)) and `coherence` is derived
/// from it, so both are only reachable through accessors.
///
/// # Example
///
/// ```
/// use dual_coherence::state::FieldState;
///
/// let field = FieldState::from_real(&[3.0, 4.0]).unwrap();
/// assert_eq!(field.dimension(), 2);
/// assert!((field.norm() - 1.0).abs() < 1e-9);
/// assert!(field.coherence() > 0.0 && field.coherence() < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    amplitude: Array2<Complex64>,
    phase: Array2<f64>,
    coherence: f64,
}

impl FieldState {
    /// Build a field state from an amplitude and a phase map of the same shape.
    ///
    /// The amplitude is normalized and the coherence computed.
    ///
    /// # Errors
    ///
    /// [`CoherenceError::InvalidState`] when the amplitude is empty, the
    /// shapes differ, or any entry is non-finite.
    pub fn new(amplitude: Array2<Complex64>, phase: Array2<f64>) -> CoherenceResult<Self> {
        if amplitude.is_empty() {
            return Err(CoherenceError::InvalidState(
                "field amplitude must not be empty".to_string(),
            ));
        }
        if amplitude.shape() != phase.shape() {
            return Err(CoherenceError::InvalidState(format!(
                "phase shape {:?} does not match amplitude shape {:?}",
                phase.shape(),
                amplitude.shape()
            )));
        }
        if amplitude.iter().any(|z| !z.re.is_finite() || !z.im.is_finite()) {
            return Err(CoherenceError::non_finite("field amplitude"));
        }
        if phase.iter().any(|p| !p.is_finite()) {
            return Err(CoherenceError::non_finite("field phase"));
        }

        Ok(Self::from_normalized(normalize_complex(&amplitude), phase))
    }

    /// Build a `D×1` field state from complex amplitudes with zero phase.
    pub fn from_amplitudes(values: Vec<Complex64>) -> CoherenceResult<Self> {
        let dim = values.len();
        let amplitude = Array2::from_shape_vec((dim, 1), values)
            .map_err(|e| CoherenceError::InvalidState(e.to_string()))?;
        Self::new(amplitude, Array2::zeros((dim, 1)))
    }

    /// Build a `D×1` field state from real amplitudes with zero phase.
    pub fn from_real(values: &[f64]) -> CoherenceResult<Self> {
        Self::from_amplitudes(values.iter().map(|&v| Complex64::new(v, 0.0)).collect())
    }

    /// Assemble a state from an already normalized amplitude.
    pub(crate) fn from_normalized(amplitude: Array2<Complex64>, phase: Array2<f64>) -> Self {
        let coherence = bounded_coherence(&amplitude);
        Self {
            amplitude,
            phase,
            coherence,
        }
    }

    /// Return a copy with the amplitude passed through one normalization.
    pub fn renormalized(&self) -> Self {
        Self::from_normalized(normalize_complex(&self.amplitude), self.phase.clone())
    }

    /// Complex amplitude (unit L2 norm).
    #[inline]
    pub fn amplitude(&self) -> &Array2<Complex64> {
        &self.amplitude
    }

    /// Phase map, same shape as the amplitude.
    #[inline]
    pub fn phase(&self) -> &Array2<f64> {
        &self.phase
    }

    /// Bounded coherence of the amplitude, in `[0, 1 - ε]`.
    #[inline]
    pub fn coherence(&self) -> f64 {
        self.coherence
    }

    /// Field dimension `D` (amplitude rows).
    #[inline]
    pub fn dimension(&self) -> usize {
        self.amplitude.nrows()
    }

    /// Amplitude shape `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.amplitude.dim()
    }

    /// L2 norm of the amplitude.
    pub fn norm(&self) -> f64 {
        frobenius_norm(&self.amplitude)
    }

    /// Consume the state, returning amplitude and phase.
    pub fn into_parts(self) -> (Array2<Complex64>, Array2<f64>) {
        (self.amplitude, self.phase)
    }
}
