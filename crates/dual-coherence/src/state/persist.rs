//! JSON encoding of a field/adaptive pair for external persistence adapters.
//!
//! ```json
//! {
//!   "amplitude": { "real": [[..]], "imag": [[..]] },
//!   "phase": [[..]],
//!   "weights": [[[..]]],
//!   "activations": [[..]],
//!   "coupling_strength": 0.85
//! }
//! ```
//!
//! `activations` and `coupling_strength` are optional. A document without
//! activations restores a single uniform unit row over the field dimension.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::adaptive::{AdaptiveState, CouplingDescriptor};
use super::field::FieldState;
use crate::error::{CoherenceError, CoherenceResult};

/// Real and imaginary parts of a complex matrix, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexRows {
    pub real: Vec<Vec<f64>>,
    pub imag: Vec<Vec<f64>>,
}

/// Serializable snapshot of a state pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub amplitude: ComplexRows,
    pub phase: Vec<Vec<f64>>,
    pub weights: Vec<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activations: Option<Vec<Vec<f64>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_strength: Option<f64>,
}

impl PersistedState {
    /// Snapshot a field/adaptive pair.
    pub fn capture(field: &FieldState, adaptive: &AdaptiveState) -> Self {
        let amplitude = field.amplitude();
        Self {
            amplitude: ComplexRows {
                real: to_rows(&amplitude.mapv(|z| z.re)),
                imag: to_rows(&amplitude.mapv(|z| z.im)),
            },
            phase: to_rows(field.phase()),
            weights: adaptive.weights().iter().map(to_rows).collect(),
            activations: Some(to_rows(adaptive.activations())),
            coupling_strength: Some(adaptive.coupling().strength),
        }
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> CoherenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> CoherenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild the state pair, validating shapes and entries.
    ///
    /// Named coupling matrices and the adaptation log are not part of the
    /// encoding; the restored adaptive state starts with an empty log.
    pub fn restore(&self) -> CoherenceResult<(FieldState, AdaptiveState)> {
        let real = from_rows(&self.amplitude.real, "amplitude.real")?;
        let imag = from_rows(&self.amplitude.imag, "amplitude.imag")?;
        if real.dim() != imag.dim() {
            return Err(CoherenceError::InvalidState(format!(
                "amplitude.imag shape {:?} does not match amplitude.real shape {:?}",
                imag.dim(),
                real.dim()
            )));
        }
        let amplitude = Array2::from_shape_fn(real.dim(), |idx| Complex64::new(real[idx], imag[idx]));
        let phase = from_rows(&self.phase, "phase")?;
        let field = FieldState::new(amplitude, phase)?;

        let activations = match &self.activations {
            Some(rows) => from_rows(rows, "activations")?,
            None => {
                let dim = field.dimension();
                Array2::from_elem((1, dim), 1.0 / (dim as f64).sqrt())
            }
        };
        let weights = self
            .weights
            .iter()
            .enumerate()
            .map(|(index, rows)| from_rows(rows, &format!("weights[{}]", index)))
            .collect::<CoherenceResult<Vec<_>>>()?;

        let mut adaptive = AdaptiveState::new(activations, weights)?;
        if let Some(strength) = self.coupling_strength {
            adaptive = adaptive.with_coupling(CouplingDescriptor::new(strength))?;
        }

        Ok((field, adaptive))
    }
}

fn to_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.rows().into_iter().map(|row| row.to_vec()).collect()
}

fn from_rows(rows: &[Vec<f64>], what: &str) -> CoherenceResult<Array2<f64>> {
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|row| row.len() != ncols) {
        return Err(CoherenceError::InvalidState(format!(
            "{} has rows of unequal length",
            what
        )));
    }
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    Array2::from_shape_vec((rows.len(), ncols), flat)
        .map_err(|e| CoherenceError::InvalidState(format!("{}: {}", what, e)))
}
