//! Signature-based coupling bridge.
//!
//! Both sides are reduced to per-component signatures before coupling:
//!
//! ```text
//! u_i = mean_k amplitude[i, k]     (field signature)
//! v_j = mean_r activations[r, j]   (adaptive signature)
//! θ_i = mean_k phase[i, k]         (phase signature)
//!
//! C_ij = s · T_ij · M_ij · u_i · v_j · e^{i(θ_i - θ_j)}
//! ```
//!
//! `s` is the adaptive descriptor strength, `T` the topology mask and
//! `M_ij = 1 + jitter·U(-1, 1)` the seeded multiplicative noise.

use ndarray::{Array1, Array2, Axis};
use num_complex::Complex64;
use rand::Rng;

use super::{CouplingBridge, CouplingMatrix};
use crate::algebra::{normalize_complex, tensor_moments, wrap_phase, EPSILON};
use crate::config::CouplingConfig;
use crate::error::{CoherenceError, CoherenceResult};
use crate::state::{AdaptationRecord, AdaptiveState, FieldState};

/// The canonical [`CouplingBridge`]. Topology and jitter are configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SignatureBridge {
    config: CouplingConfig,
}

impl SignatureBridge {
    pub fn new(config: CouplingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CouplingConfig {
        &self.config
    }
}

/// Row means of a complex matrix.
fn row_means(x: &Array2<Complex64>) -> Array1<Complex64> {
    let ncols = x.ncols().max(1) as f64;
    x.sum_axis(Axis(1)).mapv(|z| z / ncols)
}

/// Row means of a real matrix; empty rows average to 0.
fn real_row_means(x: &Array2<f64>) -> Array1<f64> {
    let ncols = x.ncols().max(1) as f64;
    x.sum_axis(Axis(1)).mapv(|v| v / ncols)
}

/// Column means of a real matrix; an empty column averages to 0.
fn column_means(x: &Array2<f64>) -> Array1<f64> {
    let nrows = x.nrows().max(1) as f64;
    x.sum_axis(Axis(0)).mapv(|v| v / nrows)
}

impl CouplingBridge for SignatureBridge {
    fn compute_coupling<R: Rng>(
        &self,
        field: &FieldState,
        adaptive: &AdaptiveState,
        rng: &mut R,
    ) -> CoherenceResult<CouplingMatrix> {
        let u = row_means(field.amplitude());
        let v = column_means(adaptive.activations());
        if u.len() != v.len() {
            tracing::error!(
                field_dimension = u.len(),
                adaptive_dimension = v.len(),
                "Field and adaptive signatures cannot be coupled"
            );
            return Err(CoherenceError::DimensionMismatch {
                expected: u.len(),
                actual: v.len(),
            });
        }
        let theta = real_row_means(field.phase());

        let strength = adaptive.coupling().strength;
        let topology = self.config.topology;
        let jitter = self.config.jitter;
        let dim = u.len();

        // Row-major fill keeps the draw order fixed for a given seed
        let values = Array2::from_shape_fn((dim, dim), |(i, j)| {
            let noise = 1.0 + jitter * rng.gen_range(-1.0..=1.0);
            let rotation = Complex64::from_polar(1.0, theta[i] - theta[j]);
            u[i] * v[j] * rotation * (strength * topology.mask(i, j) * noise)
        });

        Ok(CouplingMatrix::new(values, strength))
    }

    fn correct_field(&self, field: &FieldState, coupling: &CouplingMatrix, rate: f64) -> FieldState {
        let column_sums = coupling.column_sums();
        let norm = column_sums.iter().map(|z| z.norm_sqr()).sum::<f64>().sqrt();
        if norm <= EPSILON || column_sums.len() != field.dimension() {
            tracing::debug!(norm, "Vanishing coupling, field only re-normalized");
            return field.renormalized();
        }

        let (rows, cols) = field.shape();
        let spread = (cols as f64).sqrt();
        let target = Array2::from_shape_fn((rows, cols), |(i, _)| column_sums[i] / (norm * spread));

        let alpha = (rate * coupling.strength() * coupling.len() as f64).min(1.0);
        let amplitude = field.amplitude();
        let stepped = amplitude + &((&target - amplitude).mapv(|z| z * alpha));
        let next_amplitude = normalize_complex(&stepped);

        let theta = real_row_means(field.phase());
        let mut next_phase = field.phase().clone();
        for (j, mut row) in next_phase.axis_iter_mut(Axis(0)).enumerate() {
            let step = rate * wrap_phase(column_sums[j].arg() - theta[j]);
            row.mapv_inplace(|p| p + step);
        }

        let finite = next_amplitude.iter().all(|z| z.re.is_finite() && z.im.is_finite())
            && next_phase.iter().all(|p| p.is_finite());
        if !finite {
            tracing::warn!(rate, alpha, "Non-finite field correction discarded");
            return field.clone();
        }

        FieldState::from_normalized(next_amplitude, next_phase)
    }

    fn correct_adaptive(
        &self,
        adaptive: &AdaptiveState,
        coupling: &CouplingMatrix,
        rate: f64,
        cycle: usize,
    ) -> AdaptiveState {
        let beta = (rate * coupling.frobenius_norm()).min(1.0);

        let mut weights = Vec::with_capacity(adaptive.weights().len());
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut count = 0usize;

        for (index, tensor) in adaptive.weights().iter().enumerate() {
            let (mean, _) = tensor_moments(tensor);
            let correction = tensor.mapv(|w| beta * (mean - w));
            let next = tensor + &correction;
            if next.iter().all(|w| w.is_finite()) {
                for c in correction.iter() {
                    sum += c;
                    sum_sq += c * c;
                }
                count += correction.len();
                weights.push(next);
            } else {
                tracing::warn!(index, cycle, beta, "Non-finite weight correction, tensor kept");
                weights.push(tensor.clone());
            }
        }

        let (mean, variance) = if count == 0 {
            (0.0, 0.0)
        } else {
            let mean = sum / count as f64;
            (mean, (sum_sq / count as f64 - mean * mean).max(0.0))
        };

        adaptive.corrected(
            weights,
            AdaptationRecord {
                cycle,
                mean,
                variance,
            },
        )
    }
}
