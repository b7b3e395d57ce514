//! Adaptive state: activations, weight tensors and the coupling descriptor.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::algebra::{stability, tensor_moments, tensor_spread};
use crate::error::{CoherenceError, CoherenceResult};

/// Default coupling strength of a new adaptive state.
pub const DEFAULT_COUPLING_STRENGTH: f64 = 0.85;

/// Name under which a retained coupling magnitude is stored.
pub const FIELD_TO_ADAPTIVE: &str = "field_to_adaptive";

/// Coupling strength plus named auxiliary matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct CouplingDescriptor {
    /// Scalar multiplier applied to every coupling entry.
    pub strength: f64,

    /// Named matrices carried alongside the state.
    pub matrices: BTreeMap<String, Array2<f64>>,
}

impl Default for CouplingDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_COUPLING_STRENGTH)
    }
}

impl CouplingDescriptor {
    /// Create a descriptor with the given strength and no matrices.
    pub fn new(strength: f64) -> Self {
        Self {
            strength,
            matrices: BTreeMap::new(),
        }
    }

    /// Look up a named matrix.
    pub fn matrix(&self, name: &str) -> Option<&Array2<f64>> {
        self.matrices.get(name)
    }
}

/// One entry of the adaptation log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptationRecord {
    /// Cycle that applied the correction (1-based).
    pub cycle: usize,
    /// Mean of the applied correction entries.
    pub mean: f64,
    /// Population variance of the applied correction entries.
    pub variance: f64,
}

/// Per-tensor weight statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensorSummary {
    /// Position of the tensor in the weight list.
    pub index: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

/// Adaptive-side representation.
///
/// Rows of `activations` are samples and columns are features; the
/// activation dimension is the column count. Weight tensors keep their
/// order. The adaptation log only grows.
///
/// # Example
///
/// ```
/// use dual_coherence::state::AdaptiveState;
/// use ndarray::array;
///
/// let adaptive = AdaptiveState::new(array![[0.5, 0.5, 0.5]], vec![array![[1.0]]]).unwrap();
/// assert_eq!(adaptive.activation_dimension(), 3);
/// assert_eq!(adaptive.coupling().strength, 0.85);
/// assert!(adaptive.adaptation_log().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveState {
    activations: Array2<f64>,
    weights: Vec<Array2<f64>>,
    coupling: CouplingDescriptor,
    log: Vec<AdaptationRecord>,
}

impl AdaptiveState {
    /// Build an adaptive state with the default coupling descriptor.
    ///
    /// # Errors
    ///
    /// [`CoherenceError::InvalidState`] when the activations have no columns
    /// or any activation or weight entry is non-finite.
    pub fn new(activations: Array2<f64>, weights: Vec<Array2<f64>>) -> CoherenceResult<Self> {
        if activations.ncols() == 0 {
            return Err(CoherenceError::InvalidState(
                "activations must have at least one feature column".to_string(),
            ));
        }
        if activations.iter().any(|a| !a.is_finite()) {
            return Err(CoherenceError::non_finite("activations"));
        }
        for (index, tensor) in weights.iter().enumerate() {
            if tensor.iter().any(|w| !w.is_finite()) {
                return Err(CoherenceError::non_finite(format!("weight tensor {}", index)));
            }
        }

        Ok(Self {
            activations,
            weights,
            coupling: CouplingDescriptor::default(),
            log: Vec::new(),
        })
    }

    /// Replace the coupling descriptor.
    ///
    /// # Errors
    ///
    /// [`CoherenceError::InvalidState`] when the strength is negative or non-finite.
    pub fn with_coupling(mut self, coupling: CouplingDescriptor) -> CoherenceResult<Self> {
        if !coupling.strength.is_finite() || coupling.strength < 0.0 {
            return Err(CoherenceError::InvalidState(format!(
                "coupling strength must be finite and >= 0, got {}",
                coupling.strength
            )));
        }
        self.coupling = coupling;
        Ok(self)
    }

    /// Replace only the coupling strength.
    pub fn with_coupling_strength(self, strength: f64) -> CoherenceResult<Self> {
        let matrices = self.coupling.matrices.clone();
        self.with_coupling(CouplingDescriptor { strength, matrices })
    }

    /// Successor state with corrected weights and one more log entry.
    pub(crate) fn corrected(&self, weights: Vec<Array2<f64>>, record: AdaptationRecord) -> Self {
        let mut log = self.log.clone();
        log.push(record);
        Self {
            activations: self.activations.clone(),
            weights,
            coupling: self.coupling.clone(),
            log,
        }
    }

    /// Store a named matrix in the coupling descriptor.
    pub(crate) fn retain_matrix(&mut self, name: &str, matrix: Array2<f64>) {
        self.coupling.matrices.insert(name.to_string(), matrix);
    }

    #[inline]
    pub fn activations(&self) -> &Array2<f64> {
        &self.activations
    }

    #[inline]
    pub fn weights(&self) -> &[Array2<f64>] {
        &self.weights
    }

    #[inline]
    pub fn coupling(&self) -> &CouplingDescriptor {
        &self.coupling
    }

    /// Adaptation log, oldest first.
    #[inline]
    pub fn adaptation_log(&self) -> &[AdaptationRecord] {
        &self.log
    }

    /// Activation dimension (feature columns).
    #[inline]
    pub fn activation_dimension(&self) -> usize {
        self.activations.ncols()
    }

    /// Weight stability of this state.
    pub fn stability(&self) -> f64 {
        stability(&self.weights)
    }

    /// Per-tensor mean and standard deviation of the weights.
    pub fn weight_summary(&self) -> Vec<TensorSummary> {
        self.weights
            .iter()
            .enumerate()
            .map(|(index, tensor)| {
                let (mean, _) = tensor_moments(tensor);
                TensorSummary {
                    index,
                    mean,
                    std: tensor_spread(tensor),
                }
            })
            .collect()
    }
}
