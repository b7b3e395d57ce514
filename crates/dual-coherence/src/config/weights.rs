//! Score weighting for the combined coherence score.
//!
//! The combined score is `field·coherence + adaptive·stability + cross·cross_coherence`.
//! The canonical split is 0.4/0.3/0.3; any other split is policy, not correctness.

use serde::{Deserialize, Serialize};

/// Tolerance used when checking that the weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights of the three score components.
///
/// # Example
///
/// ```
/// use dual_coherence::config::ScoreWeights;
///
/// let weights = ScoreWeights::default();
/// assert!(weights.validate().is_ok());
/// assert!((weights.combine(1.0, 1.0, 1.0) - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the field-internal coherence.
    /// Range: `[0.0, 1.0]`
    pub field: f64,

    /// Weight of the adaptive stability.
    /// Range: `[0.0, 1.0]`
    pub adaptive: f64,

    /// Weight of the cross coherence between both sides.
    /// Range: `[0.0, 1.0]`
    pub cross: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            field: 0.4,
            adaptive: 0.3,
            cross: 0.3,
        }
    }
}

impl ScoreWeights {
    /// Create weights from explicit components.
    pub fn new(field: f64, adaptive: f64, cross: f64) -> Self {
        Self {
            field,
            adaptive,
            cross,
        }
    }

    /// Equal weighting of the three components.
    pub fn unweighted() -> Self {
        Self::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0)
    }

    /// Sum of the three weights.
    #[inline]
    pub fn sum(&self) -> f64 {
        self.field + self.adaptive + self.cross
    }

    /// Combine the three component metrics into one score clipped to `[0, 1]`.
    pub fn combine(&self, field_coherence: f64, adaptive_stability: f64, cross: f64) -> f64 {
        let score =
            self.field * field_coherence + self.adaptive * adaptive_stability + self.cross * cross;
        if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Validate the weights.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("field", self.field),
            ("adaptive", self.adaptive),
            ("cross", self.cross),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(format!("weights.{} must be in [0, 1], got {}", name, value));
            }
        }
        if (self.sum() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(format!("weights must sum to 1.0, got {}", self.sum()));
        }
        Ok(())
    }
}
