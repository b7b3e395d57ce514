//! Per-cycle score records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algebra::{cross_coherence, entanglement};
use crate::config::ScoreWeights;
use crate::state::{AdaptiveState, FieldState};

/// The three score components of one state pair and their weighted combination.
///
/// `entanglement` is measured alongside but never weighted into `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// Combined score [0, 1].
    pub score: f64,
    /// Field coherence [0, 1).
    pub field_coherence: f64,
    /// Adaptive stability (0, 1].
    pub adaptive_stability: f64,
    /// Cross coherence [0, 1].
    pub cross_coherence: f64,
    /// Field/adaptive entanglement [0, 1]. Reported only.
    #[serde(default)]
    pub entanglement: f64,
}

impl ScoreComponents {
    /// Combine already computed components.
    pub fn new(
        weights: &ScoreWeights,
        field_coherence: f64,
        adaptive_stability: f64,
        cross_coherence: f64,
    ) -> Self {
        Self {
            score: weights.combine(field_coherence, adaptive_stability, cross_coherence),
            field_coherence: field_coherence.clamp(0.0, 1.0),
            adaptive_stability: adaptive_stability.clamp(0.0, 1.0),
            cross_coherence: cross_coherence.clamp(0.0, 1.0),
            entanglement: 0.0,
        }
    }

    /// Attach a reported entanglement value; the score is unchanged.
    pub fn with_entanglement(mut self, entanglement: f64) -> Self {
        self.entanglement = entanglement.clamp(0.0, 1.0);
        self
    }

    /// Measure a state pair.
    pub fn measure(weights: &ScoreWeights, field: &FieldState, adaptive: &AdaptiveState) -> Self {
        Self::new(
            weights,
            field.coherence(),
            adaptive.stability(),
            cross_coherence(field.amplitude(), adaptive.activations()),
        )
        .with_entanglement(entanglement(field.amplitude(), adaptive.activations()))
    }
}

/// One entry of the optimization history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRecord {
    /// Cycle index (1-based).
    pub cycle: usize,
    /// Combined score after the cycle.
    pub score: f64,
    pub field_coherence: f64,
    pub adaptive_stability: f64,
    pub cross_coherence: f64,
    #[serde(default)]
    pub entanglement: f64,
    /// `score - previous_score`.
    pub delta: f64,
    pub recorded_at: DateTime<Utc>,
}

impl OptimizationRecord {
    pub fn new(cycle: usize, components: ScoreComponents, previous_score: f64) -> Self {
        Self {
            cycle,
            score: components.score,
            field_coherence: components.field_coherence,
            adaptive_stability: components.adaptive_stability,
            cross_coherence: components.cross_coherence,
            entanglement: components.entanglement,
            delta: components.score - previous_score,
            recorded_at: Utc::now(),
        }
    }
}
