//! Convergence tracking over the optimization history.
//!
//! A run has converged when all of the following hold:
//!
//! 1. at least `window` cycles have been recorded,
//! 2. the latest score reaches the threshold,
//! 3. every one of the last `window` deltas is below [`DELTA_TOLERANCE`].
//!
//! The delta tolerance is independent of the threshold.

mod record;


pub use self::record::{OptimizationRecord, ScoreComponents};

use serde::{Deserialize, Serialize};

use crate::config::OptimizerConfig;

/// Maximum absolute score change for a cycle to count as stable.
pub const DELTA_TOLERANCE: f64 = 0.01;

/// Summary of a tracker's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerMetrics {
    pub history: Vec<OptimizationRecord>,
    /// Score of the latest record, if any.
    pub current_score: Option<f64>,
    pub is_converged: bool,
}

/// Ordered history of one run plus the convergence rule.
///
/// # Example
///
/// ```
/// use dual_coherence::config::ScoreWeights;
/// use dual_coherence::tracker::{ConvergenceTracker, ScoreComponents};
///
/// let weights = ScoreWeights::default();
/// let mut tracker = ConvergenceTracker::new(3, 0.9);
/// let mut previous = 0.0;
/// for cycle in 1..=4 {
///     let components = ScoreComponents::new(&weights, 0.95, 0.95, 0.95);
///     previous = tracker.record(cycle, components, previous).score;
/// }
/// assert!(tracker.converged());
/// ```
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    history: Vec<OptimizationRecord>,
    window: usize,
    threshold: f64,
}

impl ConvergenceTracker {
    /// Create a tracker with an explicit window and threshold.
    pub fn new(window: usize, threshold: f64) -> Self {
        Self {
            history: Vec::new(),
            window,
            threshold,
        }
    }

    /// Create a tracker using the optimizer's convergence settings.
    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self::with_capacity(config.stability_window, config.convergence_threshold, config.max_cycles)
    }

    fn with_capacity(window: usize, threshold: f64, capacity: usize) -> Self {
        Self {
            history: Vec::with_capacity(capacity),
            window,
            threshold,
        }
    }

    /// Append a record for `cycle` with `delta = score - previous_score`.
    pub fn record(
        &mut self,
        cycle: usize,
        components: ScoreComponents,
        previous_score: f64,
    ) -> &OptimizationRecord {
        let index = self.history.len();
        self.history
            .push(OptimizationRecord::new(cycle, components, previous_score));
        &self.history[index]
    }

    /// Convergence predicate for an arbitrary window and threshold.
    pub fn is_converged(&self, window: usize, threshold: f64) -> bool {
        if window == 0 || self.history.len() < window {
            return false;
        }
        let Some(latest) = self.history.last() else {
            return false;
        };
        if latest.score < threshold {
            return false;
        }
        self.history[self.history.len() - window..]
            .iter()
            .all(|r| r.delta.abs() < DELTA_TOLERANCE)
    }

    /// Convergence predicate with the tracker's own window and threshold.
    pub fn converged(&self) -> bool {
        self.is_converged(self.window, self.threshold)
    }

    pub fn current_score(&self) -> Option<f64> {
        self.history.last().map(|r| r.score)
    }

    /// Highest recorded score.
    pub fn best_score(&self) -> Option<f64> {
        self.history.iter().map(|r| r.score).reduce(f64::max)
    }

    pub fn last_delta(&self) -> Option<f64> {
        self.history.last().map(|r| r.delta)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> &[OptimizationRecord] {
        &self.history
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn metrics(&self) -> TrackerMetrics {
        TrackerMetrics {
            history: self.history.clone(),
            current_score: self.current_score(),
            is_converged: self.converged(),
        }
    }

    pub fn into_history(self) -> Vec<OptimizationRecord> {
        self.history
    }
}
