//! The bounded correction loop.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use super::cancel::CancellationToken;
use super::result::OptimizationResult;
use super::state::OptimizerState;
use super::OptimizationOutput;
use crate::bridge::{CouplingBridge, CouplingMatrix, SignatureBridge};
use crate::config::OptimizerConfig;
use crate::error::{CoherenceError, CoherenceResult};
use crate::state::{AdaptiveState, FieldState, FIELD_TO_ADAPTIVE};
use crate::tracker::{ConvergenceTracker, ScoreComponents};

/// Highest-scoring committed pair of a run and the coupling that produced it.
struct BestPair {
    field: FieldState,
    adaptive: AdaptiveState,
    coupling: Option<CouplingMatrix>,
    score: f64,
}

/// Orchestrates coupling, correction and convergence tracking.
///
/// Each run is self-contained: a fresh seeded random source, a fresh tracker
/// and no state shared with other runs. The optimizer itself only remembers
/// the [`OptimizerState`] of its latest run.
///
/// # Example
///
/// ```
/// use dual_coherence::config::OptimizerConfig;
/// use dual_coherence::optimizer::{CoherenceOptimizer, OptimizerState};
/// use dual_coherence::state::{AdaptiveState, FieldState};
/// use ndarray::array;
///
/// let field = FieldState::from_real(&[1.0, 0.0, 0.0]).unwrap();
/// let a = 1.0 / 3f64.sqrt();
/// let adaptive = AdaptiveState::new(array![[a, a, a]], vec![array![[1.0]]]).unwrap();
///
/// let mut optimizer = CoherenceOptimizer::new(OptimizerConfig {
///     max_cycles: 10,
///     ..Default::default()
/// })
/// .unwrap();
/// let (field, _, result) = optimizer.run(&field, &adaptive).unwrap();
/// assert!((field.norm() - 1.0).abs() < 1e-9);
/// assert_eq!(result.cycles_run, result.history.len());
/// assert!(optimizer.state().is_terminal());
/// ```
#[derive(Debug, Clone)]
pub struct CoherenceOptimizer<B = SignatureBridge> {
    config: OptimizerConfig,
    bridge: B,
    state: OptimizerState,
}

impl CoherenceOptimizer<SignatureBridge> {
    /// Create an optimizer with the signature bridge configured from `config.coupling`.
    ///
    /// # Errors
    ///
    /// [`CoherenceError::InvalidConfiguration`] if the configuration is rejected.
    pub fn new(config: OptimizerConfig) -> CoherenceResult<Self> {
        let bridge = SignatureBridge::new(config.coupling);
        Self::with_bridge(config, bridge)
    }
}

impl<B: CouplingBridge> CoherenceOptimizer<B> {
    /// Create an optimizer around an explicit bridge.
    pub fn with_bridge(config: OptimizerConfig, bridge: B) -> CoherenceResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            bridge,
            state: OptimizerState::Idle,
        })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// State of the latest run.
    pub fn state(&self) -> OptimizerState {
        self.state
    }

    fn transition(&mut self, next: OptimizerState) -> CoherenceResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(CoherenceError::InvalidState(format!(
                "Cannot transition optimizer from {} to {}",
                self.state, next
            )));
        }
        self.state = next;
        Ok(())
    }

    /// Run without external cancellation.
    pub fn run(
        &mut self,
        field: &FieldState,
        adaptive: &AdaptiveState,
    ) -> CoherenceResult<OptimizationOutput> {
        self.run_with_cancel(field, adaptive, &CancellationToken::new())
    }

    /// Run until convergence, cycle budget exhaustion or cancellation.
    ///
    /// On cancellation the best committed pair is returned with
    /// `cancelled = true`.
    ///
    /// # Errors
    ///
    /// [`CoherenceError::DimensionMismatch`] when the two sides cannot be
    /// coupled; the optimizer ends in [`OptimizerState::Failed`].
    pub fn run_with_cancel(
        &mut self,
        field: &FieldState,
        adaptive: &AdaptiveState,
        token: &CancellationToken,
    ) -> CoherenceResult<OptimizationOutput> {
        self.state = OptimizerState::Idle;
        self.transition(OptimizerState::Running)?;

        let started = Instant::now();
        let run_id = Uuid::new_v4();
        let weights = self.config.weights;
        let rate = self.config.learning_rate;
        let max_cycles = self.config.max_cycles;

        let mut current_field = field.renormalized();
        let mut current_adaptive = adaptive.clone();
        let initial_score =
            ScoreComponents::measure(&weights, &current_field, &current_adaptive).score;

        tracing::debug!(
            %run_id,
            max_cycles,
            learning_rate = rate,
            initial_score,
            "Starting coherence optimization"
        );

        let mut tracker = ConvergenceTracker::from_config(&self.config);
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let mut previous_score = initial_score;
        let mut best = BestPair {
            field: current_field.clone(),
            adaptive: current_adaptive.clone(),
            coupling: None,
            score: initial_score,
        };
        let mut last_coupling = None;
        let mut outcome = OptimizerState::Exhausted;

        for cycle in 1..=max_cycles {
            if token.is_cancelled() {
                tracing::warn!(%run_id, cycle, "Optimization cancelled before cycle");
                outcome = OptimizerState::Cancelled;
                break;
            }

            let coupling =
                match self
                    .bridge
                    .compute_coupling(&current_field, &current_adaptive, &mut rng)
                {
                    Ok(coupling) => coupling,
                    Err(err) => {
                        self.transition(OptimizerState::Failed)?;
                        return Err(err);
                    }
                };

            let next_field = self.bridge.correct_field(&current_field, &coupling, rate);
            let next_adaptive =
                self.bridge
                    .correct_adaptive(&current_adaptive, &coupling, rate, cycle);
            let components = ScoreComponents::measure(&weights, &next_field, &next_adaptive);

            let record = tracker.record(cycle, components, previous_score);
            tracing::debug!(
                cycle,
                score = record.score,
                delta = record.delta,
                field_coherence = record.field_coherence,
                adaptive_stability = record.adaptive_stability,
                cross_coherence = record.cross_coherence,
                entanglement = record.entanglement,
                "Cycle complete"
            );

            previous_score = components.score;
            current_field = next_field;
            current_adaptive = next_adaptive;

            if components.score > best.score {
                best = BestPair {
                    field: current_field.clone(),
                    adaptive: current_adaptive.clone(),
                    coupling: Some(coupling.clone()),
                    score: components.score,
                };
            }
            last_coupling = Some(coupling);

            if tracker.converged() {
                outcome = OptimizerState::Converged;
                break;
            }
        }

        let best_score = best.score;
        let (final_field, mut final_adaptive, final_coupling, final_score) =
            if outcome == OptimizerState::Cancelled {
                (best.field, best.adaptive, best.coupling, best.score)
            } else {
                let score = tracker.current_score().unwrap_or(initial_score);
                (current_field, current_adaptive, last_coupling, score)
            };

        if self.config.retain_coupling {
            if let Some(coupling) = &final_coupling {
                final_adaptive.retain_matrix(FIELD_TO_ADAPTIVE, coupling.magnitude());
            }
        }

        self.transition(outcome)?;

        let history = tracker.into_history();
        let elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        tracing::info!(
            %run_id,
            status = %outcome,
            cycles_run = history.len(),
            initial_score,
            final_score,
            elapsed_us,
            "Coherence optimization finished"
        );

        let result = OptimizationResult {
            run_id,
            converged: outcome == OptimizerState::Converged,
            cancelled: outcome == OptimizerState::Cancelled,
            status: outcome,
            cycles_run: history.len(),
            initial_score,
            final_score,
            best_score,
            history,
            elapsed_us,
        };

        Ok((final_field, final_adaptive, result))
    }
}
