//! Dual-representation coherence optimizer.
//!
//! Two heterogeneous numeric states, a *field state* (normalized complex
//! amplitude plus phase) and an *adaptive state* (activations plus weight
//! tensors), are coupled and corrected over a bounded number of cycles until
//! a combined coherence score is high and stable, or the cycle budget runs out.
//!
//! # Modules
//!
//! - [`algebra`]: Normalization and bounded metrics (coherence, stability, cross coherence, entanglement)
//! - [`state`]: Field/adaptive state types and their JSON persistence encoding
//! - [`bridge`]: Coupling matrix computation and per-side corrections
//! - [`tracker`]: Per-cycle records and the convergence rule
//! - [`optimizer`]: Run state machine, cancellation and results
//! - [`config`]: Optimizer configuration, presets and layered loading
//! - [`error`]: Error types and result aliases
//!
//! # Score
//!
//! ```text
//! score = 0.4·coherence(field) + 0.3·stability(weights) + 0.3·cross(field, activations)
//! ```
//!
//! All three components and the score are clipped to `[0, 1]`. Each history
//! record also reports the field/adaptive entanglement, which is not weighted
//! into the score.
//!
//! # Example
//!
//! ```
//! use dual_coherence::{optimize, AdaptiveState, FieldState, OptimizerConfig};
//! use ndarray::array;
//!
//! let field = FieldState::from_real(&[1.0, 0.0, 0.0]).unwrap();
//! let a = 1.0 / 3f64.sqrt();
//! let adaptive = AdaptiveState::new(array![[a, a, a]], vec![array![[1.0]]]).unwrap();
//!
//! let config = OptimizerConfig {
//!     max_cycles: 50,
//!     convergence_threshold: 0.9,
//!     ..Default::default()
//! };
//! let (field, _adaptive, result) = optimize(&field, &adaptive, &config).unwrap();
//! assert!(result.converged);
//! assert!(field.coherence() <= 1.0);
//! ```

pub mod algebra;
pub mod bridge;
pub mod config;
pub mod error;
pub mod optimizer;
pub mod state;
pub mod tracker;

pub use config::{CouplingConfig, CouplingTopology, OptimizerConfig, ScoreWeights};
pub use error::{CoherenceError, CoherenceResult};

pub use bridge::{CouplingBridge, CouplingMatrix, SignatureBridge};
pub use optimizer::{
    optimize, CancellationToken, CoherenceOptimizer, OptimizationOutput, OptimizationResult,
    OptimizerState,
};
pub use state::{
    AdaptationRecord, AdaptiveState, CouplingDescriptor, FieldState, PersistedState, TensorSummary,
};
pub use tracker::{ConvergenceTracker, OptimizationRecord, ScoreComponents, TrackerMetrics};
