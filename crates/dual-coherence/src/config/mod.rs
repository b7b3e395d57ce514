//! Optimizer configuration types.
//!
//! [`OptimizerConfig`] aggregates the loop budget, the convergence rule, the
//! score weighting and the coupling settings. Every sub-config validates
//! itself; [`OptimizerConfig::validate`] turns the first violation into
//! [`CoherenceError::InvalidConfiguration`].
//!
//! Configuration can be built in code, parsed from TOML, or loaded in layers:
//!
//! 1. `config/coherence.toml` (base settings)
//! 2. `config/coherence.{COHERENCE_ENV}.toml` (environment-specific)
//! 3. Environment variables with the `COHERENCE__` prefix (e.g. `COHERENCE__MAX_CYCLES=200`)

mod coupling;
mod weights;


pub use self::coupling::{CouplingConfig, CouplingTopology};
pub use self::weights::{ScoreWeights, WEIGHT_SUM_TOLERANCE};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoherenceError, CoherenceResult};

/// Smallest stability window accepted by the convergence rule.
pub const MIN_STABILITY_WINDOW: usize = 3;

/// Configuration of one optimization run.
///
/// # Example
///
/// ```
/// use dual_coherence::config::OptimizerConfig;
///
/// let config = OptimizerConfig {
///     max_cycles: 50,
///     convergence_threshold: 0.9,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Cycle budget. Zero is allowed and returns the normalized inputs.
    pub max_cycles: usize,

    /// Correction rate applied by the bridge. Zero makes every cycle a no-op.
    pub learning_rate: f64,

    /// Minimum combined score required for convergence.
    /// Range: `(0.0, 1.0)`
    pub convergence_threshold: f64,

    /// Number of trailing deltas that must all be small for convergence.
    pub stability_window: usize,

    /// Score component weights.
    pub weights: ScoreWeights,

    /// Coupling topology and jitter.
    pub coupling: CouplingConfig,

    /// Seed of the per-run random source used for coupling jitter.
    pub seed: u64,

    /// Store the final coupling magnitude in the adaptive coupling descriptor.
    pub retain_coupling: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_cycles: 100,
            learning_rate: 0.01,
            convergence_threshold: 0.95,
            stability_window: MIN_STABILITY_WINDOW,
            weights: ScoreWeights::default(),
            coupling: CouplingConfig::default(),
            seed: 42,
            retain_coupling: false,
        }
    }
}

impl OptimizerConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Larger steps and a lower bar, for callers that need a quick answer.
    pub fn fast_convergence_preset() -> Self {
        Self {
            max_cycles: 30,
            learning_rate: 0.05,
            convergence_threshold: 0.85,
            ..Default::default()
        }
    }

    /// Equal weighting of field, adaptive and cross components.
    pub fn unweighted_preset() -> Self {
        Self {
            weights: ScoreWeights::unweighted(),
            ..Default::default()
        }
    }

    /// Load configuration from files and environment.
    pub fn load() -> CoherenceResult<Self> {
        let env = std::env::var("COHERENCE_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = ::config::Config::builder()
            .add_source(::config::File::with_name("config/coherence").required(false))
            .add_source(
                ::config::File::with_name(&format!("config/coherence.{}", env)).required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("COHERENCE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: OptimizerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CoherenceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoherenceError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> CoherenceResult<Self> {
        let config: OptimizerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> CoherenceResult<()> {
        if !self.learning_rate.is_finite() || self.learning_rate < 0.0 {
            return Err(CoherenceError::invalid_param(
                "learning_rate",
                self.learning_rate,
                "must be finite and >= 0",
            ));
        }
        if !(self.convergence_threshold > 0.0 && self.convergence_threshold < 1.0) {
            return Err(CoherenceError::invalid_param(
                "convergence_threshold",
                self.convergence_threshold,
                "must be in (0, 1)",
            ));
        }
        if self.stability_window < MIN_STABILITY_WINDOW {
            return Err(CoherenceError::invalid_param(
                "stability_window",
                self.stability_window,
                format!("must be >= {}", MIN_STABILITY_WINDOW),
            ));
        }
        self.weights
            .validate()
            .map_err(CoherenceError::InvalidConfiguration)?;
        self.coupling
            .validate()
            .map_err(CoherenceError::InvalidConfiguration)?;
        Ok(())
    }
}
