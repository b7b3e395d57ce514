//! Coherence optimizer error types.
//!
//! Only two failures cross the optimizer API boundary: [`CoherenceError::DimensionMismatch`]
//! and [`CoherenceError::InvalidConfiguration`]. Numeric instability and
//! non-convergence are recovered locally and reported through `tracing` and
//! result fields. The remaining variants belong to the state constructors and
//! the persistence/configuration adapters.

use thiserror::Error;

/// Errors that can occur while building states or running the optimizer.
#[derive(Debug, Error)]
pub enum CoherenceError {
    /// Field and adaptive signatures cannot be reconciled to a common inner dimension.
    #[error("Dimension mismatch: field dimension {expected}, adaptive dimension {actual}")]
    DimensionMismatch {
        /// Field dimension (amplitude rows)
        expected: usize,
        /// Adaptive dimension (activation columns)
        actual: usize,
    },

    /// Optimizer configuration rejected before the loop starts
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed state handed in by an input adapter
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration source could not be read or parsed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for coherence operations.
pub type CoherenceResult<T> = Result<T, CoherenceError>;

impl From<serde_json::Error> for CoherenceError {
    fn from(err: serde_json::Error) -> Self {
        CoherenceError::SerializationError(err.to_string())
    }
}

impl From<::config::ConfigError> for CoherenceError {
    fn from(err: ::config::ConfigError) -> Self {
        CoherenceError::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for CoherenceError {
    fn from(err: toml::de::Error) -> Self {
        CoherenceError::ConfigError(err.to_string())
    }
}

impl CoherenceError {
    /// Create an InvalidConfiguration error for a single parameter.
    pub fn invalid_param(
        name: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        CoherenceError::InvalidConfiguration(format!(
            "'{}' = {}: {}",
            name.into(),
            value.to_string(),
            reason.into()
        ))
    }

    /// Create an InvalidState error for a non-finite entry.
    pub fn non_finite(what: impl Into<String>) -> Self {
        CoherenceError::InvalidState(format!("{} contains NaN or infinite entries", what.into()))
    }

    /// Check if this error is recoverable (the caller can retry with different inputs).
    ///
    /// Dimension mismatches are caller errors: retrying the same pair never succeeds.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CoherenceError::InvalidConfiguration(_) | CoherenceError::ConfigError(_)
        )
    }

    /// Check if this error crosses the optimizer API boundary.
    pub fn is_optimizer_failure(&self) -> bool {
        matches!(
            self,
            CoherenceError::DimensionMismatch { .. } | CoherenceError::InvalidConfiguration(_)
        )
    }
}
