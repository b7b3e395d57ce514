//! Coupling topology and stochastic mixing settings.
//!
//! The bridge has a single implementation; the coupling variants found across
//! older bridge designs are expressed here as configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which field/adaptive component pairs may influence each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouplingTopology {
    /// Every field component couples to every adaptive component.
    #[default]
    AllToAll,
    /// Component `i` couples to `i - 1`, `i` and `i + 1` only.
    NearestNeighbor,
    /// Component `i` couples to component `i` only.
    Diagonal,
}

impl CouplingTopology {
    /// Mask value for the pair `(i, j)`: 1.0 when coupled, 0.0 otherwise.
    #[inline]
    pub fn mask(&self, i: usize, j: usize) -> f64 {
        let coupled = match self {
            CouplingTopology::AllToAll => true,
            CouplingTopology::NearestNeighbor => i.abs_diff(j) <= 1,
            CouplingTopology::Diagonal => i == j,
        };
        if coupled {
            1.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for CouplingTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CouplingTopology::AllToAll => "all_to_all",
            CouplingTopology::NearestNeighbor => "nearest_neighbor",
            CouplingTopology::Diagonal => "diagonal",
        };
        write!(f, "{}", name)
    }
}

/// Coupling computation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouplingConfig {
    /// Coupling topology mask.
    pub topology: CouplingTopology,

    /// Relative amplitude of the seeded multiplicative jitter applied to each
    /// coupling entry (`1 + jitter·U(-1, 1)`).
    /// Range: `[0.0, 0.5]`
    pub jitter: f64,
}

impl Default for CouplingConfig {
    fn default() -> Self {
        Self {
            topology: CouplingTopology::AllToAll,
            jitter: 0.05,
        }
    }
}

impl CouplingConfig {
    /// Deterministic coupling without jitter.
    pub fn deterministic(topology: CouplingTopology) -> Self {
        Self {
            topology,
            jitter: 0.0,
        }
    }

    /// Validate the coupling configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.jitter.is_finite() || !(0.0..=0.5).contains(&self.jitter) {
            return Err(format!(
                "coupling.jitter must be in [0, 0.5], got {}",
                self.jitter
            ));
        }
        Ok(())
    }
}
