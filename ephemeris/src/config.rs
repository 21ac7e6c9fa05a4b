//! Engine configuration.
//!
//! Selects the mean-longitude time model and the Kepler solver limits.
//! Stored as JSON so front ends can share one settings file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EphemerisError, Result};
use crate::kepler::{KeplerSolver, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::transform::{MeanLongitudeModel, PositionEngine};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Time model for the mean longitude
    pub mean_longitude: MeanLongitudeModel,
    /// Absolute tolerance on the Newton correction (radians)
    pub tolerance: f64,
    /// Iteration cap for the Kepler solver
    pub max_iterations: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mean_longitude: MeanLongitudeModel::Fixed,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(EphemerisError::InvalidConfig(format!(
                "solver tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(EphemerisError::InvalidConfig(
                "solver needs at least one iteration".to_string(),
            ));
        }
        Ok(())
    }

    /// Build a position engine from this configuration
    pub fn engine(&self) -> Result<PositionEngine> {
        self.validate()?;
        Ok(PositionEngine::new(
            self.mean_longitude,
            KeplerSolver::new(self.tolerance, self.max_iterations),
        ))
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file; missing fields take their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}
