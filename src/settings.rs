//! Simulation settings
//!
//! Persisted as JSON. Every field has a default, so a partial file (or `{}`)
//! is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SPEED;
use crate::error::{SimError, SimResult};
use crate::sim::{Bounds, TickOrder, Tolerance};

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena rectangle in world units
    pub bounds: Bounds,
    /// World units travelled per tick
    pub speed: f64,
    /// Cross products at or below this magnitude count as collinear
    pub collinear_epsilon: f64,
    pub tick_order: TickOrder,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            speed: DEFAULT_SPEED,
            collinear_epsilon: Tolerance::EXACT.collinear_epsilon,
            tick_order: TickOrder::default(),
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        self.bounds.validate()?;
        if !(self.speed > 0.0) || !self.speed.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "speed must be positive and finite, got {}",
                self.speed
            )));
        }
        if !(self.collinear_epsilon >= 0.0) || !self.collinear_epsilon.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "collinear_epsilon must be non-negative, got {}",
                self.collinear_epsilon
            )));
        }
        Ok(())
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.collinear_epsilon)
    }

    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json).inspect_err(|e| {
            log::warn!("Rejected config {}: {}", path.display(), e);
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> SimResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Config saved to {}", path.as_ref().display());
        Ok(())
    }
}
