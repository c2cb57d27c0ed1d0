//! Simulation configuration with documented defaults
//!
//! Defaults reproduce the classic setup: a 300x300 lattice, 40% of each
//! agent type, 20% vacancies, and agents wanting 70% like neighbors.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SimError};
use crate::core::types::{check_threshold, Distribution, MAX_TOTAL_CELLS};

/// Configuration for a simulation run
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Requested number of lattice cells
    ///
    /// The grid side is `floor(sqrt(total_cells))`, so a non-square request
    /// silently rounds down (90000 -> 300x300, 90001 -> 300x300).
    pub total_cells: u64,

    /// Share of cells given to each agent type and to vacancies
    pub distribution: Distribution,

    /// Minimum fraction of like occupied neighbors an agent needs
    ///
    /// At 0.0 every agent is content; at 1.0 a single unlike neighbor
    /// makes an agent move. Values around 0.3 already produce visible
    /// clustering.
    pub threshold: f64,

    /// Seed for the random source; `None` draws fresh entropy each run
    pub seed: Option<u64>,

    /// Number of rounds the headless runner executes
    pub rounds: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_cells: 90_000,
            distribution: Distribution::default(),
            threshold: 0.7,
            seed: None,
            rounds: 100,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        self.distribution.validate()?;
        check_threshold(self.threshold)?;

        if self.total_cells > MAX_TOTAL_CELLS {
            return Err(SimError::InvalidConfig(format!(
                "total_cells ({}) exceeds {}",
                self.total_cells, MAX_TOTAL_CELLS
            )));
        }

        Ok(())
    }
}
