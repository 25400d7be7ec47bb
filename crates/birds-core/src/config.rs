//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Habitat grid parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Number of grid rows
    pub rows: u32,
    /// Number of grid columns
    pub columns: u32,
    /// Share of cells that are habitable (0.0 to 1.0)
    pub habitable_ratio: f64,
    /// Share of habitable cells populated at start (0.0 to 1.0)
    pub population_density: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            columns: 10,
            habitable_ratio: 0.8,
            population_density: 0.5,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must have at least one row and column, got {}x{}",
                self.rows, self.columns
            )));
        }
        check_unit_ratio("habitable_ratio", self.habitable_ratio)?;
        check_unit_ratio("population_density", self.population_density)
    }
}

/// Warming schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Warming level in the first simulated year
    pub initial_warming: f64,
    /// Amount added to the warming level after every year
    pub warming_step: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            initial_warming: 0.0,
            warming_step: 0.01,
        }
    }
}

impl ClimateConfig {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("initial_warming", self.initial_warming)?;
        check_non_negative("warming_step", self.warming_step)
    }
}

/// Full run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of years to simulate
    pub years: u32,
    /// Random seed for reproducibility; entropy-seeded when absent
    pub seed: Option<u64>,
    pub world: WorldConfig,
    pub climate: ClimateConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            years: 50,
            seed: None,
            world: WorldConfig::default(),
            climate: ClimateConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        self.climate.validate()
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

fn check_unit_ratio(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidConfig(format!(
            "{field} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidConfig(format!(
            "{field} must be finite and non-negative, got {value}"
        )));
    }
    Ok(())
}
