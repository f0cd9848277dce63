//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section falls back to its `Default` impl
//! when omitted.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [simulation]
//! seed = 2
//! time_step = 0.01
//! initial_population = 1
//! initial_diameter = 10.0
//!
//! [growth]
//! division_diameter = 20.0
//! growth_rate = 300.0
//!
//! [division]
//! random_axis = true
//! separation_factor = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Run-level parameters: seeding, time discretisation and the initial population.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the random service; `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Length of one step in simulated time units.
    pub time_step: f64,
    pub max_steps: u64,
    /// Metrics are logged every `log_interval` steps.
    pub log_interval: u64,
    pub initial_population: usize,
    pub initial_diameter: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            time_step: 0.01,
            max_steps: 5000,
            log_interval: 1000,
            initial_population: 1,
            initial_diameter: 10.0,
        }
    }
}

/// Parameters of the growth-and-division module.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GrowthConfig {
    /// Cells whose diameter exceeds this value divide instead of growing.
    pub division_diameter: f64,
    /// Volume added per unit of simulated time.
    pub growth_rate: f64,
    pub copy_on_divide: bool,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            division_diameter: 20.0,
            growth_rate: 300.0,
            copy_on_divide: true,
        }
    }
}

/// Placement of daughter cells.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DivisionConfig {
    /// Draw the division axis from the seeded random service; otherwise use +X.
    pub random_axis: bool,
    /// Distance between the two centers after division, as a fraction of the
    /// post-split diameter.
    pub separation_factor: f64,
}

impl Default for DivisionConfig {
    fn default() -> Self {
        Self {
            random_axis: true,
            separation_factor: 0.5,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MovementConfig {
    pub enabled: bool,
    /// Length travelled per unit of simulated time.
    pub speed: f64,
    pub copy_on_divide: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            speed: 5.0,
            copy_on_divide: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SenescenceConfig {
    pub enabled: bool,
    pub lifespan_steps: u64,
}

impl Default for SenescenceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            lifespan_steps: 10_000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub growth: GrowthConfig,
    pub division: DivisionConfig,
    pub movement: MovementConfig,
    pub senescence: SenescenceConfig,
}

impl AppConfig {
    /// Validates configuration values.
    ///
    /// Returns an error naming the first parameter found out of range.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.simulation.time_step.is_finite() && self.simulation.time_step > 0.0,
            "Time step must be positive"
        );
        anyhow::ensure!(
            self.simulation.log_interval > 0,
            "Log interval must be positive"
        );
        anyhow::ensure!(
            self.simulation.initial_diameter.is_finite()
                && self.simulation.initial_diameter >= 0.0,
            "Initial diameter must be non-negative"
        );

        anyhow::ensure!(
            self.growth.division_diameter.is_finite() && self.growth.division_diameter > 0.0,
            "Division diameter must be positive"
        );
        anyhow::ensure!(
            self.growth.growth_rate.is_finite() && self.growth.growth_rate >= 0.0,
            "Growth rate must be non-negative"
        );

        anyhow::ensure!(
            self.division.separation_factor.is_finite() && self.division.separation_factor > 0.0,
            "Separation factor must be positive"
        );

        anyhow::ensure!(
            self.movement.speed.is_finite() && self.movement.speed >= 0.0,
            "Movement speed must be non-negative"
        );
        anyhow::ensure!(
            self.senescence.lifespan_steps > 0,
            "Lifespan must be at least one step"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        tracing::info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Digest of the parameters that shape a trajectory.
    ///
    /// Two runs with equal fingerprints and equal seeds are identical.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{}", self.simulation.time_step).as_bytes());
        hasher.update(format!("{:?}", self.growth).as_bytes());
        hasher.update(format!("{:?}", self.division).as_bytes());
        hasher.update(format!("{:?}", self.movement).as_bytes());
        hasher.update(format!("{:?}", self.senescence).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_time_step() {
        let config = AppConfig {
            simulation: SimulationConfig {
                time_step: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_division_diameter() {
        let config = AppConfig {
            growth: GrowthConfig {
                division_diameter: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_separation_factor() {
        let config = AppConfig {
            division: DivisionConfig {
                separation_factor: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [simulation]
            seed = 2

            [growth]
            growth_rate = 150.0
            "#,
        )
        .unwrap();
        assert_eq!(config.simulation.seed, Some(2));
        assert_eq!(config.simulation.time_step, 0.01);
        assert_eq!(config.growth.growth_rate, 150.0);
        assert_eq!(config.growth.division_diameter, 20.0);
    }

    #[test]
    fn test_toml_rejects_invalid_values() {
        let result = AppConfig::from_toml("[growth]\ngrowth_rate = -5.0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_fingerprint_consistency() {
        let config1 = AppConfig::default();
        let mut config2 = AppConfig::default();
        assert_eq!(config1.fingerprint(), config2.fingerprint());

        config2.growth.growth_rate = 1.0;
        assert_ne!(config1.fingerprint(), config2.fingerprint());
    }

    #[test]
    fn test_fingerprint_ignores_seed() {
        let mut config = AppConfig::default();
        let before = config.fingerprint();
        config.simulation.seed = Some(99);
        assert_eq!(before, config.fingerprint());
    }
}
