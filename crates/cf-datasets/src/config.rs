//! Configuration for building the sample catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of longitude points in the full reanalysis sample grid.
pub const AIR_FULL_LON_POINTS: usize = 53;

/// Number of six-hourly steps in the full reanalysis sample (one year).
pub const AIR_FULL_TIME_STEPS: usize = 2920;

/// Errors from invalid catalog configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

/// Configuration for the sample catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Seed for the Gaussian fields (`anc`, `romsds.z_rho_dummy`).
    pub random_seed: u32,

    /// Number of six-hourly steps in the air temperature sample.
    pub air_time_steps: usize,

    /// Number of longitude points kept from the air temperature grid.
    pub air_lon_points: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            random_seed: 0,
            air_time_steps: 4,
            air_lon_points: 50,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CF_DATASETS_SEED") {
            if let Ok(seed) = val.parse() {
                config.random_seed = seed;
            }
        }

        if let Ok(val) = std::env::var("CF_DATASETS_AIR_TIME_STEPS") {
            if let Ok(steps) = val.parse() {
                config.air_time_steps = steps;
            }
        }

        if let Ok(val) = std::env::var("CF_DATASETS_AIR_LON_POINTS") {
            if let Ok(points) = val.parse() {
                config.air_lon_points = points;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.air_time_steps == 0 || self.air_time_steps > AIR_FULL_TIME_STEPS {
            return Err(ConfigError::OutOfRange {
                name: "air_time_steps",
                value: self.air_time_steps,
                min: 1,
                max: AIR_FULL_TIME_STEPS,
            });
        }

        if self.air_lon_points == 0 || self.air_lon_points > AIR_FULL_LON_POINTS {
            return Err(ConfigError::OutOfRange {
                name: "air_lon_points",
                value: self.air_lon_points,
                min: 1,
                max: AIR_FULL_LON_POINTS,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.air_time_steps, 4);
        assert_eq!(config.air_lon_points, 50);
    }

    #[test]
    fn test_invalid_lon_points() {
        let config = CatalogConfig {
            air_lon_points: 54,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { name: "air_lon_points", .. })
        ));
    }

    #[test]
    fn test_zero_time_steps() {
        let config = CatalogConfig {
            air_time_steps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = CatalogConfig {
            random_seed: 9,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: CatalogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
