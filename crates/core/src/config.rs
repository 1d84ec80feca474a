//! Simulation parameters
//!
//! The core never reads process arguments or environment; callers build a
//! [`SimulationConfig`] and hand it over.

use crate::core_types::Point;
use crate::spread::SpreadModel;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Side length of a grid when none is given
pub const DEFAULT_GRID_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown spread model {0} (expected 0-3)")]
    UnknownModel(u8),
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("grid count must be at least 1")]
    NoGrids,
    #[error("ignition point {point} is outside a {size}x{size} grid")]
    IgnitionOutOfBounds { point: Point, size: usize },
}

/// Wind shared by every grid of a run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    /// Compass bearing the wind blows towards, degrees (0 = north, 90 = east)
    pub direction: f64,
    /// Wind speed (m/s)
    pub speed: f64,
}

/// What to write once a grid has finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Append the final tiles to the tabular export
    pub csv: bool,
    /// Write a PNG of the final tiles
    pub png: bool,
}

impl ExportOptions {
    pub fn any(&self) -> bool {
        self.csv || self.png
    }
}

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub model: SpreadModel,
    /// Number of independent grids simulated side by side
    pub grid_count: usize,
    /// Side length of each grid in tiles
    pub grid_size: usize,
    /// Stop after this many ticks even if fire remains
    pub max_iterations: Option<u32>,
    /// Pause between ticks, honored by drivers only; zero runs flat out
    #[serde(with = "duration_millis")]
    pub tick_interval: Duration,
    pub wind: Wind,
    pub export: ExportOptions,
    /// Tile set alight at construction (models without their own seed tile)
    pub ignition: Option<Point>,
    /// Seed of the random source; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            model: SpreadModel::default(),
            grid_count: 1,
            grid_size: DEFAULT_GRID_SIZE,
            max_iterations: None,
            tick_interval: Duration::ZERO,
            wind: Wind::default(),
            export: ExportOptions::default(),
            ignition: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Config for a model given by its numeric index
    pub fn for_model_index(index: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            model: SpreadModel::try_from(index)?,
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.grid_count == 0 {
            return Err(ConfigError::NoGrids);
        }
        if let Some(point) = self.ignition {
            if !crate::core_types::is_valid(point, self.grid_size) {
                return Err(ConfigError::IgnitionOutOfBounds {
                    point,
                    size: self.grid_size,
                });
            }
        }
        Ok(())
    }

    /// Fixed seed tile lit by models that generate their own terrain
    pub fn terrain_seed_point(&self) -> Point {
        Point::new((self.grid_size / 6) as i32, (self.grid_size / 2) as i32)
    }

    /// Center tile, the usual ignition point for the uniform models
    pub fn center(&self) -> Point {
        let mid = (self.grid_size / 2) as i32;
        Point::new(mid, mid)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid_size, 32);
        assert_eq!(config.terrain_seed_point(), Point::new(5, 16));
        assert!(config.tick_interval.is_zero());
    }

    #[test]
    fn test_unknown_model_index() {
        assert_eq!(
            SimulationConfig::for_model_index(9).unwrap_err(),
            ConfigError::UnknownModel(9)
        );
        assert_eq!(
            SimulationConfig::for_model_index(3).unwrap().model,
            SpreadModel::SlopeWind
        );
    }

    #[test]
    fn test_validation_errors() {
        let mut config = SimulationConfig {
            grid_size: 0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyGrid));

        config.grid_size = 4;
        config.grid_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoGrids));

        config.grid_count = 2;
        config.ignition = Some(Point::new(4, 0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::IgnitionOutOfBounds { size: 4, .. })
        ));
    }

    #[test]
    fn test_json_round_trip_with_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{ "model": 2, "wind": { "direction": 90.0, "speed": 5.0 }, "tick_interval": 100 }"#)
                .unwrap();
        assert_eq!(config.model, SpreadModel::VegetationWind);
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.grid_count, 1);

        let json = serde_json::to_string(&config).unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_model_in_json_is_rejected() {
        assert!(serde_json::from_str::<SimulationConfig>(r#"{ "model": 5 }"#).is_err());
    }
}
