//! Fire spread models
//!
//! Four interchangeable rules decide how burning tiles ignite their neighbors
//! and burn out:
//!
//! | model | rule | neighborhood |
//! |---|---|---|
//! | 0 | [`UniformSpread::direct`] | 4 direct |
//! | 1 | [`UniformSpread::moore`] | 4 direct + 4 diagonal |
//! | 2 | [`VegetationWindSpread`] | 4 direct + 4 diagonal |
//! | 3 | [`SlopeWindSpread`] | 4 direct |
//!
//! Every rule implements [`SpreadRule`]. The rule is only asked about tiles
//! that are currently burning; it reads the current snapshot and writes into
//! a separate next snapshot that starts as a full copy of the current one.

mod slope_wind;
mod uniform;
mod vegetation_wind;

pub use slope_wind::{
    ignition_probability as slope_wind_ignition_probability, spread_factor, SlopeWindSpread,
    BASE_PROBABILITY, SLOPE_COEFFICIENT, WIND_COEFFICIENT, WIND_EXPONENT,
};
pub use uniform::{BurnOdds, UniformSpread};
pub use vegetation_wind::{burn_probability, VegetationWindSpread};

use crate::config::ConfigError;
use crate::core_types::Point;
use crate::grid::TileGrid;
use crate::probability::ProbabilitySource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view of the grid handed to a rule for one tick
#[derive(Debug, Clone, Copy)]
pub struct SpreadContext<'a> {
    /// Snapshot being read
    pub current: &'a TileGrid,
    /// Compass bearing the wind blows towards (degrees)
    pub wind_direction: f64,
    pub wind_speed: f64,
}

/// One spread model's transition rule
pub trait SpreadRule {
    /// Apply the rule for the burning tile at `point`.
    ///
    /// Must only read `ctx.current` and only write `next`.
    fn spread_from<P: ProbabilitySource + ?Sized>(
        &self,
        ctx: &SpreadContext<'_>,
        point: Point,
        next: &mut TileGrid,
        source: &mut P,
    );

    /// Compute the snapshot that follows `ctx.current`.
    ///
    /// Every tile is visited to find the burning ones; tiles no rule touches
    /// are carried over unchanged.
    fn compute_next<P: ProbabilitySource + ?Sized>(
        &self,
        ctx: &SpreadContext<'_>,
        source: &mut P,
    ) -> TileGrid {
        let mut next = ctx.current.clone();
        for (point, tile) in ctx.current.iter() {
            if tile.is_burning() {
                self.spread_from(ctx, point, &mut next, source);
            }
        }
        next
    }
}

/// The closed set of spread models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SpreadModel {
    /// Model 0: uniform odds, direct neighbors
    #[default]
    UniformDirect,
    /// Model 1: uniform odds, direct and diagonal neighbors
    UniformMoore,
    /// Model 2: vegetation and wind weighted
    VegetationWind,
    /// Model 3: slope and wind physical model
    SlopeWind,
}

impl SpreadModel {
    pub const ALL: [SpreadModel; 4] = [
        SpreadModel::UniformDirect,
        SpreadModel::UniformMoore,
        SpreadModel::VegetationWind,
        SpreadModel::SlopeWind,
    ];

    /// Numeric model index
    pub const fn index(self) -> u8 {
        match self {
            SpreadModel::UniformDirect => 0,
            SpreadModel::UniformMoore => 1,
            SpreadModel::VegetationWind => 2,
            SpreadModel::SlopeWind => 3,
        }
    }

    /// Whether grid construction runs terrain smoothing and the fixed seed
    /// ignition for this model
    pub const fn generates_terrain(self) -> bool {
        matches!(self, SpreadModel::SlopeWind)
    }

    /// Run this model's rule over the whole snapshot
    pub fn compute_next<P: ProbabilitySource + ?Sized>(
        self,
        ctx: &SpreadContext<'_>,
        source: &mut P,
    ) -> TileGrid {
        match self {
            SpreadModel::UniformDirect => UniformSpread::direct().compute_next(ctx, source),
            SpreadModel::UniformMoore => UniformSpread::moore().compute_next(ctx, source),
            SpreadModel::VegetationWind => VegetationWindSpread.compute_next(ctx, source),
            SpreadModel::SlopeWind => SlopeWindSpread.compute_next(ctx, source),
        }
    }
}

impl TryFrom<u8> for SpreadModel {
    type Error = ConfigError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        SpreadModel::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(ConfigError::UnknownModel(index))
    }
}

impl From<SpreadModel> for u8 {
    fn from(model: SpreadModel) -> Self {
        model.index()
    }
}

impl fmt::Display for SpreadModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpreadModel::UniformDirect => "uniform 4-neighbor",
            SpreadModel::UniformMoore => "uniform 8-neighbor",
            SpreadModel::VegetationWind => "vegetation/wind",
            SpreadModel::SlopeWind => "slope/wind",
        };
        write!(f, "model {} ({name})", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_indices_round_trip() {
        for model in SpreadModel::ALL {
            assert_eq!(SpreadModel::try_from(model.index()).unwrap(), model);
        }
    }

    #[test]
    fn test_unknown_model_is_config_error() {
        assert!(matches!(
            SpreadModel::try_from(4),
            Err(ConfigError::UnknownModel(4))
        ));
    }

    #[test]
    fn test_only_slope_model_generates_terrain() {
        let generating: Vec<SpreadModel> = SpreadModel::ALL
            .into_iter()
            .filter(|m| m.generates_terrain())
            .collect();
        assert_eq!(generating, vec![SpreadModel::SlopeWind]);
    }

    #[test]
    fn test_serde_uses_index() {
        assert_eq!(serde_json::to_string(&SpreadModel::VegetationWind).unwrap(), "2");
        assert!(serde_json::from_str::<SpreadModel>("7").is_err());
    }
}
