//! Simulation grid: one square field of tiles plus the parameters that drive
//! fire spread over it
//!
//! The tile array is replaced wholesale once per tick; nothing else ever holds
//! a reference into it across ticks.

use super::terrain::{generate_terrain, random_terrain, SmoothingPasses, TerrainDescription};
use super::tile_grid::TileGrid;
use crate::config::{ConfigError, ExportOptions, SimulationConfig, Wind};
use crate::core_types::{Point, Tile, TileType};
use crate::probability::ProbabilitySource;
use crate::spread::{SpreadContext, SpreadModel};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Placement of a grid in a multi-grid run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
}

impl GridCoord {
    pub const fn new(x: u32, y: u32) -> Self {
        GridCoord { x, y }
    }
}

/// Fire-spread grid with its simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationGrid {
    /// Current snapshot
    pub(crate) tiles: TileGrid,
    /// Spread rule applied each tick
    pub(crate) model: SpreadModel,
    /// Compass bearing the wind blows towards (degrees)
    pub(crate) wind_direction: f64,
    /// Wind speed (m/s)
    pub(crate) wind_speed: f64,
    /// Placement in a multi-grid run, not used by spread rules
    pub(crate) coord: GridCoord,
    /// Cached result of the last termination check
    pub(crate) ended: bool,
    pub(crate) export: ExportOptions,
    /// Ticks applied so far
    pub(crate) iteration: u32,
}

impl SimulationGrid {
    /// Wrap an existing tile array
    pub fn from_tiles(tiles: TileGrid, model: SpreadModel, wind: Wind) -> Self {
        let ended = !tiles.any_burning();
        SimulationGrid {
            tiles,
            model,
            wind_direction: wind.direction,
            wind_speed: wind.speed,
            coord: GridCoord::default(),
            ended,
            export: ExportOptions::default(),
            iteration: 0,
        }
    }

    /// Build a grid from a config.
    ///
    /// Tiles come from `terrain` when it is given and matches the configured
    /// size, otherwise they are drawn at random. Models that generate their
    /// own terrain smooth random tiles (a supplied description is used as is)
    /// and light their fixed seed tile; the others light the configured
    /// ignition point, if any.
    pub fn generate<P: ProbabilitySource + ?Sized>(
        config: &SimulationConfig,
        terrain: Option<&TerrainDescription>,
        coord: GridCoord,
        source: &mut P,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let size = config.grid_size;

        let loaded = terrain.and_then(|description| match description.to_tile_grid(size) {
            Ok(tiles) => Some(tiles),
            Err(e) => {
                warn!("Terrain description rejected, generating terrain instead: {e}");
                None
            }
        });
        let generates_terrain = config.model.generates_terrain();
        let tiles = match loaded {
            Some(tiles) => tiles,
            None if generates_terrain => {
                generate_terrain(&random_terrain(size, source), SmoothingPasses::default())
            }
            None => random_terrain(size, source),
        };

        let ignition = if generates_terrain {
            Some(config.terrain_seed_point())
        } else {
            config.ignition
        };

        let mut grid = Self::from_tiles(tiles, config.model, config.wind);
        grid.coord = coord;
        grid.export = config.export;
        if let Some(point) = ignition {
            grid.ignite(point);
        }

        info!(
            "Created {size}x{size} grid at ({}, {}) with {}, wind {:.0}° at {:.1} m/s",
            coord.x, coord.y, config.model, config.wind.direction, config.wind.speed
        );
        Ok(grid)
    }

    #[inline]
    pub fn tiles(&self) -> &TileGrid {
        &self.tiles
    }

    #[inline]
    pub fn tile(&self, p: Point) -> Option<&Tile> {
        self.tiles.get(p)
    }

    /// Side length in tiles
    #[inline]
    pub fn size(&self) -> usize {
        self.tiles.size()
    }

    pub fn model(&self) -> SpreadModel {
        self.model
    }

    pub fn wind(&self) -> Wind {
        Wind {
            direction: self.wind_direction,
            speed: self.wind_speed,
        }
    }

    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    pub fn set_coord(&mut self, coord: GridCoord) {
        self.coord = coord;
    }

    pub fn export_options(&self) -> ExportOptions {
        self.export
    }

    pub fn set_export_options(&mut self, export: ExportOptions) {
        self.export = export;
    }

    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Termination flag as of the last tick or construction
    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// View handed to the spread rule for one tick
    pub fn spread_context(&self) -> SpreadContext<'_> {
        SpreadContext {
            current: &self.tiles,
            wind_direction: self.wind_direction,
            wind_speed: self.wind_speed,
        }
    }

    /// Set the tile at `p` alight. Returns `false` when `p` is outside the grid.
    pub fn ignite(&mut self, p: Point) -> bool {
        match self.tiles.get_mut(p) {
            Some(tile) => {
                tile.ignite();
                self.ended = false;
                debug!("Ignited tile {p}");
                true
            }
            None => {
                warn!("Ignition point {p} is outside the {0}x{0} grid", self.size());
                false
            }
        }
    }

    /// Replace the current snapshot with the one computed by a tick
    pub(crate) fn install(&mut self, next: TileGrid) {
        debug_assert_eq!(next.size(), self.tiles.size());
        self.tiles = next;
        self.iteration += 1;
        self.ended = !self.tiles.any_burning();
    }

    /// Put every tile back to its original vegetation, clearing fire history
    pub fn restore_terrain(&mut self) {
        for tile in self.tiles.tiles_mut() {
            tile.restore();
        }
        self.ended = true;
        self.iteration = 0;
    }

    /// Tile count per current type; types with no tiles are absent
    pub fn census(&self) -> FxHashMap<TileType, usize> {
        let mut counts = FxHashMap::default();
        for tile in self.tiles.tiles() {
            *counts.entry(tile.current_type).or_insert(0) += 1;
        }
        counts
    }
}
