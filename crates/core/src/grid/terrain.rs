//! Terrain sources: descriptions loaded from JSON, random generation and
//! majority-vote smoothing
//!
//! A terrain description looks like
//!
//! ```json
//! { "grid": [[0, 3, 3], [2, 3, 0], [0, 0, 1]], "altitude": [[0.0, 1.0, 2.0], ...] }
//! ```
//!
//! where `grid[i][j]` is the tile type code of tile `(x = i, y = j)`. The
//! `altitude` matrix is optional and uses the same layout.

use super::tile_grid::TileGrid;
use crate::core_types::{diagonal_neighbors, direct_neighbors, Point, Tile, TileType};
use crate::probability::ProbabilitySource;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("failed to read terrain description from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse terrain description: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("terrain {field} has {found} rows, expected {expected}")]
    RowCount {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("terrain {field} row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        field: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Initial vegetation (and optionally elevation) of every tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainDescription {
    pub grid: Vec<Vec<TileType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<Vec<Vec<f64>>>,
}

impl TerrainDescription {
    pub fn from_json_str(json: &str) -> Result<Self, TerrainError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, TerrainError> {
        let json = std::fs::read_to_string(path).map_err(|source| TerrainError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load a description if the file exists.
    ///
    /// A missing file is not an error; an unreadable or malformed one is
    /// reported and treated as missing, so callers fall back to random terrain.
    pub fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            debug!("No terrain description at {:?}, generating terrain", path);
            return None;
        }
        match Self::from_path(path) {
            Ok(description) => {
                info!("Loaded terrain description from {:?}", path);
                Some(description)
            }
            Err(e) => {
                warn!("Ignoring terrain description: {e}");
                None
            }
        }
    }

    /// Build the tile array, checking every matrix is `size × size`
    pub fn to_tile_grid(&self, size: usize) -> Result<TileGrid, TerrainError> {
        check_square("grid", &self.grid, size)?;
        if let Some(altitude) = &self.altitude {
            check_square("altitude", altitude, size)?;
        }

        Ok(TileGrid::from_fn(size, |p| {
            let (i, j) = (p.x as usize, p.y as usize);
            let altitude = self
                .altitude
                .as_ref()
                .map_or(0.0, |rows| rows[i][j]);
            Tile::with_altitude(self.grid[i][j], altitude)
        }))
    }
}

fn check_square<T>(field: &'static str, rows: &[Vec<T>], size: usize) -> Result<(), TerrainError> {
    if rows.len() != size {
        return Err(TerrainError::RowCount {
            field,
            expected: size,
            found: rows.len(),
        });
    }
    for (row, columns) in rows.iter().enumerate() {
        if columns.len() != size {
            return Err(TerrainError::ColumnCount {
                field,
                row,
                expected: size,
                found: columns.len(),
            });
        }
    }
    Ok(())
}

/// Terrain with each tile drawn uniformly from the four vegetation classes
pub fn random_terrain<P: ProbabilitySource + ?Sized>(size: usize, source: &mut P) -> TileGrid {
    TileGrid::from_fn(size, |_| {
        let pick = source.draw_uniform_int(TileType::VEGETATION.len() as u32) as usize;
        Tile::new(TileType::VEGETATION[pick])
    })
}

/// Number of majority-vote smoothing passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingPasses {
    pub outer: u32,
    pub inner: u32,
}

impl Default for SmoothingPasses {
    fn default() -> Self {
        Self { outer: 6, inner: 5 }
    }
}

impl SmoothingPasses {
    pub fn total(&self) -> u32 {
        self.outer * self.inner
    }
}

/// Smooth a terrain into contiguous regions of water, grass and trees.
///
/// Each pass reads one snapshot and writes the next. A tile becomes water if
/// water is strictly the most frequent of water/grass/tree among itself and
/// its in-bounds 8-neighborhood, otherwise grass if grass strictly outnumbers
/// tree, otherwise tree. Fire state is cleared, altitude is kept.
pub fn generate_terrain(seed: &TileGrid, passes: SmoothingPasses) -> TileGrid {
    let mut current = seed.clone();
    for outer in 0..passes.outer {
        for _ in 0..passes.inner {
            current = smoothing_pass(&current);
        }
        debug!(
            "Terrain smoothing round {}/{}: water={} grass={} tree={}",
            outer + 1,
            passes.outer,
            current.count(TileType::Water),
            current.count(TileType::Grass),
            current.count(TileType::Tree)
        );
    }
    current
}

fn smoothing_pass(current: &TileGrid) -> TileGrid {
    TileGrid::from_fn(current.size(), |p| {
        let (mut water, mut grass, mut tree) = (0u32, 0u32, 0u32);
        let neighborhood = std::iter::once(p)
            .chain(direct_neighbors(p))
            .chain(diagonal_neighbors(p));
        for tile in neighborhood.filter_map(|q: Point| current.get(q)) {
            match tile.current_type {
                TileType::Water => water += 1,
                TileType::Grass => grass += 1,
                TileType::Tree => tree += 1,
                _ => {}
            }
        }

        let next_type = if water > grass && water > tree {
            TileType::Water
        } else if grass > tree {
            TileType::Grass
        } else {
            TileType::Tree
        };
        let altitude = current.get(p).map_or(0.0, |t| t.altitude);
        Tile::with_altitude(next_type, altitude)
    })
}
