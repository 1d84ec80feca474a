//! Per-cell state vocabulary
//!
//! A tile carries its original vegetation class, its current class (which changes
//! as fire passes through), a small fire-age counter and an elevation scalar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Vegetation / fire class of a tile.
///
/// The discriminants are the integer codes used by terrain descriptions and the
/// tabular export, so they must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum TileType {
    #[default]
    Tree = 0,
    DenseTree = 1,
    Water = 2,
    Grass = 3,
    Fire = 4,
    Burnt = 5,
    Trench = 6,
}

impl TileType {
    /// Every variant, in code order
    pub const ALL: [TileType; 7] = [
        TileType::Tree,
        TileType::DenseTree,
        TileType::Water,
        TileType::Grass,
        TileType::Fire,
        TileType::Burnt,
        TileType::Trench,
    ];

    /// The variants random terrain is drawn from
    pub const VEGETATION: [TileType; 4] = [
        TileType::Tree,
        TileType::DenseTree,
        TileType::Water,
        TileType::Grass,
    ];

    /// Integer code of this variant
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether fire can spread into a tile of this type
    pub const fn is_combustible(self) -> bool {
        matches!(self, TileType::Tree | TileType::DenseTree | TileType::Grass)
    }

    /// Water, trenches and burnt ground never ignite again
    pub const fn is_terminal(self) -> bool {
        matches!(self, TileType::Water | TileType::Trench | TileType::Burnt)
    }
}

/// Error returned when an integer code does not name a tile type
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown tile type code {0}")]
pub struct UnknownTileCode(pub u8);

impl TryFrom<u8> for TileType {
    type Error = UnknownTileCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        TileType::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(UnknownTileCode(code))
    }
}

impl From<TileType> for u8 {
    fn from(tile_type: TileType) -> Self {
        tile_type.code()
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileType::Tree => "tree",
            TileType::DenseTree => "dense tree",
            TileType::Water => "water",
            TileType::Grass => "grass",
            TileType::Fire => "fire",
            TileType::Burnt => "burnt",
            TileType::Trench => "trench",
        };
        f.write_str(name)
    }
}

/// 8-bit RGB color
pub type Rgb = [u8; 3];

const TREE_COLOR: Rgb = [0, 150, 0];
const DENSE_TREE_COLOR: Rgb = [0, 90, 0];
const WATER_COLOR: Rgb = [0, 0, 255];
const GRASS_COLOR: Rgb = [0, 255, 0];
const FIRE_FRESH_COLOR: Rgb = [255, 0, 0];
const FIRE_ESTABLISHED_COLOR: Rgb = [180, 0, 0];
const BURNT_COLOR: Rgb = [60, 60, 60];
const TRENCH_COLOR: Rgb = [120, 80, 40];

/// Render color of a tile class at a given fire age.
///
/// Only fire changes intensity with age: a freshly ignited tile is brighter
/// than an established one.
pub const fn tile_color(tile_type: TileType, state: u8) -> Rgb {
    match tile_type {
        TileType::Tree => TREE_COLOR,
        TileType::DenseTree => DENSE_TREE_COLOR,
        TileType::Water => WATER_COLOR,
        TileType::Grass => GRASS_COLOR,
        TileType::Fire if state == 0 => FIRE_FRESH_COLOR,
        TileType::Fire => FIRE_ESTABLISHED_COLOR,
        TileType::Burnt => BURNT_COLOR,
        TileType::Trench => TRENCH_COLOR,
    }
}

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tile {
    /// Vegetation class the tile started with
    pub default_type: TileType,
    /// Class after fire history
    pub current_type: TileType,
    /// Fire age: 0 = just ignited, 1 = established
    pub state: u8,
    /// Elevation, only read by the slope-aware model
    pub altitude: f64,
}

impl Tile {
    /// Unburnt tile of the given class at zero altitude
    pub const fn new(tile_type: TileType) -> Self {
        Tile {
            default_type: tile_type,
            current_type: tile_type,
            state: 0,
            altitude: 0.0,
        }
    }

    /// Same as [`Tile::new`] with an elevation
    pub const fn with_altitude(tile_type: TileType, altitude: f64) -> Self {
        Tile {
            altitude,
            ..Tile::new(tile_type)
        }
    }

    #[inline]
    pub fn is_burning(&self) -> bool {
        self.current_type == TileType::Fire
    }

    /// Set the tile alight with a fresh fire age
    #[inline]
    pub fn ignite(&mut self) {
        self.current_type = TileType::Fire;
        self.state = 0;
    }

    /// Advance fire age by one step: fresh fire becomes established,
    /// established fire burns out
    #[inline]
    pub fn age_fire(&mut self, current_state: u8) {
        if current_state == 0 {
            self.state = current_state + 1;
        } else {
            self.current_type = TileType::Burnt;
            self.state = 0;
        }
    }

    /// Put the tile back to its original vegetation class
    pub fn restore(&mut self) {
        self.current_type = self.default_type;
        self.state = 0;
    }

    pub fn color(&self) -> Rgb {
        tile_color(self.current_type, self.state)
    }
}
