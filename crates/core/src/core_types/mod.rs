//! Core data types shared by the grid, the spread models and the exporters

pub mod point;
pub mod tile;

pub use point::{diagonal_neighbors, direct_neighbors, is_valid, octant_bearing, Point};
pub use tile::{tile_color, Rgb, Tile, TileType, UnknownTileCode};
