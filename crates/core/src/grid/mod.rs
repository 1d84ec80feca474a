//! Grid storage, terrain sources and the simulation grid

pub mod simulation_grid;
pub mod terrain;
pub mod tile_grid;

// Re-export main types
pub use simulation_grid::{GridCoord, SimulationGrid};
pub use terrain::{
    generate_terrain, random_terrain, SmoothingPasses, TerrainDescription, TerrainError,
};
pub use tile_grid::TileGrid;
