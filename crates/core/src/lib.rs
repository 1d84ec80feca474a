//! Tile-grid wildfire spread simulation
//!
//! Simulates fire propagating over a square grid of vegetation tiles under four
//! interchangeable spread models of increasing physical fidelity:
//!
//! - **Model 0**: uniform odds, 4 direct neighbors
//! - **Model 1**: uniform odds, 4 direct + 4 diagonal neighbors
//! - **Model 2**: vegetation- and wind-weighted (Alexandridis et al. 2008)
//! - **Model 3**: slope and wind physical model (Rothermel 1972 factors)
//!
//! Each tick reads the current snapshot and writes a fresh one, so every
//! transition within a tick is applied simultaneously.
//!
//! ```
//! use firegrid_core::{simulation, Point, RandomSource, SimulationConfig, SimulationGrid};
//! use firegrid_core::grid::GridCoord;
//!
//! let config = SimulationConfig {
//!     grid_size: 16,
//!     ignition: Some(Point::new(8, 8)),
//!     ..SimulationConfig::default()
//! };
//! let mut source = RandomSource::seeded(42);
//! let mut grid = SimulationGrid::generate(&config, None, GridCoord::default(), &mut source).unwrap();
//! simulation::run_to_end(&mut grid, &mut source, Some(10_000));
//! assert!(simulation::is_ended(&grid));
//! ```

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod export;
pub mod grid;
pub mod probability;
pub mod simulation;
pub mod spread;

// Re-export core types
pub use core_types::{Point, Tile, TileType};

pub use config::{ConfigError, ExportOptions, SimulationConfig, Wind, DEFAULT_GRID_SIZE};
pub use grid::{SimulationGrid, TerrainDescription, TileGrid};
pub use probability::{AlwaysSucceed, ProbabilitySource, RandomSource, ScriptedSource};
pub use simulation::Fleet;
pub use spread::SpreadModel;
