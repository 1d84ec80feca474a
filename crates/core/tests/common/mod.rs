//! Shared helpers for integration tests

#![allow(dead_code)]

use firegrid_core::core_types::{diagonal_neighbors, direct_neighbors};
use firegrid_core::{Point, SimulationGrid, SpreadModel, Tile, TileGrid, TileType, Wind};

/// Route `tracing` output through the test harness so it shows on failure
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("firegrid_core=debug")
        .with_test_writer()
        .try_init();
}

/// Grid of one vegetation type with fresh fires at `fires`
pub fn uniform_grid(
    model: SpreadModel,
    size: usize,
    tile_type: TileType,
    fires: &[Point],
    wind: Wind,
) -> SimulationGrid {
    let mut grid = SimulationGrid::from_tiles(TileGrid::filled(size, Tile::new(tile_type)), model, wind);
    for &p in fires {
        assert!(grid.ignite(p));
    }
    grid
}

/// Points a burning tile at `p` can influence under `model`
pub fn influence_set(model: SpreadModel, p: Point) -> Vec<Point> {
    let mut points = vec![p];
    points.extend(direct_neighbors(p));
    if matches!(model, SpreadModel::UniformMoore | SpreadModel::VegetationWind) {
        points.extend(diagonal_neighbors(p));
    }
    points
}

/// `(current_type, state)` of the tile at `(x, y)`
pub fn state_at(grid: &SimulationGrid, x: i32, y: i32) -> (TileType, u8) {
    let tile = grid.tile(Point::new(x, y)).expect("point inside grid");
    (tile.current_type, tile.state)
}
