//! Discrete-time driver
//!
//! One tick clones the current snapshot, lets the grid's spread model write
//! the clone, then swaps it in. Rules never observe a half-updated grid.

pub mod fleet;

pub use fleet::Fleet;

use crate::grid::SimulationGrid;
use crate::probability::ProbabilitySource;
use tracing::debug;

/// Advance `grid` by one tick
pub fn tick<P: ProbabilitySource + ?Sized>(grid: &mut SimulationGrid, source: &mut P) {
    let next = grid.model.compute_next(&grid.spread_context(), source);
    grid.install(next);
    debug!(
        "Grid ({}, {}) tick {}: ended={}",
        grid.coord.x, grid.coord.y, grid.iteration, grid.ended
    );
}

/// True when no tile is burning
pub fn is_ended(grid: &SimulationGrid) -> bool {
    !grid.tiles().any_burning()
}

/// Tick until the fire is out or `max_iterations` ticks have run.
///
/// Returns the number of ticks applied.
pub fn run_to_end<P: ProbabilitySource + ?Sized>(
    grid: &mut SimulationGrid,
    source: &mut P,
    max_iterations: Option<u32>,
) -> u32 {
    let mut ticks = 0;
    while !is_ended(grid) && max_iterations.is_none_or(|max| ticks < max) {
        tick(grid, source);
        ticks += 1;
    }
    ticks
}
