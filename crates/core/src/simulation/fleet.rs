//! Several independent grids run side by side
//!
//! Each grid owns its random source, seeded from the run seed and the grid's
//! position in the fleet, so ticking the grids in parallel gives the same
//! result as ticking them one after another.

use super::{is_ended, tick};
use crate::config::{ConfigError, SimulationConfig};
use crate::grid::{GridCoord, SimulationGrid, TerrainDescription};
use crate::probability::RandomSource;
use rayon::prelude::*;
use tracing::info;

struct FleetMember {
    grid: SimulationGrid,
    source: RandomSource,
    finished: bool,
}

impl FleetMember {
    fn check_finished(&mut self, max_iterations: Option<u32>) -> bool {
        self.finished =
            is_ended(&self.grid) || max_iterations.is_some_and(|max| self.grid.iteration() >= max);
        self.finished
    }
}

pub struct Fleet {
    members: Vec<FleetMember>,
    max_iterations: Option<u32>,
}

impl Fleet {
    /// Build `config.grid_count` grids laid out on a square-ish lattice
    pub fn new(
        config: &SimulationConfig,
        terrain: Option<&TerrainDescription>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let columns = lattice_columns(config.grid_count);

        let members = (0..config.grid_count)
            .map(|index| -> Result<FleetMember, ConfigError> {
                let mut source = match config.seed {
                    Some(seed) => RandomSource::seeded(seed.wrapping_add(index as u64)),
                    None => RandomSource::from_entropy(),
                };
                let coord = GridCoord::new((index % columns) as u32, (index / columns) as u32);
                let grid = SimulationGrid::generate(config, terrain, coord, &mut source)?;
                Ok(FleetMember {
                    grid,
                    source,
                    finished: false,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut fleet = Fleet {
            members,
            max_iterations: config.max_iterations,
        };
        let max_iterations = fleet.max_iterations;
        for member in &mut fleet.members {
            member.check_finished(max_iterations);
        }

        info!(
            "Fleet of {} grid(s) in {} column(s), {} still burning",
            fleet.members.len(),
            columns,
            fleet.running()
        );
        Ok(fleet)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn grid(&self, index: usize) -> Option<&SimulationGrid> {
        self.members.get(index).map(|m| &m.grid)
    }

    pub fn grids(&self) -> impl Iterator<Item = &SimulationGrid> + '_ {
        self.members.iter().map(|m| &m.grid)
    }

    /// Number of grids that have neither ended nor hit the iteration cap
    pub fn running(&self) -> usize {
        self.members.iter().filter(|m| !m.finished).count()
    }

    pub fn is_finished(&self) -> bool {
        self.running() == 0
    }

    /// Grids that have ended or hit the iteration cap
    pub fn finished(&self) -> impl Iterator<Item = &SimulationGrid> + '_ {
        self.members.iter().filter(|m| m.finished).map(|m| &m.grid)
    }

    /// Tick every running grid once, in parallel.
    ///
    /// Returns the indices of the grids that finished during this tick.
    pub fn tick_all(&mut self) -> Vec<usize> {
        let max_iterations = self.max_iterations;
        self.members
            .par_iter_mut()
            .enumerate()
            .filter(|(_, member)| !member.finished)
            .filter_map(|(index, member)| {
                tick(&mut member.grid, &mut member.source);
                member.check_finished(max_iterations).then_some(index)
            })
            .collect()
    }

    /// Tick until every grid has finished, calling `on_finished` once per
    /// grid as it finishes (including grids that never burned).
    pub fn run(&mut self, mut on_finished: impl FnMut(&SimulationGrid)) {
        for grid in self.finished() {
            on_finished(grid);
        }
        while !self.is_finished() {
            for index in self.tick_all() {
                on_finished(&self.members[index].grid);
            }
        }
        info!("All grids finished");
    }
}

/// Columns of the smallest square lattice holding `count` grids
fn lattice_columns(count: usize) -> usize {
    let mut columns = 1;
    while columns * columns < count {
        columns += 1;
    }
    columns
}
