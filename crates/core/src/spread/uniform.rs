//! Uniform-odds spread (models 0 and 1)
//!
//! Each tree or grass neighbor of a burning tile ignites with a fixed `1/n`
//! chance; the burning tile itself ages with a fixed `1/n` chance.

use super::{SpreadContext, SpreadRule};
use crate::core_types::{diagonal_neighbors, direct_neighbors, Point, TileType};
use crate::grid::TileGrid;
use crate::probability::ProbabilitySource;

/// Odds (as `1/n`) that a neighbor of each class catches fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnOdds {
    pub tree: u32,
    pub grass: u32,
}

impl BurnOdds {
    fn one_in_for(self, tile_type: TileType) -> Option<u32> {
        match tile_type {
            TileType::Tree => Some(self.tree),
            TileType::Grass => Some(self.grass),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformSpread {
    pub direct: BurnOdds,
    /// `None` when diagonal neighbors are not considered
    pub diagonal: Option<BurnOdds>,
    /// Odds (as `1/n`) that a burning tile ages this tick
    pub aging: u32,
}

impl UniformSpread {
    /// Model 0: direct neighbors only
    pub const fn direct() -> Self {
        UniformSpread {
            direct: BurnOdds { tree: 8, grass: 8 },
            diagonal: None,
            aging: 16,
        }
    }

    /// Model 1: direct neighbors plus weaker diagonal spread
    pub const fn moore() -> Self {
        UniformSpread {
            direct: BurnOdds { tree: 8, grass: 8 },
            diagonal: Some(BurnOdds { tree: 16, grass: 16 }),
            aging: 16,
        }
    }
}

fn ignite_neighbors<P: ProbabilitySource + ?Sized>(
    current: &TileGrid,
    next: &mut TileGrid,
    neighbors: [Point; 4],
    odds: BurnOdds,
    source: &mut P,
) {
    for neighbor in neighbors {
        let Some(tile) = current.get(neighbor) else {
            continue;
        };
        let Some(one_in) = odds.one_in_for(tile.current_type) else {
            continue;
        };
        if source.one_in(one_in) {
            if let Some(target) = next.get_mut(neighbor) {
                target.ignite();
            }
        }
    }
}

impl SpreadRule for UniformSpread {
    fn spread_from<P: ProbabilitySource + ?Sized>(
        &self,
        ctx: &SpreadContext<'_>,
        point: Point,
        next: &mut TileGrid,
        source: &mut P,
    ) {
        ignite_neighbors(ctx.current, next, direct_neighbors(point), self.direct, source);
        if let Some(diagonal) = self.diagonal {
            ignite_neighbors(ctx.current, next, diagonal_neighbors(point), diagonal, source);
        }

        let Some(state) = ctx.current.get(point).map(|t| t.state) else {
            return;
        };
        if source.one_in(self.aging) {
            if let Some(tile) = next.get_mut(point) {
                tile.age_fire(state);
            }
        }
    }
}
