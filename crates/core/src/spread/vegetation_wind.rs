//! Vegetation- and wind-weighted spread (model 2)
//!
//! Follows the cellular automaton of Alexandridis et al. (2008), "A cellular
//! automata model for forest fire spread prediction: The case of the wildfire
//! that swept through Spetses Island in 1990".
//!
//! # Formula
//! ```text
//! p_burn = p_h × (1 + p_veg) × (1 + p_den) × p_w × p_s
//! p_w    = exp(c1 × V) × exp(V × c2 × (cos(wind_direction − θ) − 1))
//! p_s    = exp(a × slope_angle)
//! ```
//!
//! A freshly ignited tile gets one chance to spread to each neighbor, then
//! ages deterministically: it is established on the next tick and burnt out
//! on the one after.

use super::{SpreadContext, SpreadRule};
use crate::core_types::{diagonal_neighbors, direct_neighbors, octant_bearing, Point, TileType};
use crate::grid::TileGrid;
use crate::probability::ProbabilitySource;

/// Base ignition probability for a neighbor of a burning tile
const P_H: f64 = 0.34;
/// Wind speed coefficient c1
const WIND_C1: f64 = 0.045;
/// Wind alignment coefficient c2
const WIND_C2: f64 = 0.131;
/// Slope coefficient a
const SLOPE_A: f64 = 0.078;
/// Rolls are drawn at this resolution to emulate a continuous draw
const ROLL_RESOLUTION: u32 = 1_000_000;

/// Vegetation-type correction p_veg
fn vegetation_factor(tile_type: TileType) -> f64 {
    match tile_type {
        TileType::Tree | TileType::DenseTree => 0.3,
        TileType::Grass => -0.1,
        TileType::Trench => -0.55,
        _ => -1.0,
    }
}

/// Vegetation-density correction p_den
fn density_factor(tile_type: TileType) -> f64 {
    if tile_type == TileType::DenseTree {
        0.3
    } else {
        0.0
    }
}

/// Wind correction p_w for spread towards bearing `theta`
fn wind_factor(wind_speed: f64, wind_direction: f64, theta: f64) -> f64 {
    let alignment = (wind_direction - theta).to_radians().cos() - 1.0;
    (WIND_C1 * wind_speed).exp() * (wind_speed * WIND_C2 * alignment).exp()
}

/// Slope correction p_s. The grid carries no slope angle for this model, so it
/// is always evaluated at 0.
fn slope_factor(slope_angle: f64) -> f64 {
    (SLOPE_A * slope_angle).exp()
}

/// Probability that fire at `source_point` ignites `target_type` at
/// `target_point`.
///
/// Returns 0 when the two points are not neighbors.
pub fn burn_probability(
    target_type: TileType,
    target_point: Point,
    source_point: Point,
    wind_direction: f64,
    wind_speed: f64,
) -> f64 {
    let Some(theta) = octant_bearing(target_point - source_point) else {
        return 0.0;
    };

    P_H * (1.0 + vegetation_factor(target_type))
        * (1.0 + density_factor(target_type))
        * wind_factor(wind_speed, wind_direction, theta)
        * slope_factor(0.0)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VegetationWindSpread;

impl SpreadRule for VegetationWindSpread {
    fn spread_from<P: ProbabilitySource + ?Sized>(
        &self,
        ctx: &SpreadContext<'_>,
        point: Point,
        next: &mut TileGrid,
        source: &mut P,
    ) {
        let Some(state) = ctx.current.get(point).map(|t| t.state) else {
            return;
        };

        if state == 0 {
            let neighbors = direct_neighbors(point)
                .into_iter()
                .chain(diagonal_neighbors(point));
            for neighbor in neighbors {
                let Some(tile) = ctx.current.get(neighbor) else {
                    continue;
                };
                if !tile.current_type.is_combustible() {
                    continue;
                }

                let p_burn = burn_probability(
                    tile.current_type,
                    neighbor,
                    point,
                    ctx.wind_direction,
                    ctx.wind_speed,
                );
                let threshold = (p_burn * f64::from(ROLL_RESOLUTION)) as u32;
                if source.draw_uniform_int(ROLL_RESOLUTION) < threshold {
                    if let Some(target) = next.get_mut(neighbor) {
                        target.ignite();
                    }
                }
            }
        }

        if let Some(tile) = next.get_mut(point) {
            tile.age_fire(state);
        }
    }
}
