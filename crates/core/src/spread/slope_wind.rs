//! Slope- and wind-driven spread (model 3)
//!
//! Uses the Rothermel (1972) wind and slope factors in the dimensionless form
//! of the cellular model by Freire & DaCamara (2019), "Using cellular automata
//! to simulate wildfire propagation and to assist in fire management":
//!
//! ```text
//! φ     = sign(tan β) × C_s × tan²β + sign(U·d) × C_w × |U·d|^B
//! p     = 1 − (1 − p0)^(1 + φ)     if φ > −1
//! p     = p0 / |φ|                 otherwise
//! ```
//!
//! where `tan β` is the rise over run between the two tiles, `U` is the wind
//! vector and `d` the unit offset towards the neighbor. Only direct neighbors
//! are considered.

use super::{SpreadContext, SpreadRule};
use crate::core_types::{direct_neighbors, Point, TileType};
use crate::grid::TileGrid;
use crate::probability::ProbabilitySource;
use nalgebra::Vector2;

/// Wind exponent B
pub const WIND_EXPONENT: f64 = 0.46;
/// Wind coefficient C_w = 2.93 × 1.14^(−0.5)
pub const WIND_COEFFICIENT: f64 = 2.7441964279343636;
/// Slope coefficient C_s = 5.275 × β^(−0.3) with packing ratio β = 0.08
pub const SLOPE_COEFFICIENT: f64 = 11.253703479502601;
/// Ignition probability on flat ground without wind
pub const BASE_PROBABILITY: f64 = 1.0 / 8.0;
/// Per-tick probability that a burning tile ages
const AGING_PROBABILITY: f64 = 1.0 / 16.0;

/// Sign that maps zero to zero
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Wind vector for a compass bearing, `+y` north
#[inline]
fn wind_vector(wind_direction: f64, wind_speed: f64) -> Vector2<f64> {
    let bearing = wind_direction.to_radians();
    Vector2::new(bearing.sin(), bearing.cos()) * wind_speed
}

/// Combined slope and wind factor φ for spread from `from` to `to`
pub fn spread_factor(
    from: Point,
    to: Point,
    from_altitude: f64,
    to_altitude: f64,
    wind_direction: f64,
    wind_speed: f64,
) -> f64 {
    let offset = (to - from).to_vector();
    let distance = offset.norm();
    if distance == 0.0 {
        return 0.0;
    }

    let slope = (to_altitude - from_altitude) / distance;
    let wind = offset.dot(&wind_vector(wind_direction, wind_speed));

    sign(slope) * SLOPE_COEFFICIENT * slope * slope
        + sign(wind) * WIND_COEFFICIENT * wind.abs().powf(WIND_EXPONENT)
}

/// Ignition probability for a spread factor φ
pub fn ignition_probability(phi: f64) -> f64 {
    if phi <= -1.0 {
        BASE_PROBABILITY / phi.abs()
    } else {
        1.0 - (1.0 - BASE_PROBABILITY).powf(1.0 + phi)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlopeWindSpread;

impl SpreadRule for SlopeWindSpread {
    fn spread_from<P: ProbabilitySource + ?Sized>(
        &self,
        ctx: &SpreadContext<'_>,
        point: Point,
        next: &mut TileGrid,
        source: &mut P,
    ) {
        let Some(burning) = ctx.current.get(point).copied() else {
            return;
        };

        for neighbor in direct_neighbors(point) {
            let Some(tile) = ctx.current.get(neighbor) else {
                continue;
            };
            if !matches!(tile.current_type, TileType::Tree | TileType::Grass) {
                continue;
            }

            let phi = spread_factor(
                point,
                neighbor,
                burning.altitude,
                tile.altitude,
                ctx.wind_direction,
                ctx.wind_speed,
            );
            if source.chance(ignition_probability(phi)) {
                if let Some(target) = next.get_mut(neighbor) {
                    target.ignite();
                }
            }
        }

        if source.chance(AGING_PROBABILITY) {
            if let Some(tile) = next.get_mut(point) {
                tile.age_fire(burning.state);
            }
        }
    }
}
