//! Grid coordinates and the neighbor resolver
//!
//! Neighbor candidates may fall outside the grid; callers filter them with
//! [`is_valid`] before touching any tile.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Integer tile coordinate, `+x` east and `+y` north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Offset as a real vector, for the physical model's geometry
    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(f64::from(self.x), f64::from(self.y))
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const DIRECT_OFFSETS: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
];

const DIAGONAL_OFFSETS: [Point; 4] = [
    Point::new(-1, -1),
    Point::new(1, -1),
    Point::new(-1, 1),
    Point::new(1, 1),
];

/// The four edge-sharing neighbors, in west, east, south, north order
#[inline]
pub fn direct_neighbors(p: Point) -> [Point; 4] {
    DIRECT_OFFSETS.map(|offset| p + offset)
}

/// The four corner-sharing neighbors
#[inline]
pub fn diagonal_neighbors(p: Point) -> [Point; 4] {
    DIAGONAL_OFFSETS.map(|offset| p + offset)
}

/// Whether `p` lies inside a `size × size` grid
#[inline]
pub fn is_valid(p: Point, size: usize) -> bool {
    let inside = |v: i32| usize::try_from(v).is_ok_and(|v| v < size);
    inside(p.x) && inside(p.y)
}

/// Compass bearing of a unit neighbor offset, in degrees.
///
/// North is `(0, +1)` and bearings grow clockwise. Returns `None` for anything
/// that is not one of the eight canonical offsets.
pub fn octant_bearing(offset: Point) -> Option<f64> {
    let bearing = match (offset.x, offset.y) {
        (0, 1) => 0.0,
        (1, 1) => 45.0,
        (1, 0) => 90.0,
        (1, -1) => 135.0,
        (0, -1) => 180.0,
        (-1, -1) => 225.0,
        (-1, 0) => 270.0,
        (-1, 1) => 315.0,
        _ => return None,
    };
    Some(bearing)
}
