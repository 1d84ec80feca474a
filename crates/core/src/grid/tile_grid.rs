//! Square tile array in row-major flat storage
//!
//! A `TileGrid` is one snapshot of the world. The driver never mutates the
//! snapshot it reads from during a tick; it clones it, writes the clone and
//! swaps it in.

use crate::core_types::{is_valid, Point, Tile, TileType};
use serde::{Deserialize, Serialize};

/// `size × size` tiles, index `y * size + x`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    size: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Grid filled with copies of `tile`
    pub fn filled(size: usize, tile: Tile) -> Self {
        TileGrid {
            size,
            tiles: vec![tile; size * size],
        }
    }

    /// Build a grid by evaluating `f` at every point, row by row
    pub fn from_fn(size: usize, mut f: impl FnMut(Point) -> Tile) -> Self {
        let mut tiles = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                tiles.push(f(Point::new(x as i32, y as i32)));
            }
        }
        TileGrid { size, tiles }
    }

    /// Side length in tiles
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of tiles (`size²`)
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        is_valid(p, self.size)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        self.contains(p)
            .then(|| p.y as usize * self.size + p.x as usize)
    }

    /// Tile at `p`, `None` when out of bounds
    #[inline]
    pub fn get(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    #[inline]
    pub fn get_mut(&mut self, p: Point) -> Option<&mut Tile> {
        self.index(p).map(move |i| &mut self.tiles[i])
    }

    /// Point of the tile at a flat index
    #[inline]
    pub fn point_of(&self, index: usize) -> Point {
        Point::new((index % self.size) as i32, (index / self.size) as i32)
    }

    /// Tiles with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (self.point_of(i), tile))
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Number of tiles whose current type is `tile_type`
    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.current_type == tile_type)
            .count()
    }

    pub fn any_burning(&self) -> bool {
        self.tiles.iter().any(Tile::is_burning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_indexing() {
        let grid = TileGrid::from_fn(3, |p| {
            Tile::with_altitude(TileType::Grass, f64::from(p.x + 10 * p.y))
        });
        assert_eq!(grid.len(), 9);
        assert_eq!(grid.tiles()[5].altitude, 12.0);
        assert_eq!(grid.point_of(5), Point::new(2, 1));
        assert_eq!(grid.get(Point::new(2, 1)).map(|t| t.altitude), Some(12.0));
    }

    #[test]
    fn test_out_of_bounds_access_is_none() {
        let mut grid = TileGrid::filled(2, Tile::new(TileType::Tree));
        assert!(grid.get(Point::new(2, 0)).is_none());
        assert!(grid.get(Point::new(-1, 1)).is_none());
        assert!(grid.get_mut(Point::new(0, 2)).is_none());
    }

    #[test]
    fn test_clone_does_not_alias() {
        let grid = TileGrid::filled(2, Tile::new(TileType::Tree));
        let mut next = grid.clone();
        if let Some(tile) = next.get_mut(Point::new(1, 1)) {
            tile.ignite();
        }
        assert_eq!(grid.count(TileType::Fire), 0);
        assert_eq!(next.count(TileType::Fire), 1);
        assert!(next.any_burning());
        assert!(!grid.any_burning());
    }
}
