//! Raster export: one solid block of pixels per tile

use super::ExportError;
use crate::core_types::Point;
use crate::grid::SimulationGrid;
use image::RgbImage;
use rayon::prelude::*;
use std::path::Path;

/// Side length of exported images in pixels
pub const IMAGE_SIZE: u32 = 512;

/// Pixel geometry of a rendered grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Side length of the image in pixels
    pub image_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_size: IMAGE_SIZE,
        }
    }
}

impl RenderConfig {
    /// Side length of one tile's block for a grid of `grid_size` tiles
    pub fn tile_size(&self, grid_size: usize) -> u32 {
        (self.image_size / grid_size.max(1) as u32).max(1)
    }
}

/// Render the grid's current tiles. Pixels beyond the last whole tile stay black.
///
/// A zero image size is an [`ExportError::Render`].
pub fn render(grid: &SimulationGrid, config: &RenderConfig) -> Result<RgbImage, ExportError> {
    if config.image_size == 0 {
        return Err(ExportError::Render {
            width: 0,
            height: 0,
        });
    }
    let side = config.image_size as usize;
    let tile_size = config.tile_size(grid.size()) as usize;
    let mut buffer = vec![0u8; side * side * 3];

    buffer
        .par_chunks_mut(side * 3)
        .enumerate()
        .for_each(|(py, row)| {
            let y = (py / tile_size) as i32;
            for px in 0..side {
                let x = (px / tile_size) as i32;
                if let Some(tile) = grid.tile(Point::new(x, y)) {
                    row[px * 3..px * 3 + 3].copy_from_slice(&tile.color());
                }
            }
        });

    RgbImage::from_raw(config.image_size, config.image_size, buffer).ok_or(ExportError::Render {
        width: config.image_size,
        height: config.image_size,
    })
}

/// Render the grid and write it as a PNG
pub fn save_png(path: &Path, grid: &SimulationGrid, config: &RenderConfig) -> Result<(), ExportError> {
    let image = render(grid, config)?;
    image.save(path).map_err(|source| ExportError::Image {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Wind;
    use crate::core_types::{tile_color, Tile, TileType};
    use crate::grid::TileGrid;
    use crate::spread::SpreadModel;

    #[test]
    fn test_tile_size() {
        let config = RenderConfig::default();
        assert_eq!(config.tile_size(32), 16);
        assert_eq!(config.tile_size(4), 128);
        assert_eq!(config.tile_size(1000), 1);
    }

    #[test]
    fn test_blocks_follow_tile_colors() {
        let mut grid = SimulationGrid::from_tiles(
            TileGrid::filled(4, Tile::new(TileType::Water)),
            SpreadModel::UniformDirect,
            Wind::default(),
        );
        grid.ignite(Point::new(1, 2));
        let image = render(&grid, &RenderConfig::default()).unwrap();

        assert_eq!(image.dimensions(), (512, 512));
        let water = tile_color(TileType::Water, 0);
        let fire = tile_color(TileType::Fire, 0);
        assert_eq!(image.get_pixel(0, 0).0, water);
        // Tile (1, 2) covers x in 128..256, y in 256..384
        assert_eq!(image.get_pixel(128, 256).0, fire);
        assert_eq!(image.get_pixel(255, 383).0, fire);
        assert_eq!(image.get_pixel(256, 383).0, water);
    }

    #[test]
    fn test_leftover_pixels_are_black() {
        let grid = SimulationGrid::from_tiles(
            TileGrid::filled(3, Tile::new(TileType::Grass)),
            SpreadModel::UniformDirect,
            Wind::default(),
        );
        // 512 / 3 = 170, so 3 tiles cover 510 pixels
        let image = render(&grid, &RenderConfig::default()).unwrap();
        assert_eq!(image.get_pixel(509, 0).0, tile_color(TileType::Grass, 0));
        assert_eq!(image.get_pixel(511, 511).0, [0, 0, 0]);
    }

    #[test]
    fn test_zero_image_size_is_error() {
        let grid = SimulationGrid::from_tiles(
            TileGrid::filled(2, Tile::new(TileType::Grass)),
            SpreadModel::UniformDirect,
            Wind::default(),
        );
        assert!(matches!(
            render(&grid, &RenderConfig { image_size: 0 }),
            Err(ExportError::Render {
                width: 0,
                height: 0
            })
        ));
        let path = std::env::temp_dir().join(format!("firegrid-raster-empty-{}.png", std::process::id()));
        assert!(save_png(&path, &grid, &RenderConfig { image_size: 0 }).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_png() {
        let grid = SimulationGrid::from_tiles(
            TileGrid::filled(2, Tile::new(TileType::Tree)),
            SpreadModel::UniformDirect,
            Wind::default(),
        );
        let path = std::env::temp_dir().join(format!("firegrid-raster-{}.png", std::process::id()));
        save_png(&path, &grid, &RenderConfig { image_size: 16 }).unwrap();
        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (16, 16));
        assert_eq!(loaded.get_pixel(15, 15).0, tile_color(TileType::Tree, 0));
        std::fs::remove_file(&path).unwrap();
    }
}
