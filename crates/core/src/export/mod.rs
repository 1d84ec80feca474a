//! Snapshot exporters
//!
//! Exporters only read finished grids. A failed export is reported and
//! skipped; it never stops the simulation.

pub mod csv;
pub mod raster;

pub use raster::{render, save_png, RenderConfig, IMAGE_SIZE};

use crate::grid::SimulationGrid;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("pixel buffer does not fit a {width}x{height} image")]
    Render { width: u32, height: u32 },
}

/// File name of the shared tabular export
pub const CSV_FILE_NAME: &str = "grids.csv";

/// Writes finished grids into an output directory according to each grid's
/// export toggles
#[derive(Debug, Clone)]
pub struct Exporter {
    out_dir: PathBuf,
    render: RenderConfig,
}

impl Exporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Exporter {
            out_dir: out_dir.into(),
            render: RenderConfig::default(),
        }
    }

    pub fn with_render_config(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    pub fn csv_path(&self) -> PathBuf {
        self.out_dir.join(CSV_FILE_NAME)
    }

    pub fn png_path(&self, grid: &SimulationGrid) -> PathBuf {
        let coord = grid.coord();
        self.out_dir
            .join(format!("grid_{}_{}.png", coord.x, coord.y))
    }

    /// Export `grid` as its toggles request. Returns the number of exports
    /// that failed; each failure is logged.
    pub fn export(&self, grid: &SimulationGrid) -> usize {
        let options = grid.export_options();
        let mut results = Vec::new();
        if options.csv {
            results.push(csv::append_grid(&self.csv_path(), grid));
        }
        if options.png {
            results.push(save_png(&self.png_path(grid), grid, &self.render));
        }

        let mut failures = 0;
        for result in results {
            if let Err(e) = result {
                warn!("Export skipped: {e}");
                failures += 1;
            }
        }
        if options.any() && failures == 0 {
            let coord = grid.coord();
            info!(
                "Exported grid ({}, {}) after {} ticks",
                coord.x,
                coord.y,
                grid.iteration()
            );
        }
        failures
    }
}
