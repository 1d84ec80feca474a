//! Tabular export
//!
//! Each finished grid appends one block: a separator line, then one line per
//! `x` listing `default-current-state,` for every `y`.

use super::ExportError;
use crate::core_types::Point;
use crate::grid::SimulationGrid;
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::Path;

/// First line of every exported block
pub const BLOCK_SEPARATOR: &str = "---";

/// Text block for one grid
pub fn format_block(grid: &SimulationGrid) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size * size * 7 + BLOCK_SEPARATOR.len() + 1);
    out.push_str(BLOCK_SEPARATOR);
    out.push('\n');

    for x in 0..size {
        for y in 0..size {
            if let Some(tile) = grid.tile(Point::new(x as i32, y as i32)) {
                out.push_str(&format!(
                    "{}-{}-{},",
                    tile.default_type.code(),
                    tile.current_type.code(),
                    tile.state
                ));
            }
        }
        out.push('\n');
    }
    out
}

/// Append the grid's block to `path`, creating the file if needed
pub fn append_grid(path: &Path, grid: &SimulationGrid) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    file.write_all(format_block(grid).as_bytes())
        .map_err(io_error)
}
