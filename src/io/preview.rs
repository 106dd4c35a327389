//! Level preview thumbnails
//!
//! One pixel per cell: cell `(x, y)` lands at image column `y`, row `x`.
//! Walls are transparent and every other cell is white.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::io::error::{ArenaError, Result};
use crate::spatial::grid::TileGrid;

/// Colour of a wall cell
pub const WALL_COLOUR: Rgba<u8> = Rgba([0, 0, 0, 0]);
/// Colour of every non-wall cell
pub const FLOOR_COLOUR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Render the preview image of a grid
pub fn render_preview(grid: &TileGrid) -> RgbaImage {
    let (rows, cols) = grid.dimensions();
    RgbaImage::from_fn(cols as u32, rows as u32, |column, row| {
        match grid.tile([row as usize, column as usize]) {
            Some(tile) if !tile.closed => FLOOR_COLOUR,
            _ => WALL_COLOUR,
        }
    })
}

/// Render a grid preview and write it as a PNG file
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_preview_png(grid: &TileGrid, output_path: &Path) -> Result<()> {
    let img = render_preview(grid);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ArenaError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| ArenaError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
