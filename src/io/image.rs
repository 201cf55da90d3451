//! PNG export of the current generation

use crate::engine::grid::{Cell, DEAD, Grid};
use crate::io::configuration::{ALIVE_COLOR, DEAD_COLOR};
use crate::io::error::{LifeError, Result, invalid_parameter};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Render the current generation with every cell drawn as a `cell_size` square
///
/// # Errors
///
/// Returns `InvalidParameter` if `cell_size` is zero or the image would be too
/// large to address
pub fn render_grid(grid: &Grid, cell_size: u32) -> Result<RgbaImage> {
    render_cells(grid.cells(), grid.width(), grid.height(), cell_size)
}

/// Render row-major `cells` of a `width` by `height` grid
///
/// # Errors
///
/// Returns `InvalidParameter` if `cell_size` is zero or the image would be too
/// large to address
pub fn render_cells(cells: &[Cell], width: usize, height: usize, cell_size: u32) -> Result<RgbaImage> {
    if cell_size == 0 {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &"must be at least one pixel",
        ));
    }
    let image_width = u32::try_from(width)
        .ok()
        .and_then(|w| w.checked_mul(cell_size));
    let image_height = u32::try_from(height)
        .ok()
        .and_then(|h| h.checked_mul(cell_size));
    let (Some(image_width), Some(image_height)) = (image_width, image_height) else {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &"rendered image would exceed u32 pixels per side",
        ));
    };

    Ok(RgbaImage::from_fn(image_width, image_height, |px, py| {
        let index = (py / cell_size) as usize * width + (px / cell_size) as usize;
        let cell = cells.get(index).copied().unwrap_or(DEAD);
        Rgba(if cell == DEAD { DEAD_COLOR } else { ALIVE_COLOR })
    }))
}

/// Export the current generation as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - `cell_size` is zero or the image would be too large
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, cell_size: u32, output_path: &Path) -> Result<()> {
    let img = render_grid(grid, cell_size)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LifeError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| LifeError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
