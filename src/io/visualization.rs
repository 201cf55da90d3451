//! Generation capture and GIF generation for run visualization

use crate::engine::grid::{Cell, Grid};
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{LifeError, Result, invalid_dimensions, invalid_parameter};
use crate::io::image::render_cells;
use image::{Delay, Frame};
use std::path::Path;

/// Captures one snapshot of the grid per recorded generation
///
/// All snapshots share the dimensions of the first one, so a run that resizes
/// its grid must start a new capture.
#[derive(Debug, Clone)]
pub struct GenerationCapture {
    frames: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl GenerationCapture {
    /// Start a capture for a grid of the given size
    pub fn new(width: usize, height: usize, expected_generations: usize) -> Self {
        Self {
            frames: Vec::with_capacity(expected_generations.saturating_add(1)),
            width,
            height,
        }
    }

    /// Start a capture sized for `grid`, holding its current generation
    pub fn starting_from(grid: &Grid, expected_generations: usize) -> Self {
        let mut capture = Self::new(grid.width(), grid.height(), expected_generations);
        capture.frames.push(grid.cells().to_vec());
        capture
    }

    /// Record the current generation of `grid`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the grid size differs from the capture's
    pub fn record(&mut self, grid: &Grid) -> Result<()> {
        if grid.width() != self.width || grid.height() != self.height {
            return Err(invalid_dimensions(
                grid.width(),
                grid.height(),
                &format!("capture expects {}x{}", self.width, self.height),
            ));
        }
        self.frames.push(grid.cells().to_vec());
        Ok(())
    }

    /// Number of snapshots recorded so far
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured generations as a GIF with automatic frame skipping
    ///
    /// If `frame_delay_ms` is shorter than viewers reliably honor, only every
    /// n-th generation is kept so the apparent speed stays the same. The last
    /// generation is always included and held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No generations were captured
    /// - `cell_size` or `frame_delay_ms` is zero, or the frames would be too large
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32, cell_size: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(invalid_parameter(
                "capture",
                &0,
                &"no generations captured for visualization",
            ));
        }
        if frame_delay_ms == 0 {
            return Err(invalid_parameter(
                "frame_delay_ms",
                &frame_delay_ms,
                &"must be positive",
            ));
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms)
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor as usize, cell_size)?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LifeError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| LifeError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| LifeError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(
        &self,
        delay_ms: u32,
        skip_factor: usize,
        cell_size: u32,
    ) -> Result<Vec<Frame>> {
        let mut frames = Vec::new();
        let last = self.frames.len().saturating_sub(1);

        for (index, cells) in self.frames.iter().enumerate() {
            if index % skip_factor == 0 || index == last {
                frames.push(self.render_frame(cells, delay_ms, cell_size)?);
            }
        }

        // Final generation stays on screen longer
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms * 25, 1),
            ));
        }

        Ok(frames)
    }

    fn render_frame(&self, cells: &[Cell], delay_ms: u32, cell_size: u32) -> Result<Frame> {
        let img = render_cells(cells, self.width, self.height, cell_size)?;
        Ok(Frame::from_parts(
            img,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }
}
