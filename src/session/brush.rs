//! Brush stamps and strokes for editing cells

use crate::engine::grid::{Cell, Grid};

/// Square or round brush measured in cells
///
/// A stamp at `(x, y)` covers the box `x..=x + size`, `y..=y + size`; a round
/// brush keeps only the cells inside the inscribed circle. Sizes of 0 and 1
/// both paint a single cell. Writes go through [`Grid::set`], so they wrap or
/// drop at the border according to the grid's edge policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Brush {
    /// Brush extent in cells
    pub size: u32,
    /// Round instead of square footprint
    pub round: bool,
}

impl Brush {
    /// Brush limit for a grid: half its smaller side
    pub fn max_size(grid: &Grid) -> u32 {
        (grid.width().min(grid.height()) / 2) as u32
    }

    /// Grow or shrink the brush by `delta`, kept within `0..=max`
    pub fn adjust_size(&mut self, delta: i32, max: u32) {
        let resized = (i64::from(self.size) + i64::from(delta)).clamp(0, i64::from(max));
        self.size = resized as u32;
    }

    /// Cap the brush at `max`, usually [`Brush::max_size`] after a resize
    pub fn clamp_size(&mut self, max: u32) {
        self.size = self.size.min(max);
    }

    /// Switch between square and round footprints
    pub const fn toggle_round(&mut self) {
        self.round = !self.round;
    }

    /// Paint the brush footprint with its corner at `(x, y)`
    pub fn stamp(&self, grid: &mut Grid, x: i32, y: i32, value: Cell) {
        self.stamp_wide(grid, i64::from(x), i64::from(y), value);
    }

    fn stamp_wide(&self, grid: &mut Grid, x: i64, y: i64, value: Cell) {
        if self.size <= 1 {
            grid.set_wide(x, y, value);
            return;
        }

        let size = i64::from(self.size);
        let (width, height) = (grid.width() as i64, grid.height() as i64);
        let span = (size + 1).saturating_mul(size + 1);
        if span <= width * height {
            for oy in 0..=size {
                for ox in 0..=size {
                    if self.covers(ox, oy) {
                        grid.set_wide(x + ox, y + oy, value);
                    }
                }
            }
            return;
        }

        // Footprint larger than the grid: visit each grid cell once instead
        let wraps = grid.edge_behavior.synthetic_cell().is_none();
        for gy in 0..height {
            let Some(oy) = self.nearest_offset(gy - y, height, wraps) else {
                continue;
            };
            for gx in 0..width {
                let Some(ox) = self.nearest_offset(gx - x, width, wraps) else {
                    continue;
                };
                if self.covers(ox, oy) {
                    grid.set_wide(gx, gy, value);
                }
            }
        }
    }

    // Whether the footprint offset `(ox, oy)` from the corner is painted
    fn covers(&self, ox: i64, oy: i64) -> bool {
        if !self.round {
            return true;
        }
        let size = i64::from(self.size);
        let px = (ox - size / 2) as f64;
        let py = (oy - size / 2) as f64;
        px * px + py * py <= f64::from(self.size).powi(2) * 0.25
    }

    // Footprint offset along one axis that lands on a grid coordinate `delta`
    // away from the corner, choosing the one nearest the center under wrapping
    fn nearest_offset(&self, delta: i64, extent: i64, wrap: bool) -> Option<i64> {
        let size = i64::from(self.size);
        if !wrap {
            return (0..=size).contains(&delta).then_some(delta);
        }
        let first = delta.rem_euclid(extent);
        if first > size {
            return None;
        }
        let last_step = (size - first) / extent;
        let step = (size / 2 - first + extent / 2)
            .div_euclid(extent)
            .clamp(0, last_step);
        Some(first + step * extent)
    }

    /// Stamp along the Bresenham line from `from` to `to`, both ends included
    pub fn stroke(&self, grid: &mut Grid, from: (i32, i32), to: (i32, i32), value: Cell) {
        let (mut x, mut y) = (i64::from(from.0), i64::from(from.1));
        let (x1, y1) = (i64::from(to.0), i64::from(to.1));
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.stamp_wide(grid, x, y, value);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += sx;
            }
            if doubled <= dx {
                error += dx;
                y += sy;
            }
        }
    }
}
