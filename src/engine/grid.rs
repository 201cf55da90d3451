//! Double-buffered cell storage and the generation-advance algorithm
//!
//! Cells live in two row-major buffers of `width * height` bytes. A tick reads
//! only the front buffer, writes every next value into the back buffer and then
//! swaps the two, so the update is simultaneous across the whole grid and
//! independent of iteration order.

use std::fmt;

use rand::Rng;

use crate::engine::edge::EdgeBehavior;
use crate::engine::neighborhood::{MOORE, MOORE_OFFSETS, Neighborhood};
use crate::engine::parallel::TickPool;
use crate::engine::rules::{Rule, RuleTable};
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{LifeError, Result, invalid_dimensions};

/// A single cell: zero is dead, anything else is alive
pub type Cell = u8;

/// Canonical dead cell
pub const DEAD: Cell = 0;

/// Canonical live cell
pub const ALIVE: Cell = 1;

/// What to do with existing cells when the grid changes size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizePolicy {
    /// Start from an all-dead grid of the new size
    #[default]
    Discard,
    /// Keep the overlapping top-left sub-rectangle, zero-fill the rest
    PreserveOverlap,
}

/// Where a requested coordinate ends up after edge-policy resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Resolved {
    /// A stored cell at this linear index
    Index(usize),
    /// A synthetic edge value that is not stored anywhere
    Synthetic(Cell),
}

// Coordinates are widened to i64 so neighbor offsets never overflow
const fn resolve(width: usize, height: usize, edge: EdgeBehavior, x: i64, y: i64) -> Resolved {
    let (w, h) = (width as i64, height as i64);
    if x >= 0 && y >= 0 && x < w && y < h {
        return Resolved::Index(y as usize * width + x as usize);
    }
    match edge.synthetic_cell() {
        Some(cell) => Resolved::Synthetic(cell),
        None => {
            let wx = x.rem_euclid(w) as usize;
            let wy = y.rem_euclid(h) as usize;
            Resolved::Index(wy * width + wx)
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(invalid_dimensions(
            width,
            height,
            &"dimensions must be positive",
        ));
    }
    if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        return Err(invalid_dimensions(
            width,
            height,
            &format!("dimensions must not exceed {MAX_GRID_DIMENSION}"),
        ));
    }
    Ok(width * height)
}

fn allocate(cells: usize) -> Result<Vec<Cell>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(cells)
        .map_err(|_reserve_error| LifeError::AllocationFailed { cells })?;
    buffer.resize(cells, DEAD);
    Ok(buffer)
}

/// Read-only view of one generation plus the configuration a tick needs
///
/// Shared by the sequential tick and every worker of the parallel tick.
pub(crate) struct Stencil<'a> {
    front: &'a [Cell],
    pub(crate) width: usize,
    pub(crate) height: usize,
    neighborhood: Neighborhood,
    birth_rule: RuleTable,
    survive_rule: RuleTable,
    edge_behavior: EdgeBehavior,
}

impl Stencil<'_> {
    fn cell(&self, x: i64, y: i64) -> Cell {
        match resolve(self.width, self.height, self.edge_behavior, x, y) {
            Resolved::Index(i) => self.front.get(i).copied().unwrap_or(DEAD),
            Resolved::Synthetic(cell) => cell,
        }
    }

    fn convolute(&self, x: i32, y: i32) -> usize {
        let (x, y) = (i64::from(x), i64::from(y));
        MOORE_OFFSETS
            .iter()
            .zip(self.neighborhood.iter())
            .filter(|&(&(dx, dy), &enabled)| {
                enabled && self.cell(x + i64::from(dx), y + i64::from(dy)) != DEAD
            })
            .count()
    }

    fn next_cell(&self, x: i32, y: i32) -> Cell {
        let count = self.convolute(x, y);
        let table = if self.cell(i64::from(x), i64::from(y)) == DEAD {
            &self.birth_rule
        } else {
            &self.survive_rule
        };
        Cell::from(table.get(count).copied().unwrap_or(false))
    }

    /// Compute whole rows of the next generation starting at `first_row`
    ///
    /// `out` covers `out.len() / width` consecutive rows of the back buffer.
    pub(crate) fn fill_rows(&self, first_row: usize, out: &mut [Cell]) {
        let base = first_row * self.width;
        for (offset, slot) in out.iter_mut().enumerate() {
            let i = base + offset;
            let x = (i % self.width) as i32;
            let y = (i / self.width) as i32;
            *slot = self.next_cell(x, y);
        }
    }
}

/// Cellular automaton state: two generations plus the live-editable rule set
///
/// The neighborhood, both rule tables and the edge policy are public so an
/// interface layer can edit them between ticks. Buffers and dimensions are
/// private and always agree with each other.
///
/// # Examples
///
/// ```
/// use lifegrid::engine::{EdgeBehavior, Grid};
///
/// let mut grid = Grid::new(5, 5).unwrap();
/// grid.edge_behavior = EdgeBehavior::AlwaysOff;
/// for x in 1..=3 {
///     grid.set(x, 2, 1);
/// }
///
/// grid.tick();
/// assert!(grid.is_alive(2, 1) && grid.is_alive(2, 2) && grid.is_alive(2, 3));
/// assert!(!grid.is_alive(1, 2) && !grid.is_alive(3, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    front: Vec<Cell>,
    back: Vec<Cell>,
    width: usize,
    height: usize,

    /// Which Moore offsets count as neighbors
    pub neighborhood: Neighborhood,

    /// Per neighbor count, whether a dead cell becomes alive
    pub birth_rule: RuleTable,

    /// Per neighbor count, whether a live cell stays alive
    pub survive_rule: RuleTable,

    /// Policy for coordinates outside the grid
    pub edge_behavior: EdgeBehavior,
}

impl Grid {
    /// Create an all-dead grid with the Moore neighborhood, B3/S23 and wrapping edges
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero or above
    /// `MAX_GRID_DIMENSION`, and `AllocationFailed` if the buffers cannot be reserved
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let cells = check_dimensions(width, height)?;
        let rule = Rule::conway();
        Ok(Self {
            front: allocate(cells)?,
            back: allocate(cells)?,
            width,
            height,
            neighborhood: MOORE,
            birth_rule: rule.birth,
            survive_rule: rule.survive,
            edge_behavior: EdgeBehavior::Wrap,
        })
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Current generation in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.front
    }

    /// Number of live cells in the current generation
    pub fn alive_count(&self) -> usize {
        self.front.iter().filter(|&&cell| cell != DEAD).count()
    }

    /// Current birth and survive tables as a [`Rule`]
    pub const fn rule(&self) -> Rule {
        Rule {
            birth: self.birth_rule,
            survive: self.survive_rule,
        }
    }

    /// Replace both rule tables
    pub const fn set_rule(&mut self, rule: Rule) {
        self.birth_rule = rule.birth;
        self.survive_rule = rule.survive;
    }

    /// Read the current generation through the edge policy
    pub fn get(&self, x: i32, y: i32) -> Cell {
        Self::read(&self.front, self.width, self.height, self.edge_behavior, x, y)
    }

    /// Whether the cell at `(x, y)` is alive, edge policy applied
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.get(x, y) != DEAD
    }

    /// Write the current generation through the edge policy
    ///
    /// Under `Wrap` an out-of-grid write lands on the wrapped cell; under
    /// `AlwaysOn` and `AlwaysOff` it is dropped.
    pub fn set(&mut self, x: i32, y: i32, value: Cell) {
        Self::write(
            &mut self.front,
            self.width,
            self.height,
            self.edge_behavior,
            (i64::from(x), i64::from(y)),
            value,
        );
    }

    /// [`Grid::set`] for coordinates outside the `i32` range
    ///
    /// Brush footprints near the coordinate limits reach past `i32`.
    pub(crate) fn set_wide(&mut self, x: i64, y: i64, value: Cell) {
        Self::write(
            &mut self.front,
            self.width,
            self.height,
            self.edge_behavior,
            (x, y),
            value,
        );
    }

    /// Read the back buffer through the edge policy
    ///
    /// Between ticks the back buffer holds the previous generation.
    pub fn get_back(&self, x: i32, y: i32) -> Cell {
        Self::read(&self.back, self.width, self.height, self.edge_behavior, x, y)
    }

    /// Write the back buffer through the edge policy
    ///
    /// The next tick overwrites every back cell before it becomes visible.
    pub fn set_back(&mut self, x: i32, y: i32, value: Cell) {
        Self::write(
            &mut self.back,
            self.width,
            self.height,
            self.edge_behavior,
            (i64::from(x), i64::from(y)),
            value,
        );
    }

    fn read(
        buffer: &[Cell],
        width: usize,
        height: usize,
        edge: EdgeBehavior,
        x: i32,
        y: i32,
    ) -> Cell {
        match resolve(width, height, edge, i64::from(x), i64::from(y)) {
            Resolved::Index(i) => buffer.get(i).copied().unwrap_or(DEAD),
            Resolved::Synthetic(cell) => cell,
        }
    }

    fn write(
        buffer: &mut [Cell],
        width: usize,
        height: usize,
        edge: EdgeBehavior,
        (x, y): (i64, i64),
        value: Cell,
    ) {
        let Resolved::Index(i) = resolve(width, height, edge, x, y) else {
            return;
        };
        if let Some(slot) = buffer.get_mut(i) {
            *slot = value;
        }
    }

    /// Count enabled neighbors of `(x, y)` that are alive, edge policy applied
    pub fn convolute(&self, x: i32, y: i32) -> usize {
        self.stencil().convolute(x, y)
    }

    fn stencil(&self) -> Stencil<'_> {
        Stencil {
            front: &self.front,
            width: self.width,
            height: self.height,
            neighborhood: self.neighborhood,
            birth_rule: self.birth_rule,
            survive_rule: self.survive_rule,
            edge_behavior: self.edge_behavior,
        }
    }

    // Splits the borrow so the front can be read while the back is written
    fn split_generations(&mut self) -> (Stencil<'_>, &mut [Cell]) {
        let Self {
            front,
            back,
            width,
            height,
            neighborhood,
            birth_rule,
            survive_rule,
            edge_behavior,
        } = self;
        let stencil = Stencil {
            front: front.as_slice(),
            width: *width,
            height: *height,
            neighborhood: *neighborhood,
            birth_rule: *birth_rule,
            survive_rule: *survive_rule,
            edge_behavior: *edge_behavior,
        };
        (stencil, back.as_mut_slice())
    }

    /// Advance one generation on the calling thread
    pub fn tick(&mut self) {
        let (stencil, back) = self.split_generations();
        stencil.fill_rows(0, back);
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Advance one generation with rows partitioned across the worker pool
    ///
    /// Produces exactly the same generation as [`Grid::tick`].
    pub fn tick_with_multithreading(&mut self, pool: &TickPool) {
        let (stencil, back) = self.split_generations();
        pool.advance(&stencil, back);
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Fill the current generation with live cells at 50% probability
    pub fn randomize(&mut self) {
        self.randomize_from(&mut rand::rng(), 0.5);
    }

    /// Fill the current generation with live cells at the given probability
    pub fn randomize_percent(&mut self, percent: f32) {
        self.randomize_from(&mut rand::rng(), percent);
    }

    /// Fill the current generation from a caller-supplied random source
    ///
    /// `percent` is clamped to `[0, 1]`; `NaN` yields an all-dead grid.
    pub fn randomize_from<R: Rng>(&mut self, rng: &mut R, percent: f32) {
        let threshold = percent.clamp(0.0, 1.0);
        for cell in &mut self.front {
            *cell = Cell::from(rng.random::<f32>() < threshold);
        }
    }

    /// Kill every cell of the current generation
    pub fn clear(&mut self) {
        self.front.fill(DEAD);
    }

    /// Make every cell of the current generation alive
    pub fn fill(&mut self) {
        self.front.fill(ALIVE);
    }

    /// Change dimensions, discarding all cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` or `AllocationFailed`; the grid is unchanged on error
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.resize_with(width, height, ResizePolicy::Discard)
    }

    /// Change dimensions under an explicit content policy
    ///
    /// A no-op when the dimensions are unchanged. New buffers are fully
    /// allocated before any state changes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` or `AllocationFailed`; the grid is unchanged on error
    pub fn resize_with(&mut self, width: usize, height: usize, policy: ResizePolicy) -> Result<()> {
        let cells = check_dimensions(width, height)?;
        if width == self.width && height == self.height {
            return Ok(());
        }

        let mut front = allocate(cells)?;
        let back = allocate(cells)?;

        if policy == ResizePolicy::PreserveOverlap {
            let keep_width = self.width.min(width);
            for y in 0..self.height.min(height) {
                let old_start = y * self.width;
                let new_start = y * width;
                if let (Some(src), Some(dst)) = (
                    self.front.get(old_start..old_start + keep_width),
                    front.get_mut(new_start..new_start + keep_width),
                ) {
                    dst.copy_from_slice(src);
                }
            }
        }

        self.front = front;
        self.back = back;
        self.width = width;
        self.height = height;
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.front.chunks(self.width).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell == DEAD { "." } else { "#" })?;
            }
        }
        Ok(())
    }
}
