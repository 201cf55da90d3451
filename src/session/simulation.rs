//! Simulation session owning the grid and every live-editable setting
//!
//! Rendering and input layers receive a `&mut Simulation` instead of reaching
//! for process-wide state. All configuration changes happen through `&mut self`
//! between ticks, so they can never overlap a generation in progress.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::edge::{EdgeBehavior, positive_mod};
use crate::engine::grid::{ALIVE, Cell, DEAD, Grid, ResizePolicy};
use crate::engine::neighborhood::{self, MOORE};
use crate::engine::parallel::TickPool;
use crate::engine::rules::{self, Rule};
use crate::io::configuration::{
    DEFAULT_PERCENT_FILLED, DEFAULT_PREEMPTIVE_ITERATIONS, DEFAULT_SCALE,
    DEFAULT_TICKS_PER_SECOND,
};
use crate::io::error::{Result, invalid_dimensions};
use crate::session::brush::Brush;
use crate::session::scheduler::TickScheduler;

/// Which randomizers run when "randomize selected" is triggered
// Each flag maps to one independent checkbox in an interface layer
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomizeSelection {
    /// Reseed the cells
    pub field: bool,
    /// Pick a random edge policy
    pub edge_behavior: bool,
    /// Pick a random neighborhood mask
    pub neighbors: bool,
    /// Pick random birth and survive tables
    pub rules: bool,
}

/// A running automaton session
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    pool: TickPool,
    rng: StdRng,
    viewport: (u32, u32),
    scale: u32,
    pan: (i32, i32),
    generation: u64,
    last_paint: Option<(i32, i32)>,

    /// Frame-time driven tick gating
    pub scheduler: TickScheduler,
    /// Probability of a cell being alive after [`Simulation::randomize_field`]
    pub percent_filled: f32,
    /// Ticks applied right after [`Simulation::randomize_field`]
    pub preemptive_iterations: u32,
    /// Keep randomized rules from setting `birth[0]`
    pub disable_strobing: bool,
    /// Tick on the worker pool instead of the calling thread
    pub use_multithreading: bool,
    /// Whether [`Simulation::update`] advances generations
    pub paused: bool,
    /// Randomizers applied by [`Simulation::randomize_selected`]
    pub randomize_checked: RandomizeSelection,
    /// Content policy used when the viewport or scale changes the grid size
    pub resize_policy: ResizePolicy,
    /// Brush used by [`Simulation::paint`]
    pub brush: Brush,
}

impl Simulation {
    /// Start a session for a viewport in pixels, with reproducible randomness
    ///
    /// The worker pool is built here once and reused by every parallel tick.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the viewport is empty or too large, or
    /// `ThreadPool` if the worker pool cannot be started
    pub fn new(viewport_width: u32, viewport_height: u32, seed: u64) -> Result<Self> {
        let scale = DEFAULT_SCALE.clamp(1, viewport_width.min(viewport_height).max(1));
        let (width, height) = cells_for(viewport_width, viewport_height, scale);
        let mut simulation = Self {
            grid: Grid::new(width, height)?,
            pool: TickPool::new(None)?,
            rng: StdRng::seed_from_u64(seed),
            viewport: (viewport_width, viewport_height),
            scale,
            pan: (0, 0),
            generation: 0,
            last_paint: None,
            scheduler: TickScheduler::new(DEFAULT_TICKS_PER_SECOND),
            percent_filled: DEFAULT_PERCENT_FILLED,
            preemptive_iterations: DEFAULT_PREEMPTIVE_ITERATIONS,
            disable_strobing: false,
            use_multithreading: false,
            paused: false,
            randomize_checked: RandomizeSelection::default(),
            resize_policy: ResizePolicy::Discard,
            brush: Brush::default(),
        };
        simulation.reset_to_defaults()?;
        Ok(simulation)
    }

    /// Restore every setting to its default and reseed the field at 50%
    ///
    /// The default scale is lowered for viewports narrower than ten pixels.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the viewport is empty or too large
    pub fn reset_to_defaults(&mut self) -> Result<()> {
        self.scale = DEFAULT_SCALE.clamp(1, self.scale_limit());
        self.scheduler.ticks_per_second = DEFAULT_TICKS_PER_SECOND;
        self.pan = (0, 0);
        self.resize_to_viewport()?;

        self.grid.edge_behavior = EdgeBehavior::Wrap;
        self.grid.randomize_from(&mut self.rng, 0.5);
        self.grid.neighborhood = MOORE;
        self.grid.set_rule(Rule::conway());

        self.randomize_checked = RandomizeSelection::default();
        self.percent_filled = DEFAULT_PERCENT_FILLED;
        self.disable_strobing = false;
        self.preemptive_iterations = DEFAULT_PREEMPTIVE_ITERATIONS;
        self.generation = 0;
        Ok(())
    }

    /// The grid being simulated
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for live edits of rules, neighborhood and edge policy
    pub const fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Worker pool used when multithreading is enabled
    pub const fn pool(&self) -> &TickPool {
        &self.pool
    }

    /// Generations advanced since the last reset
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Pixels per cell
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Viewport size in pixels
    pub const fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Current pan offset in cells
    pub const fn pan_offset(&self) -> (i32, i32) {
        self.pan
    }

    /// Advance one generation, on the pool when multithreading is enabled
    pub fn tick(&mut self) {
        self.advance_grid();
        self.generation += 1;
    }

    fn advance_grid(&mut self) {
        if self.use_multithreading {
            self.grid.tick_with_multithreading(&self.pool);
        } else {
            self.grid.tick();
        }
    }

    /// Feed one frame of elapsed time; ticks at most once when due
    ///
    /// Returns whether a tick happened. Nothing advances while paused.
    pub fn update(&mut self, frame_seconds: f64) -> bool {
        if self.paused || !self.scheduler.advance(frame_seconds) {
            return false;
        }
        self.tick();
        true
    }

    /// Single-step while paused; returns whether a tick happened
    pub fn step(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.tick();
        true
    }

    /// Pause a running session or resume a paused one
    pub const fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Follow a new viewport size, resizing the grid if the cell count changes
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the viewport cannot hold a cell at the
    /// current scale; the previous viewport is kept in that case
    pub fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        if (width, height) == self.viewport {
            return Ok(());
        }
        let previous = self.viewport;
        self.viewport = (width, height);
        self.resize_to_viewport().inspect_err(|_| {
            self.viewport = previous;
        })
    }

    /// Change pixels per cell, clamped to `1..=min(viewport)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the resulting grid would be too large;
    /// the previous scale is kept in that case
    pub fn set_scale(&mut self, scale: u32) -> Result<()> {
        let clamped = scale.clamp(1, self.scale_limit());
        if clamped == self.scale {
            return Ok(());
        }
        let previous = self.scale;
        self.scale = clamped;
        self.resize_to_viewport().inspect_err(|_| {
            self.scale = previous;
        })
    }

    fn scale_limit(&self) -> u32 {
        self.viewport.0.min(self.viewport.1).max(1)
    }

    fn resize_to_viewport(&mut self) -> Result<()> {
        let (width, height) = cells_for(self.viewport.0, self.viewport.1, self.scale);
        if width == 0 || height == 0 {
            return Err(invalid_dimensions(
                width,
                height,
                &format!(
                    "viewport {}x{} holds no cells at scale {}",
                    self.viewport.0, self.viewport.1, self.scale
                ),
            ));
        }
        self.grid.resize_with(width, height, self.resize_policy)?;
        self.brush.clamp_size(Brush::max_size(&self.grid));
        self.pan = (0, 0);
        Ok(())
    }

    /// Reseed the cells at `percent_filled`, then run the preemptive ticks
    ///
    /// The generation counter restarts at zero after the preemptive ticks.
    pub fn randomize_field(&mut self) {
        self.grid.randomize_from(&mut self.rng, self.percent_filled);
        for _ in 0..self.preemptive_iterations {
            self.advance_grid();
        }
        self.generation = 0;
    }

    /// Pick one of the three edge policies uniformly
    pub fn randomize_edge_behavior(&mut self) {
        let index = self.rng.random_range(0..EdgeBehavior::ALL.len());
        if let Some(&edge) = EdgeBehavior::ALL.get(index) {
            self.grid.edge_behavior = edge;
        }
        self.constrain_pan();
    }

    /// Enable each neighbor offset with probability one half
    pub fn randomize_neighbors(&mut self) {
        for enabled in &mut self.grid.neighborhood {
            *enabled = self.rng.random_bool(0.5);
        }
    }

    /// Flip a fair coin for every birth and survive entry
    ///
    /// With `disable_strobing` set, birth on zero neighbors is always cleared.
    pub fn randomize_rules(&mut self) {
        let grid = &mut self.grid;
        for (birth, survive) in grid.birth_rule.iter_mut().zip(grid.survive_rule.iter_mut()) {
            *birth = self.rng.random_bool(0.5);
            *survive = self.rng.random_bool(0.5);
        }
        if self.disable_strobing {
            grid.birth_rule[0] = false;
        }
    }

    /// Run every randomizer selected in [`Simulation::randomize_checked`]
    pub fn randomize_selected(&mut self) {
        let selection = self.randomize_checked;
        if selection.field {
            self.randomize_field();
        }
        if selection.edge_behavior {
            self.randomize_edge_behavior();
        }
        if selection.neighbors {
            self.randomize_neighbors();
        }
        if selection.rules {
            self.randomize_rules();
        }
    }

    /// Move to the next edge policy: off, on, wrap
    pub fn cycle_edge_behavior(&mut self) {
        self.grid.edge_behavior = self.grid.edge_behavior.next();
        self.constrain_pan();
    }

    /// Invert the rule over the currently enabled neighborhood size
    pub fn reverse_rule(&mut self) {
        let size = neighborhood::size(&self.grid.neighborhood);
        let (birth, survive) = rules::reverse(&self.grid.birth_rule, &self.grid.survive_rule, size);
        self.grid.birth_rule = birth;
        self.grid.survive_rule = survive;
    }

    /// Scroll the view by whole cells; only a wrapping grid can be panned
    pub fn pan(&mut self, dx: i32, dy: i32) {
        if self.grid.edge_behavior != EdgeBehavior::Wrap {
            self.pan = (0, 0);
            return;
        }
        let (w, h) = (self.grid.width() as i32, self.grid.height() as i32);
        self.pan = (
            positive_mod(self.pan.0.saturating_add(dx), w),
            positive_mod(self.pan.1.saturating_add(dy), h),
        );
    }

    fn constrain_pan(&mut self) {
        self.pan(0, 0);
    }

    /// Cell shown at screen cell `(x, y)` once the pan offset is applied
    pub fn visible_cell(&self, x: i32, y: i32) -> Cell {
        let (w, h) = (self.grid.width() as i32, self.grid.height() as i32);
        self.grid.get(
            positive_mod(x.saturating_add(self.pan.0), w),
            positive_mod(y.saturating_add(self.pan.1), h),
        )
    }

    /// Paint with the brush; consecutive paints of one stroke are joined by a line
    ///
    /// Coordinates are screen cells, so the pan offset is applied first.
    pub fn paint(&mut self, x: i32, y: i32, alive: bool) {
        let target = (x.saturating_add(self.pan.0), y.saturating_add(self.pan.1));
        let value = if alive { ALIVE } else { DEAD };
        match self.last_paint {
            Some(from) => self.brush.stroke(&mut self.grid, from, target, value),
            None => self.brush.stamp(&mut self.grid, target.0, target.1, value),
        }
        self.last_paint = Some(target);
    }

    /// Finish the current brush stroke
    pub const fn end_stroke(&mut self) {
        self.last_paint = None;
    }

    /// Resize the brush by `delta`, capped at half the grid's smaller side
    pub fn adjust_brush(&mut self, delta: i32) {
        let max = Brush::max_size(&self.grid);
        self.brush.adjust_size(delta, max);
    }
}

fn cells_for(viewport_width: u32, viewport_height: u32, scale: u32) -> (usize, usize) {
    let scale = scale.max(1);
    (
        (viewport_width / scale) as usize,
        (viewport_height / scale) as usize,
    )
}
