//! Command-line interface for headless simulation runs with PNG and GIF output

use crate::engine::edge::EdgeBehavior;
use crate::engine::neighborhood::{Neighborhood, format_mask, parse_mask};
use crate::engine::rules::Rule;
use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_GENERATIONS, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH,
    DEFAULT_NEIGHBORHOOD, DEFAULT_OUTPUT, DEFAULT_PERCENT_FILLED, DEFAULT_PREEMPTIVE_ITERATIONS,
    DEFAULT_RULE, DEFAULT_SEED, GIF_FRAME_DELAY_MS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::visualization::GenerationCapture;
use crate::session::simulation::Simulation;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "lifegrid")]
#[command(
    author,
    version,
    about = "Run a configurable cellular automaton and render the result"
)]
/// Command-line arguments for a headless run
pub struct Cli {
    /// Grid width in cells
    #[arg(short = 'W', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Generations to advance
    #[arg(short, long, default_value_t = DEFAULT_GENERATIONS)]
    pub generations: usize,

    /// Random seed for reproducible runs
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Initial fill probability, clamped to [0, 1]
    #[arg(short, long, default_value_t = DEFAULT_PERCENT_FILLED)]
    pub density: f32,

    /// Birth and survive counts in B/S notation
    #[arg(short, long, default_value = DEFAULT_RULE)]
    pub rule: Rule,

    /// Policy for cells outside the grid: always-off, always-on or wrap
    #[arg(short, long, default_value = "wrap")]
    pub edge: EdgeBehavior,

    /// Eight 0/1 flags enabling NW, N, NE, W, E, SW, S, SE neighbors
    #[arg(short, long, default_value = DEFAULT_NEIGHBORHOOD, value_parser = parse_mask)]
    pub neighborhood: Neighborhood,

    /// Ticks applied right after seeding, not counted as generations
    #[arg(short, long, default_value_t = DEFAULT_PREEMPTIVE_ITERATIONS)]
    pub preemptive: u32,

    /// Tick on the worker pool
    #[arg(short, long)]
    pub threads: bool,

    /// Pixels per cell in renderings
    #[arg(short, long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// PNG snapshot of the final generation
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Also write an animated GIF of every generation
    #[arg(long, value_name = "PATH")]
    pub gif: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Drives one headless run from parsed arguments to written renderings
pub struct Runner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Build the configured simulation with its field already seeded
    ///
    /// # Errors
    ///
    /// Returns an error if the cell size is zero, the dimensions are invalid
    /// or the worker pool cannot be started
    pub fn build_simulation(&self) -> Result<Simulation> {
        let cell_size = self.cli.cell_size;
        if cell_size == 0 {
            return Err(invalid_parameter(
                "cell-size",
                &cell_size,
                &"must be at least one pixel",
            ));
        }
        let viewport_width = viewport_extent("width", self.cli.width, cell_size)?;
        let viewport_height = viewport_extent("height", self.cli.height, cell_size)?;

        let mut simulation = Simulation::new(viewport_width, viewport_height, self.cli.seed)?;
        simulation.set_scale(cell_size)?;

        let grid = simulation.grid_mut();
        grid.set_rule(self.cli.rule);
        grid.edge_behavior = self.cli.edge;
        grid.neighborhood = self.cli.neighborhood;

        simulation.percent_filled = self.cli.density;
        simulation.preemptive_iterations = self.cli.preemptive;
        simulation.use_multithreading = self.cli.threads;
        simulation.randomize_field();
        Ok(simulation)
    }

    /// Run every generation, then write the PNG and optional GIF
    ///
    /// # Errors
    ///
    /// Returns an error if the simulation cannot be built or an output file
    /// cannot be written
    pub fn run(&self) -> Result<Simulation> {
        let start_time = Instant::now();
        let mut simulation = self.build_simulation()?;
        let generations = self.cli.generations;

        let mut capture = self
            .cli
            .gif
            .is_some()
            .then(|| GenerationCapture::starting_from(simulation.grid(), generations));

        if let Some(ref pm) = self.progress_manager {
            pm.initialize(generations);
        }

        for generation in 1..=generations {
            simulation.tick();
            if let Some(ref mut capture) = capture {
                capture.record(simulation.grid())?;
            }
            if let Some(ref pm) = self.progress_manager {
                pm.update(generation, simulation.grid().alive_count());
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        export_grid_as_png(simulation.grid(), self.cli.cell_size, &self.cli.output)?;

        if let (Some(path), Some(capture)) = (&self.cli.gif, &capture) {
            capture.export_gif(path, GIF_FRAME_DELAY_MS, self.cli.cell_size)?;
        }

        self.report(&simulation, start_time);
        Ok(simulation)
    }

    // Allow print for the end-of-run summary
    #[allow(clippy::print_stderr)]
    fn report(&self, simulation: &Simulation, start_time: Instant) {
        if self.cli.quiet {
            return;
        }
        let grid = simulation.grid();
        eprintln!(
            "{}x{} {} edge {} neighborhood {}: {} generations in {:.2?}, {} alive, wrote {}",
            grid.width(),
            grid.height(),
            grid.rule(),
            grid.edge_behavior,
            format_mask(&grid.neighborhood),
            simulation.generation(),
            start_time.elapsed(),
            grid.alive_count(),
            self.cli.output.display()
        );
    }
}

fn viewport_extent(parameter: &'static str, cells: usize, cell_size: u32) -> Result<u32> {
    u32::try_from(cells)
        .ok()
        .and_then(|c| c.checked_mul(cell_size))
        .ok_or_else(|| invalid_parameter(parameter, &cells, &"too large to render"))
}
