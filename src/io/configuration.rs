//! Engine limits and runtime configuration defaults

// Keeps every coordinate and index representable as i32 arithmetic
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Session defaults, mirrored by `Simulation::reset_to_defaults`
/// Default viewport width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1600;
/// Default viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 900;
/// Default pixels per cell
pub const DEFAULT_SCALE: u32 = 10;
/// Default simulation speed
pub const DEFAULT_TICKS_PER_SECOND: u32 = 15;
/// Default probability of a cell being alive after randomizing
pub const DEFAULT_PERCENT_FILLED: f32 = 0.5;
/// Default number of ticks applied right after randomizing the field
pub const DEFAULT_PREEMPTIVE_ITERATIONS: u32 = 0;

// Headless runner defaults
/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 160;
/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 90;
/// Fixed seed for reproducible runs
pub const DEFAULT_SEED: u64 = 42;
/// Default number of generations to advance
pub const DEFAULT_GENERATIONS: usize = 500;
/// Default rule in B/S notation
pub const DEFAULT_RULE: &str = "B3/S23";
/// Default neighborhood mask (all eight offsets enabled)
pub const DEFAULT_NEIGHBORHOOD: &str = "11111111";
/// Default pixels per cell in renderings
pub const DEFAULT_CELL_SIZE: u32 = 4;

// Output settings
/// Default PNG snapshot path
pub const DEFAULT_OUTPUT: &str = "life_result.png";
/// Color of live cells in renderings
pub const ALIVE_COLOR: [u8; 4] = [255, 255, 255, 255];
/// Color of dead cells in renderings
pub const DEAD_COLOR: [u8; 4] = [0, 0, 0, 255];
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 20;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
