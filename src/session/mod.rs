/// Brush stamps and strokes
pub mod brush;
/// Frame-time driven tick gating
pub mod scheduler;
/// Session object owning the grid and its live settings
pub mod simulation;

pub use brush::Brush;
pub use scheduler::TickScheduler;
pub use simulation::{RandomizeSelection, Simulation};
