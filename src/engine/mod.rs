/// Edge policy for out-of-grid coordinates
pub mod edge;
/// Double-buffered grid and the generation-advance algorithm
pub mod grid;
/// Neighbor offset masks
pub mod neighborhood;
/// Worker pool for the row-partitioned tick
pub mod parallel;
/// Birth and survive tables with B/S notation
pub mod rules;

pub use edge::EdgeBehavior;
pub use grid::{ALIVE, Cell, DEAD, Grid, ResizePolicy};
pub use neighborhood::Neighborhood;
pub use parallel::TickPool;
pub use rules::{Rule, RuleTable};
