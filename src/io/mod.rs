/// Command-line interface and headless runner
pub mod cli;
/// Limits and runtime defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG rendering of a generation
pub mod image;
/// Progress reporting for headless runs
pub mod progress;
/// Generation capture and GIF export
pub mod visualization;
