//! Generalized two-dimensional cellular automaton engine
//!
//! A double-buffered grid of cells advanced by configurable birth and survive
//! tables over a configurable neighborhood, with three edge policies and an
//! optional row-partitioned parallel tick. A session layer adds tick pacing,
//! randomizers and brush painting; the binary runs a simulation headlessly and
//! renders the result as PNG or animated GIF.

#![forbid(unsafe_code)]

/// Grid storage, rules, neighborhoods, edge policies and the tick algorithm
pub mod engine;
/// Command-line runner, rendering output and error handling
pub mod io;
/// Interactive session state: scheduling, randomizers and painting
pub mod session;

pub use io::error::{LifeError, Result};
