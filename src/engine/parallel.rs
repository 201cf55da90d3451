//! Reusable worker pool for the row-partitioned parallel tick

use std::ops::Range;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::engine::grid::{Cell, Stencil};
use crate::io::error::{LifeError, Result};

/// Worker count matching the available hardware concurrency
pub fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

/// Split `height` rows into at most `workers` contiguous ranges
///
/// Every range has `height / n` rows where `n = min(workers, height)`; the
/// last range absorbs the remainder. A worker count of zero is treated as one.
pub fn row_ranges(height: usize, workers: usize) -> Vec<Range<usize>> {
    let chunks = workers.clamp(1, height.max(1));
    let rows_per_chunk = height / chunks;
    (0..chunks)
        .map(|k| {
            let start = k * rows_per_chunk;
            let end = if k + 1 == chunks {
                height
            } else {
                start + rows_per_chunk
            };
            start..end
        })
        .collect()
}

/// Carve the back buffer into disjoint row slices matching `ranges`
fn partition_rows<'a>(
    back: &'a mut [Cell],
    width: usize,
    ranges: &[Range<usize>],
) -> Vec<(usize, &'a mut [Cell])> {
    let mut parts = Vec::with_capacity(ranges.len());
    let mut rest = back;
    for range in ranges {
        let Some((head, tail)) = std::mem::take(&mut rest).split_at_mut_checked(range.len() * width)
        else {
            break;
        };
        parts.push((range.start, head));
        rest = tail;
    }
    parts
}

/// Thread pool built once and reused by every parallel tick
///
/// Workers share the current generation read-only and each owns a disjoint
/// slice of the next one; [`TickPool::advance`] returns only after all of
/// them have finished.
pub struct TickPool {
    pool: ThreadPool,
    threads: usize,
}

impl std::fmt::Debug for TickPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickPool")
            .field("threads", &self.threads)
            .finish_non_exhaustive()
    }
}

impl TickPool {
    /// Build a pool with `threads` workers, or one per hardware thread when `None`
    ///
    /// # Errors
    ///
    /// Returns `ThreadPool` if the operating system refuses to start the workers
    pub fn new(threads: Option<usize>) -> Result<Self> {
        let threads = threads.filter(|&t| t > 0).unwrap_or_else(default_threads);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("lifegrid-tick-{index}"))
            .build()
            .map_err(|e| LifeError::ThreadPool {
                reason: e.to_string(),
            })?;
        Ok(Self { pool, threads })
    }

    /// Number of workers in the pool
    pub const fn threads(&self) -> usize {
        self.threads
    }

    /// Compute the next generation into `back`, one row chunk per worker
    pub(crate) fn advance(&self, stencil: &Stencil<'_>, back: &mut [Cell]) {
        let ranges = row_ranges(stencil.height, self.threads);
        let parts = partition_rows(back, stencil.width, &ranges);
        self.pool.install(|| {
            parts
                .into_par_iter()
                .for_each(|(first_row, rows)| stencil.fill_rows(first_row, rows));
        });
    }
}
