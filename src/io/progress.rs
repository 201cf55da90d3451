//! Generation progress display for headless runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static GENERATION_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar tracking generations and the live population
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a hidden progress bar; [`ProgressManager::initialize`] sizes it
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(GENERATION_STYLE.clone());
        Self { bar }
    }

    /// Start tracking a run of `generations` ticks
    pub fn initialize(&self, generations: usize) {
        self.bar.set_length(generations as u64);
        self.bar.set_position(0);
    }

    /// Report the generation just completed and its live cell count
    pub fn update(&self, generation: usize, alive: usize) {
        self.bar.set_position(generation as u64);
        self.bar.set_message(format!("alive {alive}"));
    }

    /// Generation last reported
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish the bar and leave the final state visible
    pub fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}
