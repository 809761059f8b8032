//! Live progress display for a running solve

use crate::solver::SolveStats;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SOLVE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Spinner showing live solve counters
///
/// A solve has no meaningful completion percentage, so the display is a
/// spinner with the work counters rather than a bar
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    /// Create and start the spinner
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(SOLVE_STYLE.clone());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Refresh the counter line
    pub fn update(&self, stats: &SolveStats) {
        self.bar.set_message(format!(
            "rounds: {}, speculations: {}, rollbacks: {}",
            stats.propagation_rounds, stats.speculations, stats.rollbacks
        ));
    }

    /// Stop the spinner with a final status line
    pub fn finish(&self, solved: bool, stats: &SolveStats) {
        let status = if solved { "solved" } else { "no solution" };
        self.bar.finish_with_message(format!(
            "{status} after {} rounds, {} speculations, {} rollbacks",
            stats.propagation_rounds, stats.speculations, stats.rollbacks
        ));
    }
}
