//! Run-wide progress bar.
//!
//! The bar's length grows as fetches are dispatched and its position advances
//! as results are drained, so it is accurate even while games are still being
//! discovered.

use super::style::ProgressBarOpts;

use indicatif::ProgressBar;

/// Progress display of a coordinator run.
pub struct ProgressDisplay {
    bar: ProgressBar,
    clear: bool,
}

impl ProgressDisplay {
    /// Create an empty progress display.
    pub fn new(opts: ProgressBarOpts) -> Self {
        let clear = opts.clear;
        let bar = opts.to_progress_bar(0);
        bar.tick();
        Self { bar, clear }
    }

    /// Account for `count` newly dispatched fetches.
    pub fn add_pending(&self, count: u64) {
        self.bar.inc_length(count);
    }

    /// Mark one fetch as done.
    pub fn complete_one(&self) {
        self.bar.inc(1);
    }

    /// Underlying bar.
    pub fn bar(&self) -> &ProgressBar {
        &self.bar
    }

    /// Finish the bar, clearing it if configured to.
    pub fn finish(self) {
        if self.clear {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish();
        }
    }
}
