//! Counted barrier between dispatched fetches and drained results.

use crate::error::{Error, Result};

use std::sync::atomic::{AtomicUsize, Ordering};

/// Number of fetches dispatched but not yet drained.
///
/// Only the coordinator mutates it: [`add`](Self::add) while dispatching,
/// [`complete_one`](Self::complete_one) per drained result. The run is over
/// exactly when it is [`done`](Self::is_done) after the game stream ended.
#[derive(Debug, Default)]
pub struct Outstanding {
    count: AtomicUsize,
}

impl Outstanding {
    /// A counter with nothing outstanding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `n` newly dispatched fetches.
    pub fn add(&self, n: usize) {
        self.count.fetch_add(n, Ordering::AcqRel);
    }

    /// Record one drained result and return how many are still outstanding.
    ///
    /// Fails instead of wrapping when nothing was outstanding.
    pub fn complete_one(&self) -> Result<usize> {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(1)
            })
            .map(|previous| previous - 1)
            .map_err(|_| Error::Internal("result drained with no fetch outstanding".into()))
    }

    /// Fetches still outstanding.
    pub fn get(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Whether every dispatched fetch has been drained.
    pub fn is_done(&self) -> bool {
        self.get() == 0
    }
}
