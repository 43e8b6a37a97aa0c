//! Success and failure sinks for fetch results.
//!
//! The coordinator reports every drained [`FetchResult`] to a [`Reporter`].
//! The default [`TracingReporter`] turns them into `tracing` events; anything
//! else (counters, test recorders, UI) can implement the trait instead.

use crate::fetch::{FetchResult, Outcome};

use reqwest::{StatusCode, Url};
use std::path::Path;
use tracing::{info, warn};

/// Reason reported for non-2xx responses.
pub const REJECTED_REASON: &str = "could not retrieve data from host";

/// Receives the classified outcome of each fetch.
///
/// Called from the coordinator task only, one result at a time.
pub trait Reporter: Send + Sync {
    /// A resource was written to disk.
    fn success(&self, status: StatusCode, size: u64, path: &Path);

    /// A resource could not be fetched or written.
    fn failure(&self, status: Option<StatusCode>, reason: &str, url: &Url);
}

/// Logs results with `tracing`: `info` for successes, `warn` for failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn success(&self, status: StatusCode, size: u64, path: &Path) {
        info!(
            status = status.as_u16(),
            bytes = size,
            path = %path.display(),
            "{} bytes written to {}",
            size,
            path.display()
        );
    }

    fn failure(&self, status: Option<StatusCode>, reason: &str, url: &Url) {
        warn!(
            status = status.map(|s| s.as_u16()),
            reason,
            url = %url,
            "Could not save {}: {}",
            url,
            reason
        );
    }
}

/// Sends `result` to the matching sink of `reporter`.
pub fn report(reporter: &dyn Reporter, result: &FetchResult) {
    match result.outcome() {
        Outcome::Failed { status, error } => {
            reporter.failure(status, &error.to_string(), result.url())
        }
        Outcome::Rejected(status) => reporter.failure(Some(status), REJECTED_REASON, result.url()),
        Outcome::Saved { status, size, path } => reporter.success(status, size, path),
    }
}
