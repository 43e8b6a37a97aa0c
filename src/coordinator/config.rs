//! Configuration structures and defaults for the coordinator.
//!
//! # Examples
//!
//! ```rust
//! use mlbpipe::coordinator::CoordinatorConfig;
//! use std::time::Duration;
//!
//! let config = CoordinatorConfig::default();
//! assert_eq!(config.max_in_flight, Some(32));
//! assert_eq!(config.timeout, Some(Duration::from_secs(30)));
//! ```

use crate::progress::ProgressBarOpts;
use crate::report::{Reporter, TracingReporter};

use reqwest::header::HeaderMap;
use std::env::current_dir;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Default bound on concurrently running fetches.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 32;

/// Default deadline of a single fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration structure for the coordinator
#[derive(Clone)]
pub struct CoordinatorConfig {
    /// Directory where game directories are created.
    pub directory: PathBuf,
    /// Maximum number of fetches running at once. `None` means unbounded.
    pub max_in_flight: Option<usize>,
    /// Deadline of each fetch. `None` means no deadline.
    pub timeout: Option<Duration>,
    /// Progress bar options.
    pub style_options: ProgressBarOpts,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Sinks for fetch results.
    pub reporter: Arc<dyn Reporter>,
    /// Cancels every fetch of the run when triggered.
    pub cancel: CancellationToken,
}

impl std::fmt::Debug for CoordinatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinatorConfig")
            .field("directory", &self.directory)
            .field("max_in_flight", &self.max_in_flight)
            .field("timeout", &self.timeout)
            .field("style_options", &self.style_options)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            max_in_flight: Some(DEFAULT_MAX_IN_FLIGHT),
            timeout: Some(DEFAULT_TIMEOUT),
            style_options: ProgressBarOpts::default(),
            headers: None,
            proxy: None,
            reporter: Arc::new(TracingReporter),
            cancel: CancellationToken::new(),
        }
    }
}
