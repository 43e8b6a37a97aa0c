//! Builder pattern implementation for creating Coordinator instances.
//!
//! # Examples
//!
//! ```rust
//! use mlbpipe::coordinator::CoordinatorBuilder;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), mlbpipe::Error> {
//! let coordinator = CoordinatorBuilder::hidden()
//!     .directory(PathBuf::from("./gameday"))
//!     .max_in_flight(8)
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::CoordinatorConfig, coordinator::Coordinator};
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig, Transport};
use crate::progress::ProgressBarOpts;
use crate::report::Reporter;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// A builder used to create a [`Coordinator`].
///
/// ```rust
/// # fn main() -> Result<(), mlbpipe::Error> {
/// use mlbpipe::coordinator::CoordinatorBuilder;
///
/// let c = CoordinatorBuilder::new().max_in_flight(4).directory("gameday".into()).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct CoordinatorBuilder {
    config: CoordinatorConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl CoordinatorBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        CoordinatorBuilder::default()
    }

    /// Convenience function to hide the progress bar.
    pub fn hidden() -> Self {
        CoordinatorBuilder::default().style_options(ProgressBarOpts::hidden())
    }

    /// Sets the directory where game directories are created.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Bound the number of fetches running at once.
    pub fn max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.config.max_in_flight = Some(max_in_flight);
        self
    }

    /// Start every fetch as soon as its game is discovered.
    pub fn unbounded(mut self) -> Self {
        self.config.max_in_flight = None;
        self
    }

    /// Set the deadline of each fetch.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Let fetches run without a deadline.
    pub fn no_timeout(mut self) -> Self {
        self.config.timeout = None;
        self
    }

    /// Set the progress bar options.
    pub fn style_options(mut self, style_options: ProgressBarOpts) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set the sinks receiving every fetch result.
    pub fn reporter<R>(mut self, reporter: R) -> Self
    where
        R: Reporter + 'static,
    {
        self.config.reporter = Arc::new(reporter);
        self
    }

    /// Share a token that cancels the run's fetches when triggered.
    pub fn cancel_token(mut self, cancel: CancellationToken) -> Self {
        self.config.cancel = cancel;
        self
    }

    /// Use `transport` instead of an HTTP client built from this builder.
    ///
    /// Headers and proxy settings are ignored in that case.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Route requests through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Add the http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.config.headers.take().unwrap_or_default();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.config.headers.take().unwrap_or_default();
        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Coordinator`] with the specified options.
    pub fn build(self) -> Result<Coordinator> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => {
                let client = create_http_client(HttpClientConfig {
                    proxy: self.config.proxy.clone(),
                    headers: self.config.headers.clone(),
                    ..HttpClientConfig::default()
                })?;
                Arc::new(client)
            }
        };

        Ok(Coordinator::new(self.config, transport))
    }
}
