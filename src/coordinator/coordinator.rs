//! Core coordinator: dispatch fetches per game and drain their results.
//!
//! A run has two phases. While the game stream is open, every game is turned
//! into one [`FetchTask`] per [`ResourceKind`](crate::game::ResourceKind),
//! each spawned on its own tokio task, and the [`Outstanding`] counter grows
//! accordingly. Once the stream ends, the result channel is drained until the
//! counter is back to zero, reporting each result as it arrives.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlbpipe::coordinator::CoordinatorBuilder;
//! use reqwest::Url;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coordinator = CoordinatorBuilder::new()
//!     .directory(PathBuf::from("./gameday"))
//!     .max_in_flight(16)
//!     .build()?;
//!
//! let index = Url::parse("http://gd2.mlb.com/components/game/mlb/year_2016/month_04/day_10/")?;
//! let summary = coordinator.run_index(&index).await?;
//! println!("{} files saved, {} failed", summary.saved, summary.failed);
//! # Ok(())
//! # }
//! ```

use super::config::CoordinatorConfig;
use super::outstanding::Outstanding;
use crate::discovery::discover;
use crate::error::{Error, Result};
use crate::fetch::{fetch_guarded, FetchResult};
use crate::game::{FetchTask, GameId};
use crate::http::Transport;
use crate::progress::ProgressDisplay;
use crate::report::report;

use futures::{Stream, StreamExt};
use reqwest::header::HeaderMap;
use reqwest::Url;
use std::fmt;
use std::path::PathBuf;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Counts of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Games received from the stream.
    pub games: usize,
    /// Fetches dispatched.
    pub dispatched: usize,
    /// Resources written to disk.
    pub saved: usize,
    /// Resources that failed for any reason.
    pub failed: usize,
}

/// Represents the run controller.
///
/// A coordinator can be created via its builder:
///
/// ```rust
/// # fn main() -> Result<(), mlbpipe::Error> {
/// use mlbpipe::coordinator::CoordinatorBuilder;
///
/// let c = CoordinatorBuilder::new().build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Coordinator {
    config: CoordinatorConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Coordinator {
    pub(crate) fn new(config: CoordinatorConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Gets the directory game directories are created in.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the bound on concurrently running fetches.
    pub fn max_in_flight(&self) -> Option<usize> {
        self.config.max_in_flight
    }

    /// Gets the deadline of a single fetch.
    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets the proxy requests are routed through.
    pub fn proxy(&self) -> Option<&reqwest::Proxy> {
        self.config.proxy.as_ref()
    }

    /// Gets the token cancelling the coordinator's fetches.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.config.cancel
    }

    /// Discovers the games listed at `index_url` and fetches all of them.
    ///
    /// Only a failure to load the index is returned as an error; failed
    /// resources are reported and counted in the summary.
    pub async fn run_index(&self, index_url: &Url) -> Result<RunSummary> {
        let games = discover(self.transport.as_ref(), index_url).await?;
        self.run(games).await
    }

    /// Fetches every resource of every game in `games`.
    ///
    /// Returns once each dispatched fetch has reported its result.
    pub async fn run<S>(&self, games: S) -> Result<RunSummary>
    where
        S: Stream<Item = GameId>,
    {
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let outstanding = Outstanding::new();
        let gate = self
            .config
            .max_in_flight
            .map(|permits| Arc::new(Semaphore::new(permits.max(1))));
        let progress = ProgressDisplay::new(self.config.style_options.clone());
        let mut summary = RunSummary::default();

        // Dispatch phase.
        let mut games = pin!(games);
        while let Some(game) = games.next().await {
            summary.games += 1;
            let tasks = match FetchTask::for_game(Arc::new(game)) {
                Ok(tasks) => tasks,
                Err(e) => {
                    warn!("Skipping game: {}", e);
                    continue;
                }
            };

            outstanding.add(tasks.len());
            progress.add_pending(tasks.len() as u64);
            for task in tasks {
                self.dispatch(task, &results_tx, gate.clone());
                summary.dispatched += 1;
            }
        }

        // Only the fetch tasks hold senders from here on.
        drop(results_tx);
        debug!(
            games = summary.games,
            outstanding = outstanding.get(),
            "All games dispatched, draining results"
        );

        // Drain phase.
        while !outstanding.is_done() {
            let result = results_rx.recv().await.ok_or_else(|| {
                Error::Internal(format!(
                    "result channel closed with {} fetches outstanding",
                    outstanding.get()
                ))
            })?;
            outstanding.complete_one()?;

            if result.is_saved() {
                summary.saved += 1;
            } else {
                summary.failed += 1;
            }
            report(self.config.reporter.as_ref(), &result);
            progress.complete_one();
        }

        progress.finish();
        Ok(summary)
    }

    /// Spawns the fetch of `task`; its result is sent on `results`.
    fn dispatch(
        &self,
        task: FetchTask,
        results: &UnboundedSender<FetchResult>,
        gate: Option<Arc<Semaphore>>,
    ) {
        let transport = Arc::clone(&self.transport);
        let results = results.clone();
        let root = self.config.directory.clone();
        let timeout = self.config.timeout;
        let cancel = self.config.cancel.clone();

        tokio::spawn(async move {
            let _permit = match gate {
                Some(gate) => tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        let _ = results.send(FetchResult::failed(&task, Error::Cancelled));
                        return;
                    }
                    permit = gate.acquire_owned() => permit.ok(),
                },
                None => None,
            };

            let result = fetch_guarded(transport.as_ref(), &task, &root, timeout, &cancel).await;
            if results.send(result).is_err() {
                debug!("Coordinator stopped listening before {} finished", task.url);
            }
        });
    }
}
