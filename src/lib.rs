//! mlbpipe mirrors MLB Gameday XML data to disk.
//!
//! A run discovers the games listed on a daily index page and, for every
//! game, concurrently fetches its `game.xml`, `players.xml` and
//! `inning/inning_all.xml`, writing them to `<directory>/<gid>/`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mlbpipe::{discovery, CoordinatorBuilder, Error};
//! use chrono::NaiveDate;
//! use reqwest::Url;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let base = Url::parse(discovery::GAMEDAY_BASE_URL).map_err(|e| Error::InvalidUrl(e.to_string()))?;
//! let day = NaiveDate::from_ymd_opt(2016, 4, 10).unwrap();
//! let index = discovery::index_url_for_date(&base, day)?;
//!
//! let coordinator = CoordinatorBuilder::new()
//!     .directory(PathBuf::from("gameday"))
//!     .build()?;
//! let summary = coordinator.run_index(&index).await?;
//! println!("{} saved, {} failed", summary.saved, summary.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`discovery`] - Finding game identifiers on an index page
//! - [`coordinator`] - Dispatching fetches and waiting for all of them
//! - [`fetch`] - Fetching one resource and writing it to disk
//! - [`game`] - Game identifiers, resource kinds and fetch tasks
//! - [`report`] - Success and failure sinks
//! - [`http`] - HTTP client and the transport capability
//! - [`progress`] - Progress bar styling and display
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod coordinator;
pub mod discovery;
pub mod error;
pub mod fetch;
pub mod game;
pub mod http;
pub mod progress;
pub mod report;

pub use coordinator::{Coordinator, CoordinatorBuilder, RunSummary};
pub use discovery::{discover, index_url_for_date, scan, GameStream};
pub use error::{Error, Result};
pub use fetch::{fetch, fetch_guarded, FetchResult, Outcome};
pub use game::{FetchTask, GameId, ResourceKind};
pub use http::{create_http_client, HttpClientConfig, Transport};
pub use progress::ProgressBarOpts;
pub use report::{Reporter, TracingReporter};
