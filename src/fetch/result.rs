//! Terminal outcome of a single fetch task.
//!
//! Every [`FetchTask`] produces exactly one [`FetchResult`]. The result is
//! classified by [`FetchResult::outcome`] into one of three mutually exclusive
//! [`Outcome`]s, which is what the coordinator reports on.
//!
//! # Examples
//!
//! ```rust
//! use mlbpipe::fetch::{FetchResult, Outcome};
//! use mlbpipe::game::{FetchTask, GameId, ResourceKind};
//! use reqwest::{StatusCode, Url};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let index = Url::parse("http://host/day_05/")?;
//! let game = Arc::new(GameId::parse("gid_2021_04_10_aaa_bbb_1", &index)?);
//! let task = FetchTask::new(game, ResourceKind::Players)?;
//!
//! let result = FetchResult::rejected(&task, StatusCode::NOT_FOUND);
//! assert!(matches!(result.outcome(), Outcome::Rejected(StatusCode::NOT_FOUND)));
//! # Ok(())
//! # }
//! ```

use crate::error::Error;
use crate::game::{FetchTask, GameId, ResourceKind};

use reqwest::{StatusCode, Url};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Classification of a [`FetchResult`].
#[derive(Debug)]
pub enum Outcome<'a> {
    /// The fetch or the write failed.
    Failed {
        /// Status of the response, if one was received.
        status: Option<StatusCode>,
        /// What went wrong.
        error: &'a Error,
    },
    /// The server answered with a status outside `[200, 300)`.
    Rejected(StatusCode),
    /// The body was written to disk.
    Saved {
        /// Status of the response.
        status: StatusCode,
        /// Bytes written.
        size: u64,
        /// Destination file.
        path: &'a Path,
    },
}

#[derive(Debug)]
enum State {
    Failed {
        status: Option<StatusCode>,
        path: Option<PathBuf>,
        error: Error,
    },
    Rejected(StatusCode),
    Saved {
        status: StatusCode,
        path: PathBuf,
    },
}

/// Represents the outcome of a [`FetchTask`].
#[derive(Debug)]
pub struct FetchResult {
    /// Source URL.
    url: Url,
    /// Resource kind.
    kind: ResourceKind,
    /// Game the resource belongs to.
    game: Arc<GameId>,
    /// Bytes written to disk, possibly partial.
    size: u64,
    state: State,
}

impl FetchResult {
    fn new(task: &FetchTask, size: u64, state: State) -> Self {
        Self {
            url: task.url.clone(),
            kind: task.kind,
            game: Arc::clone(&task.game),
            size,
            state,
        }
    }

    /// No response was obtained.
    pub fn failed(task: &FetchTask, error: Error) -> Self {
        Self::new(
            task,
            0,
            State::Failed {
                status: None,
                path: None,
                error,
            },
        )
    }

    /// A successful response could not be persisted.
    ///
    /// `size` counts the bytes written before the failure.
    pub fn interrupted(
        task: &FetchTask,
        status: StatusCode,
        path: Option<PathBuf>,
        size: u64,
        error: Error,
    ) -> Self {
        Self::new(
            task,
            size,
            State::Failed {
                status: Some(status),
                path,
                error,
            },
        )
    }

    /// The server answered with a non-2xx status.
    pub fn rejected(task: &FetchTask, status: StatusCode) -> Self {
        Self::new(task, 0, State::Rejected(status))
    }

    /// The body was written to `path`.
    pub fn saved(task: &FetchTask, status: StatusCode, path: PathBuf, size: u64) -> Self {
        Self::new(task, size, State::Saved { status, path })
    }

    /// Classify the result.
    pub fn outcome(&self) -> Outcome<'_> {
        match &self.state {
            State::Failed { status, error, .. } => Outcome::Failed {
                status: *status,
                error,
            },
            State::Rejected(status) => Outcome::Rejected(*status),
            State::Saved { status, path } => Outcome::Saved {
                status: *status,
                size: self.size,
                path,
            },
        }
    }

    /// Source URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resource kind.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Game the resource belongs to.
    pub fn game(&self) -> &GameId {
        &self.game
    }

    /// HTTP status, if a response was received.
    pub fn statuscode(&self) -> Option<StatusCode> {
        match &self.state {
            State::Failed { status, .. } => *status,
            State::Rejected(status) | State::Saved { status, .. } => Some(*status),
        }
    }

    /// Bytes written to disk.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Destination file, if one was created.
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            State::Failed { path, .. } => path.as_deref(),
            State::Rejected(_) => None,
            State::Saved { path, .. } => Some(path),
        }
    }

    /// Error, if the fetch or the write failed.
    pub fn error(&self) -> Option<&Error> {
        match &self.state {
            State::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether the body was written to disk.
    pub fn is_saved(&self) -> bool {
        matches!(self.state, State::Saved { .. })
    }
}
