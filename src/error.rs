//! Error handling for the mlbpipe library.
//!
//! This module provides the single error type shared by discovery, fetching
//! and coordination. Per-resource failures are carried as data inside a
//! [`FetchResult`](crate::fetch::FetchResult); only failures that stop a whole
//! run are ever returned from the top-level entry points.

use reqwest::StatusCode;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Errors that can happen when using mlbpipe.
#[derive(Error, Debug)]
pub enum Error {
    /// A pipeline invariant was broken.
    ///
    /// Raised when the result channel closes while fetches are still
    /// outstanding, or when more results arrive than were dispatched.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A token does not look like a Gameday game identifier.
    #[error("Invalid game identifier: {0}")]
    InvalidIdentifier(String),

    /// The index page answered with a non-2xx status.
    ///
    /// Nothing can be discovered without the index, so this ends the run.
    #[error("expected 2xx, got: {status} from: {url}")]
    IndexStatus {
        /// Status returned by the server.
        status: StatusCode,
        /// Index page URL.
        url: String,
    },

    /// The fetch did not finish before its deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The run was cancelled before the fetch finished.
    #[error("cancelled")]
    Cancelled,

    /// I/O Error.
    ///
    /// Wraps errors raised while creating destination directories or writing
    /// downloaded bodies to disk.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised by the HTTP middleware stack.
    #[error("Middleware error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

/// Result type alias for operations that can fail with an mlbpipe error.
pub type Result<T> = std::result::Result<T, Error>;
