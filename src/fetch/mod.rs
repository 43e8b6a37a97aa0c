//! Fetching and persisting individual resources.
//!
//! - [`fetcher`] - [`fetch`] and [`fetch_guarded`], which turn a [`FetchTask`]
//!   into a file on disk and a [`FetchResult`]
//! - [`result`] - [`FetchResult`] and its [`Outcome`] classification
//!
//! [`FetchTask`]: crate::game::FetchTask

pub mod fetcher;
pub mod result;

pub use fetcher::{fetch, fetch_guarded};
pub use result::{FetchResult, Outcome};
