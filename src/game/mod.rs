//! Game identifiers and the resources fetched for each game.
//!
//! - [`id`] - [`GameId`], the structured identifier parsed from an index page
//! - [`resource`] - [`ResourceKind`] and [`FetchTask`]

pub mod id;
pub mod resource;

pub use id::GameId;
pub use resource::{FetchTask, ResourceKind};
