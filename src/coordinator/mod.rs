//! Coordinator module: dispatching fetches and tracking their completion.
//!
//! - `coordinator` - [`Coordinator`], running the dispatch and drain phases
//! - `builder` - [`CoordinatorBuilder`] for configuring a coordinator
//! - `config` - [`CoordinatorConfig`] and its defaults
//! - `outstanding` - [`Outstanding`], the counted barrier of a run
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlbpipe::coordinator::CoordinatorBuilder;
//! use mlbpipe::game::GameId;
//! use futures::stream;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let game = GameId::from_path(
//!     "http:/gd2.mlb.com/components/game/mlb/year_2016/month_04/day_10/gid_2016_04_10_nyamlb_detmlb_1",
//! )?;
//!
//! let coordinator = CoordinatorBuilder::new().build()?;
//! let summary = coordinator.run(stream::iter(vec![game])).await?;
//! assert_eq!(summary.dispatched, 3);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod coordinator;
pub mod outstanding;

pub use builder::CoordinatorBuilder;
pub use config::{CoordinatorConfig, DEFAULT_MAX_IN_FLIGHT, DEFAULT_TIMEOUT};
pub use coordinator::{Coordinator, RunSummary};
pub use outstanding::Outstanding;
