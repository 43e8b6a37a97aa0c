//! Progress reporting for coordinator runs.
//!
//! - `style` - [`ProgressBarOpts`], templates and characters of the bar
//! - `display` - [`ProgressDisplay`], the bar driven by the coordinator
//!
//! # Examples
//!
//! ```rust
//! use mlbpipe::progress::{ProgressBarOpts, ProgressDisplay};
//!
//! let display = ProgressDisplay::new(ProgressBarOpts::hidden());
//! display.add_pending(3);
//! display.complete_one();
//! assert_eq!(display.bar().position(), 1);
//! display.finish();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::ProgressBarOpts;
