//! Progress bar styling options.
//!
//! # Examples
//!
//! ```rust
//! use mlbpipe::progress::ProgressBarOpts;
//!
//! // Counter of saved files, kept on screen once the run completes.
//! let opts = ProgressBarOpts::default();
//!
//! // Nothing is drawn.
//! let hidden = ProgressBarOpts::hidden();
//! assert!(!hidden.is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::warn;

/// Define the options for a progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    /// Progress bar template string.
    template: Option<String>,
    /// Progression characters set.
    ///
    /// There must be at least 3 characters for the following states:
    /// "filled", "current", and "to do".
    progress_chars: Option<String>,
    /// Enable or disable the progress bar.
    pub(crate) enabled: bool,
    /// Clear the progress bar once completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self {
            template: Some(Self::TEMPLATE_FILES.into()),
            progress_chars: Some(Self::CHARS_FINE.into()),
            enabled: true,
            clear: false,
        }
    }
}

impl ProgressBarOpts {
    /// Bar followed by the number of finished fetches.
    ///
    /// `███████████████████████████▌            61/90 files (67%) 00:00:04`
    pub const TEMPLATE_FILES: &'static str =
        "{bar:40.blue} {pos:>}/{len} files ({percent}%) {elapsed_precise:.blue}";
    /// Spinner followed by the number of finished fetches.
    pub const TEMPLATE_SPINNER: &'static str = "{spinner:.green} {pos}/{len} files {msg}";
    /// Use fine blocks as progress characters: `"█▉▊▋▌▍▎▏  "`.
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// Use a line as progress characters: `"━╾─"`.
    pub const CHARS_LINE: &'static str = "━╾╴─";

    /// Create a new [`ProgressBarOpts`].
    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Create a new [`ProgressBarOpts`] which hides the progress bar.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..ProgressBarOpts::default()
        }
    }

    /// Whether the bar is drawn at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set to `true` to clear the progress bar upon completion.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Create a [`ProgressStyle`] based on the provided options.
    ///
    /// An invalid template falls back to the default bar.
    pub fn to_progress_style(self) -> ProgressStyle {
        let mut style = ProgressStyle::default_bar();
        if let Some(template) = self.template {
            style = match style.clone().template(&template) {
                Ok(styled) => styled,
                Err(e) => {
                    warn!("Ignoring progress template {:?}: {}", template, e);
                    style
                }
            };
        }
        if let Some(progress_chars) = self.progress_chars {
            style = style.progress_chars(&progress_chars);
        }
        style
    }

    /// Create a [`ProgressBar`] based on the provided options.
    pub fn to_progress_bar(self, len: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }

        let style = self.to_progress_style();
        ProgressBar::new(len).with_style(style)
    }
}
