//! Tests for the progress module functionality.
//!
//! This file contains tests for progress bar styling, configuration,
//! and the run-wide display driven by the coordinator.

use mlbpipe::progress::{ProgressBarOpts, ProgressDisplay};

#[test]
fn test_progress_bar_opts_default() {
    let opts = ProgressBarOpts::default();
    assert!(opts.is_enabled());
    let pb = opts.to_progress_bar(100);
    assert_eq!(pb.length(), Some(100));
}

#[test]
fn test_progress_bar_opts_new() {
    let opts = ProgressBarOpts::new(
        Some(ProgressBarOpts::TEMPLATE_SPINNER.into()),
        Some(ProgressBarOpts::CHARS_LINE.into()),
        true,
        true,
    );
    assert!(opts.is_enabled());
    let pb = opts.to_progress_bar(12);
    assert_eq!(pb.length(), Some(12));
}

#[test]
fn test_progress_bar_opts_hidden() {
    let opts = ProgressBarOpts::hidden();
    assert!(!opts.is_enabled());
    let pb = opts.to_progress_bar(100);
    assert!(pb.is_hidden());
}

#[test]
fn test_progress_bar_opts_invalid_template_falls_back() {
    let opts = ProgressBarOpts::new(Some("{bar:40.blue".into()), None, true, false);
    // Falls back to the default style instead of failing.
    let pb = opts.to_progress_bar(3);
    assert_eq!(pb.length(), Some(3));
}

#[test]
fn test_progress_display_tracks_dispatched_and_done() {
    let display = ProgressDisplay::new(ProgressBarOpts::hidden());

    display.add_pending(3);
    display.add_pending(3);
    display.complete_one();
    display.complete_one();

    assert_eq!(display.bar().length(), Some(6));
    assert_eq!(display.bar().position(), 2);
    display.finish();
}

#[test]
fn test_progress_display_clear_on_finish() {
    let mut opts = ProgressBarOpts::hidden();
    opts.set_clear(true);
    let display = ProgressDisplay::new(opts);

    display.add_pending(1);
    display.complete_one();
    let bar = display.bar().clone();
    display.finish();

    assert!(bar.is_finished());
}
