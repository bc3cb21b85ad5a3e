//! Progress reporting for matching and table rendering
//!
//! Bars are drawn with indicatif. Callers that do not want output pass
//! `ProgressBar::hidden()` instead of creating one here.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Template for bars with a known length
pub const DEFAULT_MAIN_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}";

/// Template for spinners
pub const DEFAULT_SPINNER_TEMPLATE: &str = "{spinner:.green} {elapsed_precise} {msg}";

/// Create a progress bar with the standard style
///
/// # Arguments
/// * `length` - Total number of steps
/// * `description` - Optional initial message
#[must_use]
pub fn create_main_progress_bar(length: u64, description: Option<&str>) -> ProgressBar {
    let style = ProgressStyle::default_bar()
        .template(DEFAULT_MAIN_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    let pb = ProgressBar::new(length).with_style(style);

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Create a spinner for steps without a known length, such as loading a file
#[must_use]
pub fn create_spinner(message: Option<&str>) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .template(DEFAULT_SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    let pb = ProgressBar::new_spinner().with_style(style);

    if let Some(msg) = message {
        pb.set_message(msg.to_string());
    }
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Finish a progress bar, optionally replacing its message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    match message {
        Some(msg) => pb.finish_with_message(msg.to_string()),
        None => pb.finish(),
    }
}

/// Finish a progress bar and remove it from the terminal
pub fn finish_and_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}
