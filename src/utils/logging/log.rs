//! Logging helpers
//!
//! Keep the wording of file-level log lines consistent across the loader,
//! the writers and the CLI.

use std::path::Path;
use std::time::Duration;

/// Log the start of an operation on a file or directory
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log the completion of an operation on a file or directory
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "loaded" or "wrote"
/// * `path` - File or directory operated on
/// * `items` - Number of subjects or rows processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(
    operation: &str,
    path: &Path,
    items: usize,
    elapsed: Option<Duration>,
) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {} {} items for {} in {:?}",
            operation,
            items,
            path.display(),
            duration
        ),
        None => log::info!(
            "Successfully {} {} items for {}",
            operation,
            items,
            path.display()
        ),
    }
}

/// Log a warning, optionally tied to a path
pub fn log_warning(message: &str, path: Option<&Path>) {
    match path {
        Some(path) => log::warn!("{}: {}", message, path.display()),
        None => log::warn!("{message}"),
    }
}
