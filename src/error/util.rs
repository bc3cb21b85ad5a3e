//! Utility functions for error handling
//!
//! Helpers that open files and prepare directories while attaching the path
//! to any failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, StudyError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for the log message)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        log::debug!("Cannot open {} for {purpose}", path.display());
        return Err(StudyError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, format!("not a file (needed for {purpose})")),
        ));
    }

    fs::File::open(path).map_err(|e| StudyError::io(path, e))
}

/// Create a file for writing, creating missing parent directories
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent)?;
    }
    fs::File::create(path).map_err(|e| StudyError::io(path, e))
}

/// Make sure a directory exists, creating it if needed
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(StudyError::io(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "path exists and is not a directory"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| StudyError::io(path, e))
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;
    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content).map_err(|e| StudyError::io(path, e))?;
    Ok(content)
}
