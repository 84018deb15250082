//! Utility functions for common operations.
//!
//! This module provides shared utilities used across the crate:
//! - Atomic file operations for data safety
//! - Date-argument parsing for CLI flags

use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::error::{LensError, Result};

/// Atomically write content to a file.
///
/// This function ensures data integrity by:
/// 1. Writing to a temporary file in the same directory
/// 2. Syncing the data to disk
/// 3. Atomically renaming the temp file to the target path
///
/// If any step fails, the original file (if it exists) remains unchanged.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    // Temp file must live in the same directory as the target so the
    // rename stays on one filesystem.
    let parent = path.parent().ok_or_else(|| LensError::IoError {
        context: format!("Cannot determine parent directory for: {}", path.display()),
        source: io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"),
    })?;

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            LensError::io(format!("Failed to create directory: {}", parent.display()), e)
        })?;
    }

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        LensError::io(
            format!("Failed to create temporary file in: {}", parent.display()),
            e,
        )
    })?;

    temp_file.write_all(content).map_err(|e| {
        LensError::io(
            format!("Failed to write to temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.flush().map_err(|e| {
        LensError::io(
            format!("Failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        LensError::io(
            format!("Failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;

    Ok(())
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date_arg(name: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        LensError::invalid_argument(name, format!("expected YYYY-MM-DD, got '{value}': {e}"))
    })
}
