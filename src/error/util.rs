//! Utility functions for error handling
//!
//! Helpers that attach the offending path to filesystem errors.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{CensusError, Result};

/// Make sure an output directory exists, creating it if needed
///
/// # Arguments
/// * `path` - The directory to prepare
/// * `purpose` - What the directory is for (used in the log line)
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    if path.exists() {
        return Err(CensusError::io(
            path,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Path is not a directory, expected one for: {purpose}"),
            ),
        ));
    }

    log::debug!("Creating directory {} for {purpose}", path.display());
    fs::create_dir_all(path).map_err(|e| CensusError::io(path, e))
}

/// Create (or truncate) a file, preparing its parent directory first
pub fn create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_directory(parent, purpose)?;
    }

    fs::File::create(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to create file for: {purpose}"),
        };
        CensusError::io(path, io::Error::new(e.kind(), format!("{context}: {e}")))
    })
}
