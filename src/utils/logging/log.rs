//! Logging utilities
//!
//! Standardised log lines for pipeline stages.

use std::path::Path;
use std::time::Duration;

/// Log the start of a stage with consistent format
///
/// # Arguments
/// * `stage` - Name of the stage
/// * `items` - Number of rows entering the stage
pub fn log_stage_start(stage: &str, items: usize) {
    log::info!("{stage}: processing {items} rows");
}

/// Log a stage completion with consistent format
///
/// # Arguments
/// * `stage` - Name of the stage
/// * `items` - Number of rows produced (or flagged) by the stage
/// * `elapsed` - Optional elapsed time
pub fn log_stage_complete(stage: &str, items: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::info!("{stage}: finished with {items} rows in {duration:?}");
    } else {
        log::info!("{stage}: finished with {items} rows");
    }
}

/// Log a file written by the run
pub fn log_output_written(what: &str, path: &Path) {
    log::info!("Wrote {what} to {}", path.display());
}

/// Log a warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
