//! Utilities for logging, console output and progress tracking

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::log::{log_output_written, log_stage_complete, log_stage_start, log_warning};
pub use progress::{create_spinner, finish_and_clear, finish_progress_bar};
