//! IO utilities for writing analysis output

pub mod parquet;

// Re-export commonly used functions for convenience
pub use self::parquet::write_parquet;
