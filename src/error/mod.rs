//! Error handling for the census vulnerability analysis.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for fetching and analysing census data
#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure of the API request
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status code
    #[error("Census API returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Leading part of the response body
        body: String,
    },

    /// Malformed JSON or a body without the `data` array
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// No rows survived cleaning
    #[error("No complete county rows left after cleaning ({dropped} dropped)")]
    EmptyDataset {
        /// Number of rows removed by the cleaning pass
        dropped: usize,
    },

    /// Quantile bucketing produced coinciding bin edges
    #[error("Bin edges must be unique: {edges:?}")]
    DuplicateBinEdges {
        /// The computed quantile edges
        edges: Vec<f64>,
    },

    /// Error building the Arrow view of the data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error writing Parquet output
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error converting records to Arrow arrays
    #[error("Serialization error: {0}")]
    SerdeArrow(#[from] serde_arrow::Error),

    /// Error opening or writing a file
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path that was being accessed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Error rendering a chart
    #[error("Plot error: {0}")]
    Plot(String),
}

impl CensusError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an IO error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a plotting error from any drawing backend error
    pub fn plot(error: impl std::fmt::Display) -> Self {
        Self::Plot(error.to_string())
    }
}

/// Result type for census analysis operations
pub type Result<T> = std::result::Result<T, CensusError>;
