//! A Rust library for fetching U.S. county census data and ranking counties
//! by poverty and unemployment vulnerability.
//!
//! The flow is linear: fetch → clean → derive rates → score → bucket →
//! flag outliers, with charts and an optional Parquet export at the end.

pub mod algorithm;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;
pub mod viz;

// Re-export the most common types for easier use
// Core types
pub use config::CensusConfig;
pub use error::{CensusError, Result};
pub use models::{AnnotatedCounty, CountyMetrics, CountyRecord, PriorityLevel, RawCountyRecord};

// Analysis
pub use algorithm::vulnerability::{
    AnalysisBuilder, AnalysisConfig, AnalysisResult, VulnerabilityAnalysis, VulnerabilityWeights,
};

// API access
pub use api::{CensusClient, CensusResponse};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;
