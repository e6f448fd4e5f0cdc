//! Arrow data handling utilities
//!
//! Tabular (Arrow) view of the county data, used for the dtype listing and
//! for export.

pub mod conversion;

// Re-export commonly used functions for convenience
pub use conversion::{CountyRow, counties_to_record_batch, county_fields, raw_schema};
