//! Domain models for county census data
//!
//! Raw rows as decoded from the API, cleaned records, and the derived
//! metrics attached during analysis.

pub mod county;
pub mod metrics;
pub mod types;

pub use county::{CountyRecord, RawCountyRecord, RowDefect, state_name_from_label};
pub use metrics::{AnnotatedCounty, CountyMetrics};
pub use types::PriorityLevel;
