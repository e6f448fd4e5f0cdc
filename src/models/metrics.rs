//! Derived per-county metrics
//!
//! These are view columns on a cleaned `CountyRecord`. Ratios follow IEEE
//! float division, so a zero denominator yields `NaN` or infinity rather
//! than an error.

use serde::Serialize;

use crate::models::county::CountyRecord;
use crate::models::types::PriorityLevel;

/// Rates computed from a single county's counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountyMetrics {
    /// `poverty_count / population`
    pub total_poverty_rate: f64,
    /// Under-5 poverty over under-5 population
    pub under_5_poverty_rate: f64,
    /// Over-75 poverty over over-75 population
    pub over_75_poverty_rate: f64,
    /// `employed_total / population`
    pub employment_rate: f64,
    /// Share of the county's poor who are under five
    pub under_5_poverty_proportion: f64,
}

/// A cleaned county with every derived column attached
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedCounty {
    pub record: CountyRecord,
    pub metrics: CountyMetrics,
    /// Weighted score before min-max normalisation
    pub raw_vulnerability_score: f64,
    /// Score scaled to 0..=100 over the whole dataset
    pub vulnerability_score: f64,
    /// Quantile bucket, `None` when the score is `NaN`
    pub priority: Option<PriorityLevel>,
    /// Standardised poverty count
    pub z_score: f64,
    pub is_outlier: bool,
}

impl AnnotatedCounty {
    #[must_use]
    pub fn county_state(&self) -> &str {
        &self.record.county_state
    }

    #[must_use]
    pub fn state_name(&self) -> &str {
        &self.record.state_name
    }
}
