//! Conversion of county records into Arrow record batches
//!
//! The annotated table is flattened into `CountyRow` and handed to
//! `serde_arrow`, which derives the Arrow schema from the row type.

use arrow::datatypes::{FieldRef, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::error::Result;
use crate::models::{AnnotatedCounty, RawCountyRecord};

/// One flattened row of the annotated county table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyRow {
    pub county: u32,
    pub state: u32,
    pub county_state: String,
    pub state_name: String,
    pub population: u64,
    pub total_pop_male: u64,
    pub employed_male: u64,
    pub employed_total: u64,
    pub male_pop_under_5: u64,
    pub female_pop_under_5: u64,
    pub male_pop_over_75: u64,
    pub female_pop_over_75: u64,
    pub poverty_count: u64,
    pub poverty_count_male_under_5: u64,
    pub poverty_count_female_under_5: u64,
    pub poverty_count_male_over_75: u64,
    pub poverty_count_female_over_75: u64,
    pub total_poverty_rate: f64,
    pub under_5_poverty_rate: f64,
    pub over_75_poverty_rate: f64,
    pub employment_rate: f64,
    pub under_5_poverty_proportion: f64,
    pub vulnerability_score: f64,
    pub priority_score: Option<String>,
    pub z_score: f64,
    pub is_outlier: bool,
}

impl From<&AnnotatedCounty> for CountyRow {
    fn from(c: &AnnotatedCounty) -> Self {
        let r = &c.record;
        Self {
            county: r.county,
            state: r.state,
            county_state: r.county_state.clone(),
            state_name: r.state_name.clone(),
            population: r.population,
            total_pop_male: r.total_pop_male,
            employed_male: r.employed_male,
            employed_total: r.employed_total,
            male_pop_under_5: r.male_pop_under_5,
            female_pop_under_5: r.female_pop_under_5,
            male_pop_over_75: r.male_pop_over_75,
            female_pop_over_75: r.female_pop_over_75,
            poverty_count: r.poverty_count,
            poverty_count_male_under_5: r.poverty_count_male_under_5,
            poverty_count_female_under_5: r.poverty_count_female_under_5,
            poverty_count_male_over_75: r.poverty_count_male_over_75,
            poverty_count_female_over_75: r.poverty_count_female_over_75,
            total_poverty_rate: c.metrics.total_poverty_rate,
            under_5_poverty_rate: c.metrics.under_5_poverty_rate,
            over_75_poverty_rate: c.metrics.over_75_poverty_rate,
            employment_rate: c.metrics.employment_rate,
            under_5_poverty_proportion: c.metrics.under_5_poverty_proportion,
            vulnerability_score: c.vulnerability_score,
            priority_score: c.priority.map(|p| p.label().to_string()),
            z_score: c.z_score,
            is_outlier: c.is_outlier,
        }
    }
}

/// Arrow fields of the annotated county table
pub fn county_fields() -> Result<Vec<FieldRef>> {
    Ok(Vec::<FieldRef>::from_type::<CountyRow>(
        TracingOptions::default(),
    )?)
}

/// Build a record batch holding every annotated county
pub fn counties_to_record_batch(counties: &[AnnotatedCounty]) -> Result<RecordBatch> {
    let fields = county_fields()?;
    let rows: Vec<CountyRow> = counties.iter().map(CountyRow::from).collect();
    Ok(serde_arrow::to_record_batch(&fields, &rows)?)
}

/// Arrow schema traced from raw API rows, as delivered
///
/// Columns that are null in every sample come out with the `Null` type.
/// Returns `None` for an empty response.
pub fn raw_schema(rows: &[RawCountyRecord]) -> Result<Option<Schema>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let fields = Vec::<FieldRef>::from_samples(
        rows,
        TracingOptions::default().allow_null_fields(true),
    )?;
    Ok(Some(Schema::new(fields)))
}
