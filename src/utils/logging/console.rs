//! Console output utilities
//!
//! Previews are slices of the annotated Arrow table, rendered with arrow's
//! pretty printer.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::compute::kernels::take;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;

/// Columns shown in the poverty rate preview
pub const POVERTY_RATE_COLUMNS: [&str; 5] = [
    "county_state",
    "state_name",
    "total_poverty_rate",
    "under_5_poverty_rate",
    "over_75_poverty_rate",
];

/// Columns shown in vulnerability previews
pub const VULNERABILITY_COLUMNS: [&str; 3] =
    ["county_state", "vulnerability_score", "priority_score"];

/// Columns shown for poverty count outliers
pub const OUTLIER_COLUMNS: [&str; 6] = [
    "county_state",
    "poverty_count",
    "total_poverty_rate",
    "under_5_poverty_rate",
    "priority_score",
    "z_score",
];

/// Render selected rows and columns of a batch as a text table
///
/// Rows are emitted in the order given.
pub fn preview_table(batch: &RecordBatch, rows: &[usize], columns: &[&str]) -> Result<String> {
    let schema = batch.schema();
    let projection = columns
        .iter()
        .map(|name| schema.index_of(name))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let indices = UInt64Array::from_iter_values(rows.iter().map(|&row| row as u64));
    let selected = take::take_record_batch(&batch.project(&projection)?, &indices)?;

    Ok(pretty_format_batches(&[selected])?.to_string())
}

/// Print column names and Arrow data types
pub fn print_schema_info(schema: &Schema) {
    println!("\nData types:");
    for field in schema.fields() {
        println!("  {:<32} {}", field.name(), field.data_type());
    }
}

/// First rows with their identifiers and poverty rates
pub fn print_poverty_rates(batch: &RecordBatch, num_rows: usize) -> Result<()> {
    let rows: Vec<usize> = (0..num_rows.min(batch.num_rows())).collect();
    println!("\nFirst {} counties:", rows.len());
    println!("{}", preview_table(batch, &rows, &POVERTY_RATE_COLUMNS)?);
    Ok(())
}

/// Selected counties with their score and priority level
pub fn print_vulnerability(title: &str, batch: &RecordBatch, rows: &[usize]) -> Result<()> {
    println!("\n{title}");
    println!("{}", preview_table(batch, rows, &VULNERABILITY_COLUMNS)?);
    Ok(())
}

/// Table of "Very High" county counts per state
pub fn very_high_table(counts: &[(String, usize)]) -> Result<RecordBatch> {
    let states: StringArray = counts.iter().map(|(state, _)| Some(state.as_str())).collect();
    let totals = UInt64Array::from_iter_values(counts.iter().map(|(_, count)| *count as u64));

    Ok(RecordBatch::try_from_iter([
        ("state_name", Arc::new(states) as ArrayRef),
        ("counties", Arc::new(totals) as ArrayRef),
    ])?)
}

/// Number of "Very High" counties per state
pub fn print_very_high_by_state(counts: &[(String, usize)]) -> Result<()> {
    println!("\nVery High vulnerability counties per state:");
    println!("{}", pretty_format_batches(&[very_high_table(counts)?])?);
    Ok(())
}

/// Poverty count outliers with their context columns
pub fn print_outliers(batch: &RecordBatch, rows: &[usize]) -> Result<()> {
    println!("\nPoverty count outliers ({}):", rows.len());
    println!("{}", preview_table(batch, rows, &OUTLIER_COLUMNS)?);
    Ok(())
}
