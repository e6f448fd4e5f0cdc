//! Tests for the Arrow table and Parquet export

use std::fs::File;

use census_vuln::VulnerabilityAnalysis;
use census_vuln::utils::arrow::{counties_to_record_batch, raw_schema};
use census_vuln::utils::io::write_parquet;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::utils::{ranked_counties, synthetic_counties};

#[test]
fn test_record_batch_has_every_county() {
    let rows = synthetic_counties(40, 3);
    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();

    let batch = counties_to_record_batch(&result.counties).unwrap();
    assert_eq!(batch.num_rows(), 40);

    let schema = batch.schema();
    for name in [
        "county_state",
        "state_name",
        "total_poverty_rate",
        "under_5_poverty_rate",
        "over_75_poverty_rate",
        "employment_rate",
        "under_5_poverty_proportion",
        "vulnerability_score",
        "priority_score",
        "z_score",
        "is_outlier",
    ] {
        assert!(schema.field_with_name(name).is_ok(), "missing column {name}");
    }
}

#[test]
fn test_raw_schema_lists_api_columns() {
    let rows = ranked_counties(3, |_| "Ohio".to_string());
    let schema = raw_schema(&rows).unwrap().unwrap();
    assert!(schema.field_with_name("poverty_count").is_ok());
    assert!(schema.field_with_name("county_state").is_ok());

    assert!(raw_schema(&[]).unwrap().is_none());
}

#[test]
fn test_parquet_export_round_trips_row_count() {
    let rows = ranked_counties(25, |_| "Texas".to_string());
    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();
    let batch = counties_to_record_batch(&result.counties).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("counties.parquet");
    write_parquet(&path, &batch).unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let read_rows: usize = reader.map(|b| b.unwrap().num_rows()).sum();
    assert_eq!(read_rows, 25);
}
