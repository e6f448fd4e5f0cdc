//! Drop-incomplete cleaning pass
//!
//! A row survives only if every field is present, every count is
//! non-negative and the `county, state` label carries a state part.

use rustc_hash::FxHashMap;

use crate::models::{CountyRecord, RawCountyRecord, RowDefect};

/// Outcome of the cleaning pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningReport {
    /// Rows received from the API
    pub rows_in: usize,
    /// Rows kept
    pub rows_kept: usize,
    /// Dropped rows per defect (first defect found in each row)
    pub defects: FxHashMap<RowDefect, usize>,
}

impl CleaningReport {
    /// Number of rows removed
    #[must_use]
    pub const fn rows_dropped(&self) -> usize {
        self.rows_in - self.rows_kept
    }
}

/// Keep complete rows in input order
#[must_use]
pub fn drop_incomplete(rows: &[RawCountyRecord]) -> (Vec<CountyRecord>, CleaningReport) {
    let mut report = CleaningReport {
        rows_in: rows.len(),
        ..Default::default()
    };

    let records: Vec<CountyRecord> = rows
        .iter()
        .filter_map(|raw| match CountyRecord::try_from(raw) {
            Ok(record) => Some(record),
            Err(defect) => {
                log::trace!("Dropping {:?}: {defect}", raw.county_state);
                *report.defects.entry(defect).or_insert(0) += 1;
                None
            }
        })
        .collect();

    report.rows_kept = records.len();

    if report.rows_dropped() > 0 {
        log::info!(
            "Dropped {} of {} rows with missing or invalid values",
            report.rows_dropped(),
            report.rows_in
        );
    }

    (records, report)
}
