//! The vulnerability analysis pipeline
//!
//! clean → rates → raw score → min-max normalisation → priority buckets →
//! poverty count z-scores and outlier flags.

use std::time::Instant;

use crate::algorithm::vulnerability::config::AnalysisConfig;
use crate::algorithm::vulnerability::filters::{CleaningReport, drop_incomplete};
use crate::algorithm::vulnerability::outliers::{flag_outliers, z_scores};
use crate::algorithm::vulnerability::priority::assign_priority;
use crate::algorithm::vulnerability::rates::{compute_metrics, raw_vulnerability_score};
use crate::algorithm::vulnerability::scoring::normalize_min_max;
use crate::algorithm::vulnerability::statistics::{
    MetricColumn, SummaryStats, VulnerabilityStatistics,
};
use crate::error::{CensusError, Result};
use crate::models::{AnnotatedCounty, CountyMetrics, PriorityLevel, RawCountyRecord};
use crate::utils::logging::{log_stage_complete, log_stage_start};

/// A configured analysis, ready to run over raw API rows
#[derive(Debug, Clone, Default)]
pub struct VulnerabilityAnalysis {
    config: AnalysisConfig,
}

impl VulnerabilityAnalysis {
    /// Create an analysis with the given configuration
    #[must_use]
    pub const fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// The configuration this analysis runs with
    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run every stage over the raw rows
    ///
    /// Deterministic: identical input always yields identical output.
    #[allow(clippy::cast_precision_loss)]
    pub fn run(&self, rows: &[RawCountyRecord]) -> Result<AnalysisResult> {
        let start = Instant::now();
        log_stage_start("Cleaning", rows.len());
        let (records, cleaning) = drop_incomplete(rows);
        if records.is_empty() {
            return Err(CensusError::EmptyDataset {
                dropped: cleaning.rows_dropped(),
            });
        }
        log_stage_complete("Cleaning", records.len(), Some(start.elapsed()));

        let stage = Instant::now();
        log_stage_start("Scoring", records.len());
        let metrics: Vec<CountyMetrics> = records.iter().map(compute_metrics).collect();
        let raw_scores: Vec<f64> = metrics
            .iter()
            .map(|m| raw_vulnerability_score(m, &self.config.weights))
            .collect();
        let scores = normalize_min_max(&raw_scores);
        let priorities = assign_priority(&scores)?;
        log_stage_complete("Scoring", scores.len(), Some(stage.elapsed()));

        let stage = Instant::now();
        log_stage_start("Outlier detection", records.len());
        let poverty_counts: Vec<f64> = records.iter().map(|r| r.poverty_count as f64).collect();
        let z = z_scores(&poverty_counts);
        let flags = flag_outliers(&z, self.config.z_score_threshold);
        log_stage_complete(
            "Outlier detection",
            flags.iter().filter(|f| **f).count(),
            Some(stage.elapsed()),
        );

        let counties = records
            .into_iter()
            .zip(metrics)
            .zip(raw_scores)
            .zip(scores)
            .zip(priorities)
            .zip(z.into_iter().zip(flags))
            .map(
                |(((((record, metrics), raw), score), priority), (z_score, is_outlier))| {
                    AnnotatedCounty {
                        record,
                        metrics,
                        raw_vulnerability_score: raw,
                        vulnerability_score: score,
                        priority,
                        z_score,
                        is_outlier,
                    }
                },
            )
            .collect();

        log::info!("Analysis finished in {:?}", start.elapsed());

        Ok(AnalysisResult { counties, cleaning })
    }
}

/// Annotated counties plus the cleaning outcome
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Cleaned counties in API order with all derived columns
    pub counties: Vec<AnnotatedCounty>,
    /// What the cleaning pass removed
    pub cleaning: CleaningReport,
}

impl AnalysisResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.counties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counties.is_empty()
    }

    #[must_use]
    pub fn describe(&self, column: MetricColumn) -> Option<SummaryStats> {
        VulnerabilityStatistics::describe(&self.counties, column)
    }

    #[must_use]
    pub fn top_vulnerable(&self, n: usize) -> Vec<&AnnotatedCounty> {
        VulnerabilityStatistics::top_vulnerable(&self.counties, n)
    }

    /// Row positions matching `top_vulnerable`
    #[must_use]
    pub fn top_vulnerable_indices(&self, n: usize) -> Vec<usize> {
        VulnerabilityStatistics::top_vulnerable_indices(&self.counties, n)
    }

    #[must_use]
    pub fn priority_counts(&self) -> Vec<(PriorityLevel, usize)> {
        VulnerabilityStatistics::priority_counts(&self.counties)
    }

    #[must_use]
    pub fn very_high_by_state(&self) -> Vec<(String, usize)> {
        VulnerabilityStatistics::very_high_by_state(&self.counties)
    }

    #[must_use]
    pub fn outliers(&self) -> Vec<&AnnotatedCounty> {
        VulnerabilityStatistics::outliers(&self.counties)
    }

    #[must_use]
    pub fn outlier_indices(&self) -> Vec<usize> {
        VulnerabilityStatistics::outlier_indices(&self.counties)
    }

    /// Plain-text report listing the `top_n` most vulnerable counties
    #[must_use]
    pub fn summary(&self, top_n: usize) -> String {
        VulnerabilityStatistics::generate_summary(&self.counties, top_n)
    }
}
