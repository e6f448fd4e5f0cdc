//! County vulnerability scoring
//!
//! This module turns raw county rows into ranked, annotated counties:
//! derived poverty and employment rates, a normalised vulnerability score,
//! quantile priority levels and poverty count outliers.

pub mod builder;
pub mod config;
pub mod core;
pub mod filters;
pub mod outliers;
pub mod priority;
pub mod rates;
pub mod scoring;
pub mod statistics;

// Re-export commonly used items
pub use builder::AnalysisBuilder;
pub use config::{AnalysisConfig, VulnerabilityWeights};
pub use self::core::{AnalysisResult, VulnerabilityAnalysis};
pub use filters::{CleaningReport, drop_incomplete};
pub use outliers::{flag_outliers, population_std, z_scores};
pub use priority::{assign_priority, bucket_index, quantile_edges, quantile_sorted};
pub use rates::{compute_metrics, raw_vulnerability_score};
pub use scoring::normalize_min_max;
pub use statistics::{MetricColumn, SummaryStats, VulnerabilityStatistics};
