//! Builder for configuring a vulnerability analysis

use crate::algorithm::vulnerability::config::{AnalysisConfig, VulnerabilityWeights};
use crate::algorithm::vulnerability::core::VulnerabilityAnalysis;

/// Builder for `VulnerabilityAnalysis`
#[derive(Debug, Clone, Default)]
pub struct AnalysisBuilder {
    config: AnalysisConfig,
}

impl AnalysisBuilder {
    /// Start from the default weights and threshold
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    #[must_use]
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the indicator weights
    #[must_use]
    pub const fn with_weights(mut self, weights: VulnerabilityWeights) -> Self {
        self.config.weights = weights;
        self
    }

    /// Override the outlier z-score threshold
    #[must_use]
    pub const fn with_z_score_threshold(mut self, threshold: f64) -> Self {
        self.config.z_score_threshold = threshold;
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> VulnerabilityAnalysis {
        VulnerabilityAnalysis::new(self.config)
    }
}
