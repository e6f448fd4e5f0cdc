//! Scoring configuration
//!
//! Defaults reproduce the published vulnerability index: 35% poverty rate,
//! 40% share of the poor who are under five, 25% non-employment, with a
//! z-score threshold of 3 for poverty count outliers.

use std::fmt;

/// Weights of the three indicators in the raw vulnerability score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VulnerabilityWeights {
    /// Weight of `total_poverty_rate`
    pub poverty_rate: f64,
    /// Weight of `under_5_poverty_proportion`
    pub under_5_poverty_proportion: f64,
    /// Weight of `1 - employment_rate`
    pub non_employment: f64,
}

impl Default for VulnerabilityWeights {
    fn default() -> Self {
        Self {
            poverty_rate: 0.35,
            under_5_poverty_proportion: 0.40,
            non_employment: 0.25,
        }
    }
}

/// Configuration for a vulnerability analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Indicator weights
    pub weights: VulnerabilityWeights,
    /// Counties with a poverty-count z-score strictly above this are outliers
    pub z_score_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            weights: VulnerabilityWeights::default(),
            z_score_threshold: 3.0,
        }
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Configuration:")?;
        writeln!(
            f,
            "  Weights: poverty rate {:.2}, under-5 poverty share {:.2}, non-employment {:.2}",
            self.weights.poverty_rate,
            self.weights.under_5_poverty_proportion,
            self.weights.non_employment
        )?;
        writeln!(f, "  Z-Score Threshold: {}", self.z_score_threshold)
    }
}
