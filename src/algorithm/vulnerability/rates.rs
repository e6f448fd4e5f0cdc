//! Per-county rates and the raw vulnerability score

use crate::algorithm::vulnerability::config::VulnerabilityWeights;
use crate::models::{CountyMetrics, CountyRecord};

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    numerator as f64 / denominator as f64
}

/// Compute the five derived rates of a county
#[must_use]
pub fn compute_metrics(record: &CountyRecord) -> CountyMetrics {
    CountyMetrics {
        total_poverty_rate: ratio(record.poverty_count, record.population),
        under_5_poverty_rate: ratio(record.poverty_count_under_5(), record.pop_under_5()),
        over_75_poverty_rate: ratio(record.poverty_count_over_75(), record.pop_over_75()),
        employment_rate: ratio(record.employed_total, record.population),
        under_5_poverty_proportion: ratio(record.poverty_count_under_5(), record.poverty_count),
    }
}

/// Weighted composite of poverty, child poverty share and non-employment
#[must_use]
pub fn raw_vulnerability_score(metrics: &CountyMetrics, weights: &VulnerabilityWeights) -> f64 {
    weights.poverty_rate * metrics.total_poverty_rate
        + weights.under_5_poverty_proportion * metrics.under_5_poverty_proportion
        + weights.non_employment * (1.0 - metrics.employment_rate)
}
