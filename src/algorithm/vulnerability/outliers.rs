//! Z-score outlier detection on poverty counts
//!
//! Standard deviation uses the population convention (divide by `n`).

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (`ddof = 0`)
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Standardise every value against the sample's mean and population stddev
///
/// A zero stddev yields `NaN` for every value.
#[must_use]
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let m = mean(values);
    let sd = population_std(values);
    values.iter().map(|v| (v - m) / sd).collect()
}

/// Flag values whose z-score is strictly above `threshold`
#[must_use]
pub fn flag_outliers(z_scores: &[f64], threshold: f64) -> Vec<bool> {
    z_scores.iter().map(|z| *z > threshold).collect()
}
