//! Min-max normalisation of the raw vulnerability score

/// Smallest and largest non-`NaN` value, if any
#[must_use]
pub fn value_bounds(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Scale values to 0..=100 over the dataset's min and max
///
/// `NaN` inputs are skipped when finding the bounds and stay `NaN`. When all
/// values are equal the range is zero and every output is `NaN`.
#[must_use]
pub fn normalize_min_max(values: &[f64]) -> Vec<f64> {
    let Some((min, max)) = value_bounds(values) else {
        return vec![f64::NAN; values.len()];
    };
    let range = max - min;

    values.iter().map(|v| (v - min) / range * 100.0).collect()
}
