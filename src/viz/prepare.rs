//! Plot data preparation
//!
//! Box plot statistics and histogram counts, computed independently of any
//! drawing backend. Non-finite values never reach a chart.

use rustc_hash::FxHashMap;

use crate::algorithm::vulnerability::{MetricColumn, quantile_sorted};
use crate::models::AnnotatedCounty;

/// Whisker reach in multiples of the interquartile range
pub const WHISKER_IQR: f64 = 1.5;

/// Five-number summary plus fliers for one box
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest value within `q1 - 1.5 * IQR`
    pub lower_whisker: f64,
    /// Highest value within `q3 + 1.5 * IQR`
    pub upper_whisker: f64,
    /// Values beyond the whiskers
    pub fliers: Vec<f64>,
}

impl BoxStats {
    /// Box statistics of the finite values, `None` if there are none
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - WHISKER_IQR * iqr, q3 + WHISKER_IQR * iqr);

        let inside = sorted.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
        let lower_whisker = inside.clone().next().unwrap_or(q1);
        let upper_whisker = inside.last().unwrap_or(q3);

        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            fliers,
        })
    }

    /// Lowest and highest point drawn for this box, fliers included
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        self.fliers
            .iter()
            .fold((self.lower_whisker, self.upper_whisker), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            })
    }
}

/// Count finite values into `bins` equal-width bins over `[lo, hi]`
///
/// The last bin is closed on the right; values outside the range are ignored.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn histogram_bins(values: &[f64], bins: usize, lo: f64, hi: f64) -> Vec<usize> {
    let mut counts = vec![0; bins];
    if bins == 0 || hi <= lo {
        return counts;
    }
    let width = (hi - lo) / bins as f64;

    for v in values.iter().copied().filter(|v| v.is_finite()) {
        if v < lo || v > hi {
            continue;
        }
        let index = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
}

/// Values of one column grouped by state, states in order of first appearance
#[must_use]
pub fn values_by_state(counties: &[AnnotatedCounty], column: MetricColumn) -> Vec<(String, Vec<f64>)> {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for county in counties {
        let state = county.state_name();
        let index = *positions.entry(state).or_insert_with(|| {
            groups.push((state.to_string(), Vec::new()));
            groups.len() - 1
        });
        groups[index].1.push(column.value(county));
    }

    groups
}
