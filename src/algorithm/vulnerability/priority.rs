//! Equal-frequency bucketing of vulnerability scores
//!
//! Edges are the 0, 1/k, ..., 1 quantiles of the non-`NaN` scores, using
//! linear interpolation between closest ranks. Buckets are right-closed and
//! the lowest edge belongs to the first bucket.

use smallvec::SmallVec;

use crate::error::{CensusError, Result};
use crate::models::PriorityLevel;

/// Quantile edges for up to eight buckets stay on the stack
pub type BinEdges = SmallVec<[f64; 9]>;

/// Linear-interpolated quantile of already sorted data
///
/// `q` is a fraction in `0.0..=1.0`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower] + fraction * (sorted[upper] - sorted[lower])
    }
}

/// Edges splitting the non-`NaN` values into `bins` equal-frequency buckets
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn quantile_edges(values: &[f64], bins: usize) -> BinEdges {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() || bins == 0 {
        return BinEdges::new();
    }
    sorted.sort_by(f64::total_cmp);

    (0..=bins)
        .map(|i| quantile_sorted(&sorted, i as f64 / bins as f64))
        .collect()
}

/// Zero-based bucket of `value` given ascending `edges`
#[must_use]
pub fn bucket_index(value: f64, edges: &[f64]) -> Option<usize> {
    if value.is_nan() || edges.len() < 2 {
        return None;
    }
    let (first, last) = (edges[0], edges[edges.len() - 1]);
    if value < first || value > last {
        return None;
    }
    // Right-closed: value lands in the first bucket whose upper edge is >= value
    Some(edges[1..].partition_point(|edge| *edge < value))
}

/// Assign one of the five priority levels to each score
///
/// Returns `None` for `NaN` scores. Fails when two quantile edges coincide,
/// and when no score is a number, in which case every edge is `NaN`.
pub fn assign_priority(scores: &[f64]) -> Result<Vec<Option<PriorityLevel>>> {
    let bins = PriorityLevel::ALL.len();
    let edges = quantile_edges(scores, bins);
    if edges.is_empty() {
        return Err(CensusError::DuplicateBinEdges {
            edges: vec![f64::NAN; bins + 1],
        });
    }

    if edges.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(CensusError::DuplicateBinEdges {
            edges: edges.to_vec(),
        });
    }

    log::debug!("Priority bucket edges: {edges:?}");

    Ok(scores
        .iter()
        .map(|&score| bucket_index(score, &edges).and_then(PriorityLevel::from_bucket))
        .collect())
}
