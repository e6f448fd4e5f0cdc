//! Summary statistics and rankings over analysed counties

use std::fmt;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::algorithm::vulnerability::priority::quantile_sorted;
use crate::models::{AnnotatedCounty, PriorityLevel};

/// Derived numeric columns that can be summarised or plotted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricColumn {
    TotalPovertyRate,
    Under5PovertyRate,
    Over75PovertyRate,
    EmploymentRate,
    Under5PovertyProportion,
    VulnerabilityScore,
    ZScore,
}

impl MetricColumn {
    /// Column name as it appears in the tabular output
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TotalPovertyRate => "total_poverty_rate",
            Self::Under5PovertyRate => "under_5_poverty_rate",
            Self::Over75PovertyRate => "over_75_poverty_rate",
            Self::EmploymentRate => "employment_rate",
            Self::Under5PovertyProportion => "under_5_poverty_proportion",
            Self::VulnerabilityScore => "vulnerability_score",
            Self::ZScore => "z_score",
        }
    }

    /// Value of this column for one county
    #[must_use]
    pub fn value(self, county: &AnnotatedCounty) -> f64 {
        match self {
            Self::TotalPovertyRate => county.metrics.total_poverty_rate,
            Self::Under5PovertyRate => county.metrics.under_5_poverty_rate,
            Self::Over75PovertyRate => county.metrics.over_75_poverty_rate,
            Self::EmploymentRate => county.metrics.employment_rate,
            Self::Under5PovertyProportion => county.metrics.under_5_poverty_proportion,
            Self::VulnerabilityScore => county.vulnerability_score,
            Self::ZScore => county.z_score,
        }
    }
}

/// Descriptive statistics of one column, over finite values only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1`)
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl SummaryStats {
    /// Summarise the finite values of a slice, `None` if there are none
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .sorted_by(f64::total_cmp)
            .collect();

        let count = sorted.len();
        if count == 0 {
            return None;
        }

        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Some(Self {
            count,
            mean,
            std,
            min: sorted[0],
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

impl fmt::Display for SummaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count {} mean {:.4} std {:.4} min {:.4} 25% {:.4} 50% {:.4} 75% {:.4} max {:.4}",
            self.count, self.mean, self.std, self.min, self.q1, self.median, self.q3, self.max
        )
    }
}

/// Rankings and groupings over a set of analysed counties
pub struct VulnerabilityStatistics;

impl VulnerabilityStatistics {
    /// Describe one derived column
    #[must_use]
    pub fn describe(counties: &[AnnotatedCounty], column: MetricColumn) -> Option<SummaryStats> {
        let values: Vec<f64> = counties.iter().map(|c| column.value(c)).collect();
        SummaryStats::from_values(&values)
    }

    /// Positions of the counties with the highest vulnerability score, highest first
    ///
    /// Counties without a score are never included.
    #[must_use]
    pub fn top_vulnerable_indices(counties: &[AnnotatedCounty], n: usize) -> Vec<usize> {
        counties
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.vulnerability_score.is_nan())
            .sorted_by(|(_, a), (_, b)| b.vulnerability_score.total_cmp(&a.vulnerability_score))
            .take(n)
            .map(|(i, _)| i)
            .collect()
    }

    /// Counties with the highest vulnerability score, highest first
    #[must_use]
    pub fn top_vulnerable(counties: &[AnnotatedCounty], n: usize) -> Vec<&AnnotatedCounty> {
        Self::top_vulnerable_indices(counties, n)
            .into_iter()
            .map(|i| &counties[i])
            .collect()
    }

    /// Number of counties in each priority level, lowest level first
    #[must_use]
    pub fn priority_counts(counties: &[AnnotatedCounty]) -> Vec<(PriorityLevel, usize)> {
        let counts = counties.iter().filter_map(|c| c.priority).counts();
        PriorityLevel::ALL
            .iter()
            .map(|level| (*level, counts.get(level).copied().unwrap_or(0)))
            .collect()
    }

    /// "Very High" counties per state, most first; ties ordered by state name
    #[must_use]
    pub fn very_high_by_state(counties: &[AnnotatedCounty]) -> Vec<(String, usize)> {
        let mut per_state: FxHashMap<&str, usize> = FxHashMap::default();
        for county in counties
            .iter()
            .filter(|c| c.priority == Some(PriorityLevel::VeryHigh))
        {
            *per_state.entry(county.state_name()).or_insert(0) += 1;
        }

        per_state
            .into_iter()
            .sorted_by(|(state_a, count_a), (state_b, count_b)| {
                count_b.cmp(count_a).then_with(|| state_a.cmp(state_b))
            })
            .map(|(state, count)| (state.to_string(), count))
            .collect()
    }

    /// Positions of the poverty count outliers, in input order
    #[must_use]
    pub fn outlier_indices(counties: &[AnnotatedCounty]) -> Vec<usize> {
        counties
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_outlier)
            .map(|(i, _)| i)
            .collect()
    }

    /// Counties flagged as poverty count outliers, in input order
    #[must_use]
    pub fn outliers(counties: &[AnnotatedCounty]) -> Vec<&AnnotatedCounty> {
        counties.iter().filter(|c| c.is_outlier).collect()
    }

    /// Generate a plain-text report of the analysis
    #[must_use]
    pub fn generate_summary(counties: &[AnnotatedCounty], top_n: usize) -> String {
        let mut summary = String::new();
        summary.push_str("County Vulnerability Summary:\n");
        summary.push_str(&format!("  Counties Analysed: {}\n", counties.len()));

        for column in [
            MetricColumn::TotalPovertyRate,
            MetricColumn::Under5PovertyRate,
            MetricColumn::Over75PovertyRate,
            MetricColumn::VulnerabilityScore,
        ] {
            if let Some(stats) = Self::describe(counties, column) {
                summary.push_str(&format!("  {}: {stats}\n", column.name()));
            }
        }

        summary.push_str("\nPriority Levels:\n");
        for (level, count) in Self::priority_counts(counties) {
            summary.push_str(&format!("  {level}: {count}\n"));
        }

        let top = Self::top_vulnerable(counties, top_n);
        if !top.is_empty() {
            summary.push_str(&format!("\nTop {} Most Vulnerable Counties:\n", top.len()));
            for county in top {
                summary.push_str(&format!(
                    "  {}: {:.2}\n",
                    county.county_state(),
                    county.vulnerability_score
                ));
            }
        }

        let outliers = Self::outliers(counties);
        summary.push_str(&format!("\nPoverty Count Outliers: {}\n", outliers.len()));
        for county in outliers {
            summary.push_str(&format!(
                "  {}: poverty count {} (z = {:.2})\n",
                county.county_state(),
                county.record.poverty_count,
                county.z_score
            ));
        }

        summary
    }
}
