//! Tests for the full vulnerability analysis

use std::collections::HashMap;

use census_vuln::algorithm::vulnerability::{
    AnalysisBuilder, AnalysisConfig, MetricColumn, VulnerabilityAnalysis, VulnerabilityWeights,
};
use census_vuln::models::{PriorityLevel, RowDefect};
use census_vuln::{AnnotatedCounty, CensusError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::utils::{ranked_counties, raw_county, synthetic_counties};

fn by_label(counties: &[AnnotatedCounty]) -> HashMap<String, (f64, Option<PriorityLevel>)> {
    counties
        .iter()
        .map(|c| {
            (
                c.county_state().to_string(),
                (c.vulnerability_score, c.priority),
            )
        })
        .collect()
}

#[test]
fn test_analysis_config_defaults() {
    let config = AnalysisConfig::default();
    assert_eq!(config.weights, VulnerabilityWeights::default());
    assert!((config.weights.poverty_rate - 0.35).abs() < f64::EPSILON);
    assert!((config.weights.under_5_poverty_proportion - 0.40).abs() < f64::EPSILON);
    assert!((config.weights.non_employment - 0.25).abs() < f64::EPSILON);
    assert!((config.z_score_threshold - 3.0).abs() < f64::EPSILON);

    let analysis = AnalysisBuilder::new().with_z_score_threshold(2.5).build();
    assert!((analysis.config().z_score_threshold - 2.5).abs() < f64::EPSILON);
}

#[test]
fn test_scores_span_0_to_100() {
    let rows = synthetic_counties(300, 7);
    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();

    assert_eq!(result.len(), 300);
    let stats = result.describe(MetricColumn::VulnerabilityScore).unwrap();
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 100.0);

    for county in &result.counties {
        assert!((0.0..=100.0).contains(&county.vulnerability_score));
        assert!((0.0..=1.0).contains(&county.metrics.total_poverty_rate));
        assert!(county.priority.is_some());
    }
}

#[test]
fn test_ranked_scores_and_priorities() {
    let rows = ranked_counties(10, |_| "Texas".to_string());
    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();

    let first = &result.counties[0];
    let last = &result.counties[9];
    assert_eq!(first.vulnerability_score, 0.0);
    assert_eq!(last.vulnerability_score, 100.0);
    assert_eq!(first.priority, Some(PriorityLevel::VeryLow));
    assert_eq!(last.priority, Some(PriorityLevel::VeryHigh));

    // Scores rise with the index, so priorities never fall
    for pair in result.counties.windows(2) {
        assert!(pair[0].vulnerability_score < pair[1].vulnerability_score);
        assert!(pair[0].priority <= pair[1].priority);
    }

    let top = result.top_vulnerable(3);
    let labels: Vec<&str> = top.iter().map(|c| c.county_state()).collect();
    assert_eq!(labels, ["County 9, Texas", "County 8, Texas", "County 7, Texas"]);
    assert_eq!(result.top_vulnerable_indices(3), [9, 8, 7]);
}

#[test]
fn test_priority_buckets_are_balanced() {
    let rows = ranked_counties(200, |_| "Ohio".to_string());
    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();

    let counts = result.priority_counts();
    assert_eq!(counts.len(), 5);
    for (level, count) in counts {
        assert!(
            (38..=42).contains(&count),
            "{level} holds {count} of 200 counties"
        );
    }
}

#[test]
fn test_very_high_by_state_ordering() {
    // With 20 strictly increasing scores the top 4 are "Very High"
    let states = |i: usize| match i {
        16 | 18 => "Texas",
        17 => "Ohio",
        19 => "Alabama",
        _ => "Utah",
    }
    .to_string();
    let rows = ranked_counties(20, states);
    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();

    assert_eq!(
        result.very_high_by_state(),
        vec![
            ("Texas".to_string(), 2),
            ("Alabama".to_string(), 1),
            ("Ohio".to_string(), 1),
        ]
    );
}

#[test]
fn test_incomplete_rows_are_dropped() {
    let mut rows = ranked_counties(6, |_| "Utah".to_string());
    rows[1].population = None;
    rows[3].county_state = Some("No State Here".to_string());
    rows[4].employed_total = Some(-1);

    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(result.cleaning.rows_in, 6);
    assert_eq!(result.cleaning.rows_kept, 3);
    assert_eq!(result.cleaning.rows_dropped(), 3);
    assert_eq!(
        result.cleaning.defects.get(&RowDefect::MissingField("population")),
        Some(&1)
    );
    assert_eq!(
        result.cleaning.defects.get(&RowDefect::MissingStateName),
        Some(&1)
    );
    assert_eq!(
        result
            .cleaning
            .defects
            .get(&RowDefect::NegativeValue("employed_total")),
        Some(&1)
    );

    // Survivors keep API order
    let labels: Vec<&str> = result.counties.iter().map(|c| c.county_state()).collect();
    assert_eq!(labels, ["County 0, Utah", "County 2, Utah", "County 5, Utah"]);
}

#[test]
fn test_all_rows_incomplete_is_an_error() {
    let mut rows = ranked_counties(3, |_| "Utah".to_string());
    for row in &mut rows {
        row.poverty_count = None;
    }

    let err = VulnerabilityAnalysis::default().run(&rows).unwrap_err();
    assert!(matches!(err, CensusError::EmptyDataset { dropped: 3 }));
}

#[test]
fn test_zero_population_gives_nan_without_failing() {
    let mut rows = ranked_counties(12, |_| "Ohio".to_string());
    rows.push(raw_county(99, "Empty County, Ohio", 0, 0, 0, 0, 0));

    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();
    let empty = result
        .counties
        .iter()
        .find(|c| c.county_state() == "Empty County, Ohio")
        .unwrap();

    assert!(empty.metrics.total_poverty_rate.is_nan());
    assert!(empty.vulnerability_score.is_nan());
    assert_eq!(empty.priority, None);

    // The other counties still span the full range
    let stats = result.describe(MetricColumn::VulnerabilityScore).unwrap();
    assert_eq!(stats.count, 12);
    assert_eq!(stats.min, 0.0);
    assert_eq!(stats.max, 100.0);
    assert!(
        result
            .top_vulnerable(20)
            .iter()
            .all(|c| !c.vulnerability_score.is_nan())
    );
}

#[test]
fn test_identical_counties_cannot_be_bucketed() {
    // Zero score range leaves every score NaN, so no quantile edge exists
    let rows: Vec<_> = (0..8)
        .map(|i| raw_county(i, &format!("Twin {i}, Utah"), 10_000, 5_000, 1_000, 600, 100))
        .collect();

    let err = VulnerabilityAnalysis::default().run(&rows).unwrap_err();
    assert!(matches!(err, CensusError::DuplicateBinEdges { .. }));
}

#[test]
fn test_single_county_cannot_be_bucketed() {
    let rows = ranked_counties(1, |_| "Utah".to_string());
    let err = VulnerabilityAnalysis::default().run(&rows).unwrap_err();
    assert!(matches!(err, CensusError::DuplicateBinEdges { .. }));
}

#[test]
fn test_repeated_scores_cannot_be_bucketed() {
    let mut rows: Vec<_> = (0..6)
        .map(|i| raw_county(i, &format!("Twin {i}, Utah"), 10_000, 5_000, 1_000, 600, 100))
        .collect();
    rows.push(raw_county(7, "Poor County, Utah", 10_000, 2_000, 4_000, 600, 900));

    let err = VulnerabilityAnalysis::default().run(&rows).unwrap_err();
    assert!(matches!(err, CensusError::DuplicateBinEdges { .. }));
}

#[test]
fn test_analysis_is_deterministic() {
    let rows = synthetic_counties(150, 42);
    let analysis = VulnerabilityAnalysis::default();

    let first = analysis.run(&rows).unwrap();
    let second = analysis.run(&rows).unwrap();
    assert_eq!(first.counties, second.counties);
    assert_eq!(first.summary(5), second.summary(5));
}

#[test]
fn test_row_order_does_not_change_scores() {
    let rows = synthetic_counties(120, 9);
    let mut shuffled = rows.clone();
    shuffled.shuffle(&mut StdRng::seed_from_u64(1));

    let analysis = VulnerabilityAnalysis::default();
    let in_order = by_label(&analysis.run(&rows).unwrap().counties);
    let reordered = by_label(&analysis.run(&shuffled).unwrap().counties);

    assert_eq!(in_order, reordered);
}

#[test]
fn test_summary_mentions_levels_and_top_counties() {
    let rows = ranked_counties(10, |_| "Texas".to_string());
    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();

    let summary = result.summary(2);
    assert!(summary.contains("Counties Analysed: 10"));
    assert!(summary.contains("Very High: 2"));
    assert!(summary.contains("Top 2 Most Vulnerable Counties"));
    assert!(summary.contains("County 9, Texas: 100.00"));
    assert!(summary.contains("Poverty Count Outliers: 0"));
}
