//! Tests for poverty count outlier detection

use census_vuln::algorithm::vulnerability::{
    AnalysisBuilder, VulnerabilityAnalysis, flag_outliers, z_scores,
};

use crate::utils::{ranked_counties, raw_county};

#[test]
fn test_only_high_side_is_flagged() {
    let flags = flag_outliers(&[3.5, -3.5, 3.0, f64::NAN, 0.0], 3.0);
    assert_eq!(flags, [true, false, false, false, false]);
}

#[test]
fn test_one_extreme_county_among_100() {
    let mut rows = ranked_counties(99, |_| "Ohio".to_string());
    rows.push(raw_county(
        500,
        "Huge County, California",
        1_000_000,
        500_000,
        250_000,
        60_000,
        20_000,
    ));

    let result = VulnerabilityAnalysis::default().run(&rows).unwrap();
    let outliers = result.outliers();

    assert_eq!(outliers.len(), 1);
    assert_eq!(outliers[0].county_state(), "Huge County, California");
    assert_eq!(result.outlier_indices(), [99]);
    assert!(outliers[0].z_score > 9.0);
    assert!(
        result
            .counties
            .iter()
            .filter(|c| !c.is_outlier)
            .all(|c| c.z_score < 3.0)
    );
}

#[test]
fn test_z_scores_are_centered() {
    let z = z_scores(&[10.0, 20.0, 30.0]);
    assert!((z[0] + z[2]).abs() < 1e-12);
    assert_eq!(z[1], 0.0);
}

#[test]
fn test_threshold_is_configurable() {
    // Poverty count 6000 sits about 5.4 standard deviations above the mean
    let mut rows = ranked_counties(30, |_| "Utah".to_string());
    rows.push(raw_county(99, "Big County, Utah", 100_000, 50_000, 6_000, 6_000, 700));

    let default = VulnerabilityAnalysis::default().run(&rows).unwrap();
    let strict = AnalysisBuilder::new()
        .with_z_score_threshold(6.0)
        .build()
        .run(&rows)
        .unwrap();

    let flagged: Vec<&str> = default.outliers().iter().map(|c| c.county_state()).collect();
    assert_eq!(flagged, ["Big County, Utah"]);
    assert!(strict.outliers().is_empty());
}
