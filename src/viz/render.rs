//! Chart rendering with plotters
//!
//! Each chart is written as a PNG through the bitmap backend.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::algorithm::vulnerability::{AnalysisResult, MetricColumn};
use crate::error::util::ensure_directory;
use crate::error::{CensusError, Result};
use crate::models::AnnotatedCounty;
use crate::utils::logging::{log_output_written, log_warning};
use crate::viz::prepare::{BoxStats, histogram_bins, values_by_state};

type DrawResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// File name of the age-group poverty box plot
pub const POVERTY_RATES_FILE: &str = "poverty_rates.png";
/// File name of the per-state under-5 poverty box plot
pub const STATE_UNDER_5_FILE: &str = "under_5_poverty_by_state.png";
/// File name of the vulnerability score histogram
pub const VULNERABILITY_HISTOGRAM_FILE: &str = "vulnerability_histogram.png";

/// Chart output settings
#[derive(Debug, Clone)]
pub struct VizConfig {
    pub output_dir: PathBuf,
    pub rates_size: (u32, u32),
    pub state_size: (u32, u32),
    pub histogram_size: (u32, u32),
    /// Number of histogram bins over 0..=100
    pub histogram_bins: usize,
    pub font_size: f64,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            rates_size: (900, 450),
            state_size: (1800, 900),
            histogram_size: (900, 600),
            histogram_bins: 20,
            font_size: 16.0,
        }
    }
}

/// Render every chart, returning the paths written
///
/// Charts without any finite value to show are skipped with a warning.
pub fn render_all(result: &AnalysisResult, config: &VizConfig) -> Result<Vec<PathBuf>> {
    ensure_directory(&config.output_dir, "plots")?;
    let mut written = Vec::new();

    let path = config.output_dir.join(POVERTY_RATES_FILE);
    if render_poverty_rates(&path, &result.counties, config)? {
        written.push(path);
    }

    let path = config.output_dir.join(STATE_UNDER_5_FILE);
    if render_state_under_5(&path, &result.counties, config)? {
        written.push(path);
    }

    let path = config.output_dir.join(VULNERABILITY_HISTOGRAM_FILE);
    if render_vulnerability_histogram(&path, &result.counties, config)? {
        written.push(path);
    }

    Ok(written)
}

/// Box plot of total, under-5 and over-75 poverty rates
pub fn render_poverty_rates(path: &Path, counties: &[AnnotatedCounty], config: &VizConfig) -> Result<bool> {
    let labels = ["Total", "Under 5", "Over 75"];
    let columns = [
        MetricColumn::TotalPovertyRate,
        MetricColumn::Under5PovertyRate,
        MetricColumn::Over75PovertyRate,
    ];

    let groups: Vec<(&str, BoxStats)> = labels
        .iter()
        .zip(columns)
        .filter_map(|(label, column)| {
            let values: Vec<f64> = counties.iter().map(|c| column.value(c)).collect();
            BoxStats::from_values(&values).map(|stats| (*label, stats))
        })
        .collect();

    draw_box_plot(
        path,
        "Poverty Rates Distribution by Age Group",
        "",
        "Poverty Rate",
        &groups,
        config.rates_size,
        config.font_size,
        false,
    )
}

/// Box plot of the under-5 poverty rate for each state
pub fn render_state_under_5(path: &Path, counties: &[AnnotatedCounty], config: &VizConfig) -> Result<bool> {
    let by_state = values_by_state(counties, MetricColumn::Under5PovertyRate);
    let groups: Vec<(&str, BoxStats)> = by_state
        .iter()
        .filter_map(|(state, values)| {
            BoxStats::from_values(values).map(|stats| (state.as_str(), stats))
        })
        .collect();

    draw_box_plot(
        path,
        "Under-5 Poverty Rate Distribution by State",
        "State",
        "Under-5 Poverty Rate",
        &groups,
        config.state_size,
        config.font_size,
        true,
    )
}

#[allow(clippy::too_many_arguments)]
fn draw_box_plot(
    path: &Path,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    groups: &[(&str, BoxStats)],
    size: (u32, u32),
    font_size: f64,
    rotate_labels: bool,
) -> Result<bool> {
    if groups.is_empty() {
        log_warning(&format!("No finite values to plot for '{caption}'"), Some(path));
        return Ok(false);
    }

    draw_box_plot_inner(path, caption, x_desc, y_desc, groups, size, font_size, rotate_labels)
        .map_err(CensusError::plot)?;
    log_output_written(caption, path);
    Ok(true)
}

/// Box width in x units; boxes sit on integer positions
const BOX_WIDTH: f64 = 0.6;

#[allow(clippy::too_many_arguments, clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn draw_box_plot_inner(
    path: &Path,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    groups: &[(&str, BoxStats)],
    size: (u32, u32),
    font_size: f64,
    rotate_labels: bool,
) -> DrawResult<()> {
    let (lo, hi) = groups
        .iter()
        .map(|(_, stats)| stats.span())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
    let pad = ((hi - lo) * 0.05).max(0.01);
    let x_range = -0.5..(groups.len() as f64 - 0.5);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let label_font = if rotate_labels {
        ("sans-serif", font_size).into_font().transform(FontTransform::Rotate90)
    } else {
        ("sans-serif", font_size).into_font().transform(FontTransform::None)
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", font_size * 2.0).into_font())
        .margin(20)
        .x_label_area_size(if rotate_labels { 160 } else { 50 })
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, (lo - pad)..(hi + pad))?;

    // Only integer positions carry a group label
    let label_at = |x: &f64| {
        let position = x.round();
        if (x - position).abs() > 1e-6 || position < 0.0 {
            return String::new();
        }
        groups
            .get(position as usize)
            .map_or_else(String::new, |(label, _)| (*label).to_string())
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(groups.len())
        .x_label_formatter(&label_at)
        .x_label_style(label_font)
        .draw()?;

    let half = BOX_WIDTH / 2.0;
    let cap = half / 2.0;
    for (i, (_, stats)) in groups.iter().enumerate() {
        let x = i as f64;
        let style = Palette99::pick(i).stroke_width(2);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - half, stats.q1), (x + half, stats.q3)],
            style,
        )))?;

        // Median, then whiskers out to the last value inside the fences
        let lines = [
            vec![(x - half, stats.median), (x + half, stats.median)],
            vec![(x, stats.q3), (x, stats.upper_whisker)],
            vec![(x, stats.q1), (x, stats.lower_whisker)],
            vec![(x - cap, stats.upper_whisker), (x + cap, stats.upper_whisker)],
            vec![(x - cap, stats.lower_whisker), (x + cap, stats.lower_whisker)],
        ];
        chart.draw_series(lines.into_iter().map(|points| PathElement::new(points, style)))?;

        chart.draw_series(
            stats
                .fliers
                .iter()
                .map(|v| Circle::new((x, *v), 2, BLACK.mix(0.6).filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

/// Histogram of vulnerability scores over 0..=100
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn render_vulnerability_histogram(
    path: &Path,
    counties: &[AnnotatedCounty],
    config: &VizConfig,
) -> Result<bool> {
    let scores: Vec<f64> = counties.iter().map(|c| c.vulnerability_score).collect();
    let counts = histogram_bins(&scores, config.histogram_bins, 0.0, 100.0);
    if counts.iter().all(|c| *c == 0) {
        log_warning("No vulnerability scores to plot", Some(path));
        return Ok(false);
    }

    draw_histogram(path, &counts, config).map_err(CensusError::plot)?;
    log_output_written("Vulnerability Score Distribution", path);
    Ok(true)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn draw_histogram(path: &Path, counts: &[usize], config: &VizConfig) -> DrawResult<()> {
    let bins = counts.len() as u32;
    let width = 100.0 / f64::from(bins);
    let max_count = counts.iter().copied().max().unwrap_or(0) as u32;

    let root = BitMapBackend::new(path, config.histogram_size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Vulnerability Score Distribution",
            ("sans-serif", config.font_size * 2.0).into_font(),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..bins).into_segmented(), 0u32..max_count + max_count / 10 + 1)?;

    let label_for = |v: &SegmentValue<u32>| match v {
        SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => format!("{:.0}", f64::from(*i) * width),
        SegmentValue::Last => "100".to_string(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Vulnerability Score")
        .y_desc("Count")
        .x_label_formatter(&label_for)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.6).filled())
            .margin(1)
            .data(
                counts
                    .iter()
                    .enumerate()
                    .map(|(i, count)| (i as u32, *count as u32)),
            ),
    )?;

    root.present()?;
    Ok(())
}
