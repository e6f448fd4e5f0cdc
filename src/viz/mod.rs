//! Distribution charts for the analysed counties
//!
//! `prepare` computes what is drawn; `render` draws it to PNG files.

pub mod prepare;
pub mod render;

pub use prepare::{BoxStats, histogram_bins, values_by_state};
pub use render::{
    POVERTY_RATES_FILE, STATE_UNDER_5_FILE, VULNERABILITY_HISTOGRAM_FILE, VizConfig, render_all,
    render_poverty_rates, render_state_under_5, render_vulnerability_histogram,
};
