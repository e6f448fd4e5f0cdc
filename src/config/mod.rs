//! Configuration for the census analysis run.
//!
//! Values come from the process environment. A `.env` file in the working
//! directory is loaded first when present.

use std::fmt;
use std::path::PathBuf;

use crate::algorithm::vulnerability::AnalysisConfig;
use crate::error::{CensusError, Result};

/// Base URL of the county census endpoint
pub const DEFAULT_API_URL: &str = "https://2eraiuh.dlai.link/api/UScensus";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "CENSUS_API_KEY";
/// Environment variable overriding the base URL
pub const API_URL_VAR: &str = "CENSUS_API_URL";
/// Environment variable for the plot directory
pub const OUTPUT_DIR_VAR: &str = "CENSUS_OUTPUT_DIR";
/// Environment variable for the optional Parquet export path
pub const EXPORT_PARQUET_VAR: &str = "CENSUS_EXPORT_PARQUET";
/// Environment variable for the number of preview rows
pub const PREVIEW_ROWS_VAR: &str = "CENSUS_PREVIEW_ROWS";
/// Environment variable toggling plot rendering
pub const PLOTS_VAR: &str = "CENSUS_PLOTS";

/// Configuration for a full fetch-and-analyse run
#[derive(Debug, Clone)]
pub struct CensusConfig {
    /// Base URL of the census endpoint
    pub api_url: String,
    /// API key sent as the `api_key` query parameter
    pub api_key: String,
    /// Directory the PNG plots are written to
    pub output_dir: PathBuf,
    /// Whether to render plots at all
    pub render_plots: bool,
    /// Number of rows shown in each console preview
    pub preview_rows: usize,
    /// Write the annotated table to this Parquet file when set
    pub export_parquet: Option<PathBuf>,
    /// Scoring and outlier parameters
    pub analysis: AnalysisConfig,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            output_dir: PathBuf::from("output"),
            render_plots: true,
            preview_rows: 5,
            export_parquet: None,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl CensusConfig {
    /// Build the configuration from the process environment
    ///
    /// Loads `.env` if one exists, then reads the `CENSUS_*` variables.
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => log::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => log::warn!("Ignoring unreadable .env file: {e}"),
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_key = lookup(API_KEY_VAR)
            .ok_or_else(|| CensusError::config(format!("{API_KEY_VAR} is not set")))?;

        let preview_rows = match lookup(PREVIEW_ROWS_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                CensusError::config(format!("{PREVIEW_ROWS_VAR} must be a whole number, got {raw:?}"))
            })?,
            None => defaults.preview_rows,
        };

        let render_plots = match lookup(PLOTS_VAR) {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                CensusError::config(format!("{PLOTS_VAR} must be a boolean, got {raw:?}"))
            })?,
            None => defaults.render_plots,
        };

        Ok(Self {
            api_url: lookup(API_URL_VAR).unwrap_or(defaults.api_url),
            api_key,
            output_dir: lookup(OUTPUT_DIR_VAR).map_or(defaults.output_dir, PathBuf::from),
            render_plots,
            preview_rows,
            export_parquet: lookup(EXPORT_PARQUET_VAR)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            analysis: defaults.analysis,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl fmt::Display for CensusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Census Configuration:")?;
        writeln!(f, "  API URL: {}", self.api_url)?;
        // Never print the key itself
        let key_state = if self.api_key.is_empty() { "empty" } else { "set" };
        writeln!(f, "  API Key: <{key_state}>")?;
        writeln!(f, "  Output Directory: {}", self.output_dir.display())?;
        writeln!(f, "  Render Plots: {}", self.render_plots)?;
        writeln!(f, "  Preview Rows: {}", self.preview_rows)?;
        if let Some(path) = &self.export_parquet {
            writeln!(f, "  Parquet Export: {}", path.display())?;
        }
        write!(f, "{}", self.analysis)
    }
}
