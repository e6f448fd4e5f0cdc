//! County-level census records
//!
//! `RawCountyRecord` mirrors one element of the API's `data` array with every
//! field optional. `CountyRecord` is the cleaned form: every count present and
//! non-negative, plus the state name split out of the `county, state` label.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row as delivered by the census API
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawCountyRecord {
    #[serde(default, deserialize_with = "lenient_count")]
    pub county: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub state: Option<i64>,
    #[serde(default)]
    pub county_state: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub population: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_pop_male: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub employed_male: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub employed_total: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub male_pop_under_5: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub female_pop_under_5: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub male_pop_over_75: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub female_pop_over_75: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub poverty_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub poverty_count_male_under_5: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub poverty_count_female_under_5: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub poverty_count_male_over_75: Option<i64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub poverty_count_female_over_75: Option<i64>,
}

/// Accept integers, integral floats, numeric strings and null.
///
/// Anything else decodes as `None` so the cleaning pass drops the row.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(count_from_value))
}

fn count_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn integral(value: f64) -> Option<i64> {
    (value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15).then_some(value as i64)
}

/// Why a raw row could not be cleaned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowDefect {
    /// A field was null, absent or not numeric
    MissingField(&'static str),
    /// A count was negative
    NegativeValue(&'static str),
    /// A FIPS code does not fit its column
    OutOfRange(&'static str),
    /// The `county, state` label has no state part
    MissingStateName,
}

impl fmt::Display for RowDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "missing {name}"),
            Self::NegativeValue(name) => write!(f, "negative {name}"),
            Self::OutOfRange(name) => write!(f, "{name} out of range"),
            Self::MissingStateName => write!(f, "no state in county_state"),
        }
    }
}

/// A complete county row after cleaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountyRecord {
    pub county: u32,
    pub state: u32,
    pub county_state: String,
    pub state_name: String,
    pub population: u64,
    pub total_pop_male: u64,
    pub employed_male: u64,
    pub employed_total: u64,
    pub male_pop_under_5: u64,
    pub female_pop_under_5: u64,
    pub male_pop_over_75: u64,
    pub female_pop_over_75: u64,
    pub poverty_count: u64,
    pub poverty_count_male_under_5: u64,
    pub poverty_count_female_under_5: u64,
    pub poverty_count_male_over_75: u64,
    pub poverty_count_female_over_75: u64,
}

fn require(value: Option<i64>, name: &'static str) -> Result<u64, RowDefect> {
    let value = value.ok_or(RowDefect::MissingField(name))?;
    u64::try_from(value).map_err(|_| RowDefect::NegativeValue(name))
}

fn require_code(value: Option<i64>, name: &'static str) -> Result<u32, RowDefect> {
    let value = require(value, name)?;
    u32::try_from(value).map_err(|_| RowDefect::OutOfRange(name))
}

/// Split `"Autauga County, Alabama"` into its state part
#[must_use]
pub fn state_name_from_label(county_state: &str) -> Option<&str> {
    county_state.split(", ").nth(1)
}

impl TryFrom<&RawCountyRecord> for CountyRecord {
    type Error = RowDefect;

    fn try_from(raw: &RawCountyRecord) -> Result<Self, Self::Error> {
        let county_state = raw
            .county_state
            .clone()
            .ok_or(RowDefect::MissingField("county_state"))?;
        let state_name = state_name_from_label(&county_state)
            .ok_or(RowDefect::MissingStateName)?
            .to_string();

        Ok(Self {
            county: require_code(raw.county, "county")?,
            state: require_code(raw.state, "state")?,
            population: require(raw.population, "population")?,
            total_pop_male: require(raw.total_pop_male, "total_pop_male")?,
            employed_male: require(raw.employed_male, "employed_male")?,
            employed_total: require(raw.employed_total, "employed_total")?,
            male_pop_under_5: require(raw.male_pop_under_5, "male_pop_under_5")?,
            female_pop_under_5: require(raw.female_pop_under_5, "female_pop_under_5")?,
            male_pop_over_75: require(raw.male_pop_over_75, "male_pop_over_75")?,
            female_pop_over_75: require(raw.female_pop_over_75, "female_pop_over_75")?,
            poverty_count: require(raw.poverty_count, "poverty_count")?,
            poverty_count_male_under_5: require(
                raw.poverty_count_male_under_5,
                "poverty_count_male_under_5",
            )?,
            poverty_count_female_under_5: require(
                raw.poverty_count_female_under_5,
                "poverty_count_female_under_5",
            )?,
            poverty_count_male_over_75: require(
                raw.poverty_count_male_over_75,
                "poverty_count_male_over_75",
            )?,
            poverty_count_female_over_75: require(
                raw.poverty_count_female_over_75,
                "poverty_count_female_over_75",
            )?,
            county_state,
            state_name,
        })
    }
}

impl CountyRecord {
    /// Children under five, both sexes
    #[must_use]
    pub const fn pop_under_5(&self) -> u64 {
        self.male_pop_under_5 + self.female_pop_under_5
    }

    /// Residents over 75, both sexes
    #[must_use]
    pub const fn pop_over_75(&self) -> u64 {
        self.male_pop_over_75 + self.female_pop_over_75
    }

    /// Children under five below the poverty line
    #[must_use]
    pub const fn poverty_count_under_5(&self) -> u64 {
        self.poverty_count_male_under_5 + self.poverty_count_female_under_5
    }

    /// Residents over 75 below the poverty line
    #[must_use]
    pub const fn poverty_count_over_75(&self) -> u64 {
        self.poverty_count_male_over_75 + self.poverty_count_female_over_75
    }
}
