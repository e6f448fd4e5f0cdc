//! Common domain type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Priority bucket derived from the vulnerability score quantiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityLevel {
    /// Lowest fifth of vulnerability scores
    VeryLow,
    /// Second fifth
    Low,
    /// Middle fifth
    Medium,
    /// Fourth fifth
    High,
    /// Top fifth of vulnerability scores
    VeryHigh,
}

impl PriorityLevel {
    /// All levels from lowest to highest
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    /// Level for a zero-based bucket index
    #[must_use]
    pub fn from_bucket(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
