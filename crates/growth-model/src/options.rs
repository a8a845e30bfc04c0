//! Configuration options for reference table building and lookup.

use serde::{Deserialize, Serialize};

/// What to do with rows whose percentile columns decrease with rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonotonicityPolicy {
    /// Keep the row silently.
    Ignore,
    /// Keep the row and log a warning.
    #[default]
    Warn,
    /// Drop the row.
    Reject,
}

/// Nearest reference point search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStrategy {
    /// Scan every point.
    #[default]
    Linear,
    /// Binary search over the sorted axis.
    Binary,
}

/// Options controlling reference series construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    pub monotonicity: MonotonicityPolicy,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that drop non-monotone rows.
    pub fn strict() -> Self {
        Self {
            monotonicity: MonotonicityPolicy::Reject,
        }
    }

    pub fn with_monotonicity(mut self, policy: MonotonicityPolicy) -> Self {
        self.monotonicity = policy;
        self
    }
}
