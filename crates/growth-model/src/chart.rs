use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::measurement::PatientSample;
use crate::reference::PercentileSet;

/// One row of a reconciled chart series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub axis: f64,
    pub percentiles: PercentileSet,
    pub patient: Option<PatientSample>,
}

/// Percentile result as shown to a user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PercentileLabel {
    /// `"< 0.1th"`
    BelowTenthOfPercent,
    /// `"< 3rd"`
    BelowThird,
    /// `"> 97th"`
    AboveNinetySeventh,
    /// `"> 99.9th"`
    AboveNinetyNineNine,
    /// `"{x.x}th"`
    Percentile(f64),
}

impl PercentileLabel {
    /// Numeric percentile, for computed labels only.
    pub fn value(&self) -> Option<f64> {
        match self {
            PercentileLabel::Percentile(value) => Some(*value),
            _ => None,
        }
    }

    /// Position usable for ordering labels: open bounds map to their limit.
    pub fn rank(&self) -> f64 {
        match self {
            PercentileLabel::BelowTenthOfPercent => 0.0,
            PercentileLabel::BelowThird => 0.0,
            PercentileLabel::AboveNinetySeventh => 100.0,
            PercentileLabel::AboveNinetyNineNine => 100.0,
            PercentileLabel::Percentile(value) => *value,
        }
    }
}

impl fmt::Display for PercentileLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PercentileLabel::BelowTenthOfPercent => write!(f, "< 0.1th"),
            PercentileLabel::BelowThird => write!(f, "< 3rd"),
            PercentileLabel::AboveNinetySeventh => write!(f, "> 97th"),
            PercentileLabel::AboveNinetyNineNine => write!(f, "> 99.9th"),
            PercentileLabel::Percentile(value) => {
                // Ties round away from zero.
                let rounded = (value * 10.0).round() / 10.0;
                write!(f, "{rounded:.1}th")
            }
        }
    }
}

impl Serialize for PercentileLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_display() {
        assert_eq!(PercentileLabel::Percentile(50.0).to_string(), "50.0th");
        assert_eq!(PercentileLabel::Percentile(97.26).to_string(), "97.3th");
        assert_eq!(PercentileLabel::BelowThird.to_string(), "< 3rd");
        assert_eq!(PercentileLabel::AboveNinetyNineNine.to_string(), "> 99.9th");
    }

    #[test]
    fn label_ties_round_away_from_zero() {
        assert_eq!(PercentileLabel::Percentile(3.25).to_string(), "3.3th");
        assert_eq!(PercentileLabel::Percentile(50.25).to_string(), "50.3th");
        assert_eq!(PercentileLabel::Percentile(84.95).to_string(), "85.0th");
    }
}
