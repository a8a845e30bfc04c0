use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{GrowthError, Result};

/// Independent variable of a reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisKind {
    /// Age in years (tables are indexed by month and converted).
    AgeYears,
    /// Length or standing height in centimeters.
    HeightCm,
}

impl AxisKind {
    pub fn label(&self) -> &'static str {
        match self {
            AxisKind::AgeYears => "Age (years)",
            AxisKind::HeightCm => "Height (cm)",
        }
    }
}

/// A single anthropometric quantity carried by a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Weight,
    Height,
    HeadCircumference,
    Bmi,
    ArmCircumference,
    SubscapularSkinfold,
    TricepsSkinfold,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Height => "height",
            Metric::HeadCircumference => "head_circumference",
            Metric::Bmi => "bmi",
            Metric::ArmCircumference => "arm_circumference",
            Metric::SubscapularSkinfold => "subscapular_skinfold",
            Metric::TricepsSkinfold => "triceps_skinfold",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Weight => "kg",
            Metric::Bmi => "kg/m²",
            Metric::SubscapularSkinfold | Metric::TricepsSkinfold => "mm",
            Metric::Height | Metric::HeadCircumference | Metric::ArmCircumference => "cm",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A growth chart: one patient metric plotted against one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Indicator {
    WeightForAge,
    HeightForAge,
    HeadCircumferenceForAge,
    BmiForAge,
    ArmCircumferenceForAge,
    SubscapularSkinfoldForAge,
    TricepsSkinfoldForAge,
    /// Weight against recumbent length (< 85 cm) spliced with standing height.
    WeightForHeight,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::WeightForAge,
        Indicator::HeightForAge,
        Indicator::HeadCircumferenceForAge,
        Indicator::BmiForAge,
        Indicator::ArmCircumferenceForAge,
        Indicator::SubscapularSkinfoldForAge,
        Indicator::TricepsSkinfoldForAge,
        Indicator::WeightForHeight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::WeightForAge => "weight-for-age",
            Indicator::HeightForAge => "height-for-age",
            Indicator::HeadCircumferenceForAge => "head-circumference-for-age",
            Indicator::BmiForAge => "bmi-for-age",
            Indicator::ArmCircumferenceForAge => "arm-circumference-for-age",
            Indicator::SubscapularSkinfoldForAge => "subscapular-skinfold-for-age",
            Indicator::TricepsSkinfoldForAge => "triceps-skinfold-for-age",
            Indicator::WeightForHeight => "weight-for-height",
        }
    }

    pub fn axis(&self) -> AxisKind {
        match self {
            Indicator::WeightForHeight => AxisKind::HeightCm,
            _ => AxisKind::AgeYears,
        }
    }

    /// Patient metric plotted on this chart.
    pub fn metric(&self) -> Metric {
        match self {
            Indicator::WeightForAge | Indicator::WeightForHeight => Metric::Weight,
            Indicator::HeightForAge => Metric::Height,
            Indicator::HeadCircumferenceForAge => Metric::HeadCircumference,
            Indicator::BmiForAge => Metric::Bmi,
            Indicator::ArmCircumferenceForAge => Metric::ArmCircumference,
            Indicator::SubscapularSkinfoldForAge => Metric::SubscapularSkinfold,
            Indicator::TricepsSkinfoldForAge => Metric::TricepsSkinfold,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Indicator {
    type Err = GrowthError;

    /// Accepts the kebab-case name or the short chart code (`wfa`, `hfa`, ...).
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "weight-for-age" | "wfa" => Ok(Indicator::WeightForAge),
            "height-for-age" | "length-for-age" | "hfa" | "lhfa" => Ok(Indicator::HeightForAge),
            "head-circumference-for-age" | "hcfa" => Ok(Indicator::HeadCircumferenceForAge),
            "bmi-for-age" | "bmi" | "bmifa" => Ok(Indicator::BmiForAge),
            "arm-circumference-for-age" | "acfa" => Ok(Indicator::ArmCircumferenceForAge),
            "subscapular-skinfold-for-age" | "ssfa" => Ok(Indicator::SubscapularSkinfoldForAge),
            "triceps-skinfold-for-age" | "tsfa" => Ok(Indicator::TricepsSkinfoldForAge),
            "weight-for-height" | "weight-for-length" | "wfh" | "wfl" | "wflh" => {
                Ok(Indicator::WeightForHeight)
            }
            _ => Err(GrowthError::UnknownIndicator(s.to_string())),
        }
    }
}

/// One published reference table, as distributed per gender and source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Wfa,
    /// Length/height-for-age (infant table for CDC).
    Lhfa,
    /// Stature-for-age (CDC, 24 months and over).
    Hfa,
    Hcfa,
    Bmifa,
    Acfa,
    Ssfa,
    Tsfa,
    /// Weight-for-length (recumbent).
    Wfl,
    /// Weight-for-height (standing).
    Wfh,
}

impl TableKind {
    pub const ALL: [TableKind; 10] = [
        TableKind::Wfa,
        TableKind::Lhfa,
        TableKind::Hfa,
        TableKind::Hcfa,
        TableKind::Bmifa,
        TableKind::Acfa,
        TableKind::Ssfa,
        TableKind::Tsfa,
        TableKind::Wfl,
        TableKind::Wfh,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TableKind::Wfa => "wfa",
            TableKind::Lhfa => "lhfa",
            TableKind::Hfa => "hfa",
            TableKind::Hcfa => "hcfa",
            TableKind::Bmifa => "bmifa",
            TableKind::Acfa => "acfa",
            TableKind::Ssfa => "ssfa",
            TableKind::Tsfa => "tsfa",
            TableKind::Wfl => "wfl",
            TableKind::Wfh => "wfh",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for TableKind {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.code() == normalized)
            .ok_or_else(|| GrowthError::UnknownTableKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Boys,
    Girls,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Boys => "boys",
            Gender::Girls => "girls",
        }
    }

    /// CDC `Sex` column code (1 = male, 2 = female).
    pub fn from_sex_code(code: f64) -> Option<Gender> {
        if code == 1.0 {
            Some(Gender::Boys)
        } else if code == 2.0 {
            Some(Gender::Girls)
        } else {
            None
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "boys" | "boy" | "male" | "m" => Ok(Gender::Boys),
            "girls" | "girl" | "female" | "f" => Ok(Gender::Girls),
            _ => Err(GrowthError::UnknownGender(s.to_string())),
        }
    }
}

/// Publisher of a reference table set.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSource {
    /// WHO Child Growth Standards (default).
    #[default]
    Who,
    /// CDC 2000 growth charts.
    Cdc,
}

impl ReferenceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceSource::Who => "who",
            ReferenceSource::Cdc => "cdc",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == ReferenceSource::default()
    }
}

impl fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReferenceSource {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "who" => Ok(ReferenceSource::Who),
            "cdc" => Ok(ReferenceSource::Cdc),
            _ => Err(GrowthError::UnknownSource(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_aliases_parse() {
        assert_eq!("wfa".parse::<Indicator>(), Ok(Indicator::WeightForAge));
        assert_eq!("LHFA".parse::<Indicator>(), Ok(Indicator::HeightForAge));
        assert_eq!(
            "weight_for_length".parse::<Indicator>(),
            Ok(Indicator::WeightForHeight)
        );
        assert!("stature".parse::<Indicator>().is_err());
    }

    #[test]
    fn descriptor_fields_parse() -> Result<()> {
        let kind: TableKind = " WFH ".parse()?;
        let gender: Gender = "female".parse()?;
        let source: ReferenceSource = "CDC".parse()?;
        assert_eq!(
            (kind, gender, source),
            (TableKind::Wfh, Gender::Girls, ReferenceSource::Cdc)
        );
        assert_eq!(
            "unknown".parse::<Gender>(),
            Err(GrowthError::UnknownGender("unknown".to_string()))
        );
        Ok(())
    }
}
