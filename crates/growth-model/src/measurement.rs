//! Patient observations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::indicator::{AxisKind, Indicator, Metric};

/// Average days per year used for age derivation.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// One patient observation. Metric values are in kg, cm and mm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub date: NaiveDate,
    pub age_years: f64,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub head_circumference: Option<f64>,
    #[serde(default)]
    pub arm_circumference: Option<f64>,
    #[serde(default)]
    pub subscapular_skinfold: Option<f64>,
    #[serde(default)]
    pub triceps_skinfold: Option<f64>,
}

impl Measurement {
    /// Creates an observation with no metric values.
    pub fn new(date: NaiveDate, age_years: f64) -> Self {
        Self {
            date,
            age_years,
            weight: None,
            height: None,
            head_circumference: None,
            arm_circumference: None,
            subscapular_skinfold: None,
            triceps_skinfold: None,
        }
    }

    /// Derives the age from the date of birth (days / 365.25).
    pub fn from_birth_date(birth_date: NaiveDate, date: NaiveDate) -> Self {
        let days = date.signed_duration_since(birth_date).num_days();
        Self::new(date, days as f64 / DAYS_PER_YEAR)
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_head_circumference(mut self, value: f64) -> Self {
        self.head_circumference = Some(value);
        self
    }

    pub fn with_arm_circumference(mut self, value: f64) -> Self {
        self.arm_circumference = Some(value);
        self
    }

    pub fn with_subscapular_skinfold(mut self, value: f64) -> Self {
        self.subscapular_skinfold = Some(value);
        self
    }

    pub fn with_triceps_skinfold(mut self, value: f64) -> Self {
        self.triceps_skinfold = Some(value);
        self
    }

    /// `weight / (height/100)²`; `None` without both values or when height is not positive.
    pub fn bmi(&self) -> Option<f64> {
        let weight = self.weight?;
        let height = self.height?;
        if height <= 0.0 {
            return None;
        }
        let meters = height / 100.0;
        Some(weight / (meters * meters))
    }

    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Weight => self.weight,
            Metric::Height => self.height,
            Metric::HeadCircumference => self.head_circumference,
            Metric::Bmi => self.bmi(),
            Metric::ArmCircumference => self.arm_circumference,
            Metric::SubscapularSkinfold => self.subscapular_skinfold,
            Metric::TricepsSkinfold => self.triceps_skinfold,
        }
    }
}

/// Position of a measurement on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientSample {
    /// The measurement's own axis value, before snapping to a reference point.
    pub axis: f64,
    pub value: f64,
}

/// Chooses the patient value and its axis position from a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSelector {
    pub metric: Metric,
    pub axis: AxisKind,
}

impl MetricSelector {
    pub fn new(metric: Metric, axis: AxisKind) -> Self {
        Self { metric, axis }
    }

    /// Selects a sample using `age_years` as the age axis.
    pub fn select(&self, measurement: &Measurement) -> Option<PatientSample> {
        self.select_with_age(measurement, Some(measurement.age_years))
    }

    /// Selects a sample with an externally supplied age (e.g. corrected age).
    pub fn select_with_age(
        &self,
        measurement: &Measurement,
        age_years: Option<f64>,
    ) -> Option<PatientSample> {
        let value = measurement.value(self.metric)?;
        let axis = match self.axis {
            AxisKind::AgeYears => age_years?,
            AxisKind::HeightCm => measurement.height?,
        };
        (value.is_finite() && axis.is_finite()).then_some(PatientSample { axis, value })
    }
}

impl From<Indicator> for MetricSelector {
    fn from(indicator: Indicator) -> Self {
        Self::new(indicator.metric(), indicator.axis())
    }
}

impl Indicator {
    /// Default selector: the indicator's metric against its own axis.
    pub fn selector(self) -> MetricSelector {
        MetricSelector::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn bmi_guards_height() {
        let m = Measurement::new(date(2024, 1, 1), 4.0)
            .with_weight(16.0)
            .with_height(100.0);
        assert!((m.bmi().expect("bmi") - 16.0).abs() < 1e-9);
        let zero = m.clone().with_height(0.0);
        assert_eq!(zero.bmi(), None);
        let no_weight = Measurement::new(date(2024, 1, 1), 4.0).with_height(100.0);
        assert_eq!(no_weight.value(Metric::Bmi), None);
    }

    #[test]
    fn age_from_birth_date() {
        let m = Measurement::from_birth_date(date(2020, 1, 1), date(2021, 1, 1));
        assert!((m.age_years - 366.0 / DAYS_PER_YEAR).abs() < 1e-12);
    }

    #[test]
    fn weight_for_height_selects_height_axis() {
        let selector = MetricSelector::from(Indicator::WeightForHeight);
        let m = Measurement::new(date(2024, 1, 1), 2.0)
            .with_weight(12.0)
            .with_height(86.5);
        assert_eq!(
            selector.select(&m),
            Some(PatientSample {
                axis: 86.5,
                value: 12.0
            })
        );
        let no_height = Measurement::new(date(2024, 1, 1), 2.0).with_weight(12.0);
        assert_eq!(selector.select(&no_height), None);
    }
}
