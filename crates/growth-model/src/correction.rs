//! Contract for the gestational-age correction collaborator.
//!
//! Preterm subjects are plotted against a corrected age supplied by an
//! external component. Reconciliation and annotation only ask for the age
//! to use, so chronological and corrected ages are handled alike.

use crate::measurement::Measurement;

pub trait AgeCorrection {
    /// Age in years to place the measurement at, or `None` to skip it.
    fn axis_age(&self, measurement: &Measurement) -> Option<f64>;
}

/// Uses the measurement's own `age_years`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronologicalAge;

impl AgeCorrection for ChronologicalAge {
    fn axis_age(&self, measurement: &Measurement) -> Option<f64> {
        measurement
            .age_years
            .is_finite()
            .then_some(measurement.age_years)
    }
}
