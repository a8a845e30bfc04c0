//! Percentile label for every measurement of a visit list.

use chrono::NaiveDate;
use serde::Serialize;

use growth_model::{AgeCorrection, ChronologicalAge, Measurement, MetricSelector, ReferenceSeries};

use crate::lookup::{LinearScan, NearestPoint, nearest_point};
use crate::percentile::{PercentileEstimate, estimate_detailed};
use crate::reconcile::chronological_order;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeasurementPercentile {
    pub date: NaiveDate,
    /// The measurement's own axis value.
    pub axis: f64,
    pub value: f64,
    /// Axis of the reference point the estimate was made at.
    pub reference_axis: f64,
    pub estimate: Option<PercentileEstimate>,
}

pub fn annotate(
    series: &ReferenceSeries,
    measurements: &[Measurement],
    selector: &MetricSelector,
) -> Vec<MeasurementPercentile> {
    annotate_with_correction(series, measurements, selector, &ChronologicalAge, &LinearScan)
}

/// Annotates in chronological order. Measurements without the selected
/// metric or axis, and any measurement when the series is empty, are skipped.
pub fn annotate_with_correction(
    series: &ReferenceSeries,
    measurements: &[Measurement],
    selector: &MetricSelector,
    correction: &dyn AgeCorrection,
    lookup: &dyn NearestPoint,
) -> Vec<MeasurementPercentile> {
    chronological_order(measurements)
        .into_iter()
        .filter_map(|index| {
            let measurement = &measurements[index];
            let sample = selector.select_with_age(measurement, correction.axis_age(measurement))?;
            let point = nearest_point(series, sample.axis, lookup)?;
            Some(MeasurementPercentile {
                date: measurement.date,
                axis: sample.axis,
                value: sample.value,
                reference_axis: point.axis,
                estimate: estimate_detailed(sample.value, point),
            })
        })
        .collect()
}
