//! Snaps patient measurements onto a reference series' axis.
//!
//! The chart keeps exactly the reference axis values: a measurement is
//! attached to its nearest reference point and never adds a row. When
//! several measurements land on one point, the sample whose own axis is
//! closest to the point stays. Measurements are processed in chronological
//! order (date, age, input position) and an exact distance tie goes to the
//! later one.

use growth_model::{
    AgeCorrection, ChartPoint, ChronologicalAge, Measurement, MetricSelector, ReferenceSeries,
};
use tracing::debug;

use crate::lookup::{LinearScan, NearestPoint};

/// Reconciles with chronological age and the default linear lookup.
pub fn reconcile(
    series: &ReferenceSeries,
    measurements: &[Measurement],
    selector: &MetricSelector,
) -> Vec<ChartPoint> {
    reconcile_with_correction(series, measurements, selector, &ChronologicalAge, &LinearScan)
}

/// Processing order: date, then age, then position in the input.
pub(crate) fn chronological_order(measurements: &[Measurement]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..measurements.len()).collect();
    order.sort_by(|&a, &b| {
        let (left, right) = (&measurements[a], &measurements[b]);
        left.date
            .cmp(&right.date)
            .then_with(|| left.age_years.total_cmp(&right.age_years))
            .then_with(|| a.cmp(&b))
    });
    order
}

pub fn reconcile_with_correction(
    series: &ReferenceSeries,
    measurements: &[Measurement],
    selector: &MetricSelector,
    correction: &dyn AgeCorrection,
    lookup: &dyn NearestPoint,
) -> Vec<ChartPoint> {
    let mut chart: Vec<ChartPoint> = series
        .points()
        .iter()
        .map(|point| ChartPoint {
            axis: point.axis,
            percentiles: point.percentiles,
            patient: None,
        })
        .collect();
    if chart.is_empty() {
        return chart;
    }

    let mut skipped = 0usize;
    for index in chronological_order(measurements) {
        let measurement = &measurements[index];
        let age = correction.axis_age(measurement);
        let Some(sample) = selector.select_with_age(measurement, age) else {
            skipped += 1;
            continue;
        };
        let Some(slot) = lookup.nearest(series.points(), sample.axis) else {
            skipped += 1;
            continue;
        };
        let target = &mut chart[slot];
        let distance = (sample.axis - target.axis).abs();
        let replace = match target.patient {
            Some(existing) => distance <= (existing.axis - target.axis).abs(),
            None => true,
        };
        if replace {
            target.patient = Some(sample);
        }
    }
    if skipped > 0 {
        debug!(
            indicator = %series.indicator,
            skipped,
            "measurements without a usable value or axis"
        );
    }

    chart.sort_by(|a, b| a.axis.total_cmp(&b.axis));
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use growth_model::{
        Gender, Indicator, PatientSample, PercentileSet, ReferencePoint, ReferenceSource,
    };

    fn series(axes: &[f64]) -> ReferenceSeries {
        ReferenceSeries::from_points(
            Indicator::WeightForAge,
            Gender::Boys,
            ReferenceSource::Who,
            axes.iter()
                .map(|axis| ReferencePoint::new(*axis, PercentileSet::default(), None))
                .collect(),
        )
    }

    fn visit(day: u32, age: f64, weight: f64) -> Measurement {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).expect("date");
        Measurement::new(date, age).with_weight(weight)
    }

    #[test]
    fn closer_sample_wins() {
        let chart = reconcile(
            &series(&[1.0, 2.0]),
            &[visit(2, 1.02, 10.2), visit(1, 1.01, 10.1)],
            &Indicator::WeightForAge.selector(),
        );
        assert_eq!(chart.len(), 2);
        assert_eq!(
            chart[0].patient,
            Some(PatientSample {
                axis: 1.01,
                value: 10.1
            })
        );
        assert_eq!(chart[1].patient, None);
    }

    #[test]
    fn exact_tie_keeps_later_measurement() {
        let chart = reconcile(
            &series(&[1.0, 2.0]),
            &[visit(5, 1.25, 11.0), visit(3, 0.75, 9.0)],
            &Indicator::WeightForAge.selector(),
        );
        assert_eq!(chart[0].patient.map(|p| p.value), Some(11.0));
    }

    #[test]
    fn empty_inputs() {
        let selector = Indicator::WeightForAge.selector();
        assert!(reconcile(&series(&[]), &[visit(1, 1.0, 9.0)], &selector).is_empty());
        let chart = reconcile(&series(&[0.0, 1.0]), &[], &selector);
        assert_eq!(chart.len(), 2);
        assert!(chart.iter().all(|point| point.patient.is_none()));
    }

    #[test]
    fn skips_missing_metric() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        let chart = reconcile(
            &series(&[1.0]),
            &[Measurement::new(date, 1.0)],
            &Indicator::WeightForAge.selector(),
        );
        assert_eq!(chart[0].patient, None);
    }

    #[test]
    fn selector_reads_its_own_metric() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).expect("date");
        let visit = Measurement::new(date, 1.0)
            .with_weight(9.5)
            .with_head_circumference(46.0)
            .with_arm_circumference(15.2)
            .with_subscapular_skinfold(6.1)
            .with_triceps_skinfold(8.4);
        let expected = [
            (Indicator::HeadCircumferenceForAge, 46.0),
            (Indicator::ArmCircumferenceForAge, 15.2),
            (Indicator::SubscapularSkinfoldForAge, 6.1),
            (Indicator::TricepsSkinfoldForAge, 8.4),
        ];
        for (indicator, value) in expected {
            let chart = reconcile(&series(&[1.0]), &[visit.clone()], &indicator.selector());
            assert_eq!(
                chart[0].patient,
                Some(PatientSample { axis: 1.0, value }),
                "{indicator}"
            );
        }
    }
}
