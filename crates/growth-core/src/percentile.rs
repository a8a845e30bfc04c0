//! Percentile estimation for a patient value at one reference point.
//!
//! The LMS (Box-Cox power-normal) transform is used when the point carries
//! valid parameters. Otherwise the value is placed by piecewise-linear
//! interpolation between the P3, P15, P50, P85 and P97 curves.

use serde::Serialize;

use growth_model::{LmsParameters, PercentileLabel, PercentileSet, ReferencePoint, ReferenceSeries};

use crate::lookup::{NearestPoint, nearest_point};

// Abramowitz & Stegun 7.1.26, |error| <= 1.5e-7.
const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Below this |L| the log-normal limit of the Box-Cox transform is used.
const LOG_NORMAL_L_EPSILON: f64 = 1e-4;

pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal cumulative distribution.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Standard deviation score of `value`. `None` for invalid parameters or a
/// value outside the transform's domain.
pub fn z_score(value: f64, lms: &LmsParameters) -> Option<f64> {
    if !lms.is_valid() || !value.is_finite() {
        return None;
    }
    let ratio = value / lms.m;
    let z = if lms.l.abs() < LOG_NORMAL_L_EPSILON {
        ratio.ln() / lms.s
    } else {
        (ratio.powf(lms.l) - 1.0) / (lms.l * lms.s)
    };
    (!z.is_nan()).then_some(z)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateMethod {
    Lms,
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentileEstimate {
    pub label: PercentileLabel,
    pub method: EstimateMethod,
    pub z_score: Option<f64>,
}

fn lms_label(percentile: f64) -> PercentileLabel {
    if percentile < 0.1 {
        PercentileLabel::BelowTenthOfPercent
    } else if percentile >= 99.9 {
        PercentileLabel::AboveNinetyNineNine
    } else {
        PercentileLabel::Percentile(percentile)
    }
}

fn estimate_lms(value: f64, lms: &LmsParameters) -> Option<PercentileEstimate> {
    let z = z_score(value, lms)?;
    let percentile = 100.0 * normal_cdf(z);
    percentile.is_finite().then(|| PercentileEstimate {
        label: lms_label(percentile),
        method: EstimateMethod::Lms,
        z_score: Some(z),
    })
}

/// Piecewise-linear placement between the five canonical curves.
pub fn estimate_linear(value: f64, percentiles: &PercentileSet) -> Option<PercentileLabel> {
    let [p3, p15, p50, p85, p97] = percentiles.canonical()?;
    if !value.is_finite() {
        return None;
    }
    let label = if value <= p3 {
        PercentileLabel::BelowThird
    } else if value <= p15 {
        PercentileLabel::Percentile(3.0 + (value - p3) / (p15 - p3) * 12.0)
    } else if value <= p50 {
        PercentileLabel::Percentile(15.0 + (value - p15) / (p50 - p15) * 35.0)
    } else if value <= p85 {
        PercentileLabel::Percentile(50.0 + (value - p50) / (p85 - p50) * 35.0)
    } else if value <= p97 {
        PercentileLabel::Percentile(85.0 + (value - p85) / (p97 - p85) * 12.0)
    } else {
        PercentileLabel::AboveNinetySeventh
    };
    Some(label)
}

/// Estimate with the method used. `None` when neither method has enough data.
pub fn estimate_detailed(value: f64, point: &ReferencePoint) -> Option<PercentileEstimate> {
    if !value.is_finite() {
        return None;
    }
    point
        .lms
        .as_ref()
        .and_then(|lms| estimate_lms(value, lms))
        .or_else(|| {
            estimate_linear(value, &point.percentiles).map(|label| PercentileEstimate {
                label,
                method: EstimateMethod::Linear,
                z_score: None,
            })
        })
}

pub fn estimate(value: f64, point: &ReferencePoint) -> Option<PercentileLabel> {
    estimate_detailed(value, point).map(|estimate| estimate.label)
}

/// Estimates at the reference point nearest to `query_axis`.
pub fn estimate_at(
    series: &ReferenceSeries,
    query_axis: f64,
    value: f64,
    lookup: &dyn NearestPoint,
) -> Option<PercentileEstimate> {
    let point = nearest_point(series, query_axis, lookup)?;
    estimate_detailed(value, point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical_set() -> PercentileSet {
        PercentileSet {
            p3: Some(7.8),
            p15: Some(8.6),
            p25: None,
            p50: Some(9.6),
            p75: None,
            p85: Some(10.5),
            p97: Some(11.5),
        }
    }

    #[test]
    fn erf_known_values() {
        assert!(erf(0.0).abs() < 1e-8);
        assert!((erf(1.0) - 0.842_700_79).abs() < 2e-7);
        assert!((erf(-0.5) + 0.520_499_88).abs() < 2e-7);
        assert!(erf(5.0) > 0.999_999);
        assert_eq!(erf(f64::INFINITY), 1.0);
        assert_eq!(erf(f64::NEG_INFINITY), -1.0);
    }

    #[test]
    fn median_is_fiftieth() {
        let lms = LmsParameters::new(-0.35, 14.2, 0.11);
        let z = z_score(14.2, &lms).expect("z");
        assert!(z.abs() < 1e-12);
        let point = ReferencePoint::new(1.0, PercentileSet::default(), Some(lms));
        assert_eq!(estimate(14.2, &point).map(|l| l.to_string()), Some("50.0th".to_string()));
    }

    #[test]
    fn log_normal_limit() {
        let lms = LmsParameters::new(0.0, 10.0, 0.1);
        let z = z_score(10.0 * (0.1f64).exp(), &lms).expect("z");
        assert!((z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_lms_falls_back_to_linear() {
        let point = ReferencePoint::new(
            1.0,
            canonical_set(),
            Some(LmsParameters::new(1.0, 0.0, 0.094)),
        );
        let estimate = estimate_detailed(9.6, &point).expect("estimate");
        assert_eq!(estimate.method, EstimateMethod::Linear);
        assert_eq!(estimate.label.to_string(), "50.0th");
    }

    #[test]
    fn out_of_domain_value_falls_back() {
        let point = ReferencePoint::new(
            1.0,
            canonical_set(),
            Some(LmsParameters::new(0.5, 9.6, 0.094)),
        );
        let estimate = estimate_detailed(-1.0, &point).expect("estimate");
        assert_eq!(estimate.method, EstimateMethod::Linear);
        assert_eq!(estimate.label, PercentileLabel::BelowThird);
    }

    #[test]
    fn linear_bands() {
        let set = canonical_set();
        assert_eq!(estimate_linear(7.8, &set), Some(PercentileLabel::BelowThird));
        assert_eq!(estimate_linear(11.6, &set), Some(PercentileLabel::AboveNinetySeventh));
        let mid = estimate_linear(8.2, &set).and_then(|l| l.value()).expect("value");
        assert!((mid - 9.0).abs() < 1e-9);
        let upper = estimate_linear(11.0, &set).and_then(|l| l.value()).expect("value");
        assert!((upper - 91.0).abs() < 1e-9);
    }

    #[test]
    fn no_data_yields_none() {
        let point = ReferencePoint::new(1.0, PercentileSet::default(), None);
        assert_eq!(estimate(9.6, &point), None);
        let point = ReferencePoint::new(1.0, canonical_set(), None);
        assert_eq!(estimate(f64::NAN, &point), None);
    }
}
