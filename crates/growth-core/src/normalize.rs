//! Row normalization to the canonical percentile set.
//!
//! Tables publish different percentile columns. Charts draw P3, P15, P50,
//! P85 and P97, so P15 and P85 are synthesized by linear interpolation
//! between P10/P25 and P75/P90 when a table omits them.

use growth_ingest::ReferenceRow;
use growth_model::{LmsParameters, PercentileSet};

/// Linear interpolation at `x` between `(x0, y0)` and `(x1, y1)`.
///
/// Returns `None` when any input is missing or non-finite. Equal anchors
/// return `y0`.
pub fn interpolate(
    x0: f64,
    y0: Option<f64>,
    x1: f64,
    y1: Option<f64>,
    x: f64,
) -> Option<f64> {
    let (y0, y1) = (y0?, y1?);
    if ![x0, y0, x1, y1, x].iter().all(|value| value.is_finite()) {
        return None;
    }
    if x0 == x1 {
        return Some(y0);
    }
    Some(y0 + (x - x0) / (x1 - x0) * (y1 - y0))
}

pub fn normalize_row(row: &ReferenceRow) -> PercentileSet {
    PercentileSet {
        p3: row.p3,
        p15: row
            .p15
            .or_else(|| interpolate(10.0, row.p10, 25.0, row.p25, 15.0)),
        p25: row.p25,
        p50: row.p50,
        p75: row.p75,
        p85: row
            .p85
            .or_else(|| interpolate(75.0, row.p75, 90.0, row.p90, 85.0)),
        p97: row.p97,
    }
}

/// LMS parameters when the row carries all three. Validity is not checked here.
pub fn lms_parameters(row: &ReferenceRow) -> Option<LmsParameters> {
    Some(LmsParameters::new(row.l?, row.m?, row.s?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesizes_p15_from_p10_and_p25() {
        let row = ReferenceRow {
            p10: Some(2.5),
            p25: Some(4.0),
            ..ReferenceRow::default()
        };
        let set = normalize_row(&row);
        assert!((set.p15.expect("p15") - 3.0).abs() < 1e-12);
        assert_eq!(set.p25, Some(4.0));
    }

    #[test]
    fn synthesizes_p85_from_p75_and_p90() {
        let row = ReferenceRow {
            p75: Some(10.0),
            p90: Some(11.5),
            ..ReferenceRow::default()
        };
        assert!((normalize_row(&row).p85.expect("p85") - 11.0).abs() < 1e-12);
    }

    #[test]
    fn published_columns_win_over_interpolation() {
        let row = ReferenceRow {
            p10: Some(2.5),
            p15: Some(2.9),
            p25: Some(4.0),
            ..ReferenceRow::default()
        };
        assert_eq!(normalize_row(&row).p15, Some(2.9));
    }

    #[test]
    fn missing_anchor_leaves_percentile_absent() {
        let row = ReferenceRow {
            p10: Some(2.5),
            p75: Some(10.0),
            ..ReferenceRow::default()
        };
        let set = normalize_row(&row);
        assert_eq!(set.p15, None);
        assert_eq!(set.p85, None);
    }

    #[test]
    fn interpolate_edge_cases() {
        assert_eq!(interpolate(5.0, Some(1.0), 5.0, Some(9.0), 7.0), Some(1.0));
        assert_eq!(interpolate(0.0, Some(f64::NAN), 1.0, Some(2.0), 0.5), None);
        assert_eq!(interpolate(0.0, Some(0.0), 1.0, Some(2.0), f64::INFINITY), None);
    }

    #[test]
    fn lms_requires_all_three() {
        let mut row = ReferenceRow {
            l: Some(1.0),
            m: Some(9.6),
            ..ReferenceRow::default()
        };
        assert_eq!(lms_parameters(&row), None);
        row.s = Some(0.094);
        assert_eq!(lms_parameters(&row), Some(LmsParameters::new(1.0, 9.6, 0.094)));
    }
}
