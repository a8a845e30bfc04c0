//! Nearest reference point search.
//!
//! Every strategy returns the point with the minimum absolute axis distance
//! to the query and resolves exact ties to the lower axis value. Queries
//! beyond the table resolve to the nearest endpoint.

use growth_model::{LookupStrategy, ReferencePoint, ReferenceSeries};

pub trait NearestPoint {
    /// Index of the nearest point in an ascending, finite-axis slice.
    fn nearest(&self, points: &[ReferencePoint], query: f64) -> Option<usize>;
}

/// Scans every point; the first minimum wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScan;

impl NearestPoint for LinearScan {
    fn nearest(&self, points: &[ReferencePoint], query: f64) -> Option<usize> {
        if !query.is_finite() {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (index, point) in points.iter().enumerate() {
            let distance = (point.axis - query).abs();
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((index, distance)),
            }
        }
        best.map(|(index, _)| index)
    }
}

/// Binary search over the sorted axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySearch;

impl NearestPoint for BinarySearch {
    fn nearest(&self, points: &[ReferencePoint], query: f64) -> Option<usize> {
        if points.is_empty() || !query.is_finite() {
            return None;
        }
        let upper = points.partition_point(|point| point.axis < query);
        if upper == 0 {
            return Some(0);
        }
        if upper == points.len() {
            return Some(points.len() - 1);
        }
        let lower = upper - 1;
        let lower_distance = (query - points[lower].axis).abs();
        let upper_distance = (points[upper].axis - query).abs();
        if upper_distance < lower_distance {
            Some(upper)
        } else {
            Some(lower)
        }
    }
}

static LINEAR: LinearScan = LinearScan;
static BINARY: BinarySearch = BinarySearch;

pub fn strategy(kind: LookupStrategy) -> &'static dyn NearestPoint {
    match kind {
        LookupStrategy::Linear => &LINEAR,
        LookupStrategy::Binary => &BINARY,
    }
}

pub fn nearest_point<'a>(
    series: &'a ReferenceSeries,
    query: f64,
    lookup: &dyn NearestPoint,
) -> Option<&'a ReferencePoint> {
    lookup
        .nearest(series.points(), query)
        .and_then(|index| series.get(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_model::PercentileSet;

    fn points(axes: &[f64]) -> Vec<ReferencePoint> {
        axes.iter()
            .map(|axis| ReferencePoint::new(*axis, PercentileSet::default(), None))
            .collect()
    }

    #[test]
    fn picks_closest_point() {
        let pts = points(&[0.0, 0.5, 1.0, 2.0]);
        for lookup in [strategy(LookupStrategy::Linear), strategy(LookupStrategy::Binary)] {
            assert_eq!(lookup.nearest(&pts, 0.6), Some(1));
            assert_eq!(lookup.nearest(&pts, 1.9), Some(3));
            assert_eq!(lookup.nearest(&pts, 1.0), Some(2));
        }
    }

    #[test]
    fn ties_prefer_lower_axis() {
        let pts = points(&[1.0, 2.0]);
        assert_eq!(LinearScan.nearest(&pts, 1.5), Some(0));
        assert_eq!(BinarySearch.nearest(&pts, 1.5), Some(0));
    }

    #[test]
    fn clamps_to_endpoints() {
        let pts = points(&[1.0, 2.0, 3.0]);
        assert_eq!(LinearScan.nearest(&pts, -10.0), Some(0));
        assert_eq!(BinarySearch.nearest(&pts, -10.0), Some(0));
        assert_eq!(LinearScan.nearest(&pts, 99.0), Some(2));
        assert_eq!(BinarySearch.nearest(&pts, 99.0), Some(2));
    }

    #[test]
    fn empty_or_invalid_queries() {
        assert_eq!(LinearScan.nearest(&[], 1.0), None);
        assert_eq!(BinarySearch.nearest(&[], 1.0), None);
        let pts = points(&[1.0]);
        assert_eq!(LinearScan.nearest(&pts, f64::NAN), None);
        assert_eq!(BinarySearch.nearest(&pts, f64::INFINITY), None);
    }
}
