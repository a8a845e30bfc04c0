//! Reference distribution types.
//!
//! A [`ReferenceSeries`] is the sorted table of per-axis distribution
//! parameters for one indicator, gender and source. Each [`ReferencePoint`]
//! carries the canonical [`PercentileSet`] and, when the source publishes
//! them, the Box-Cox [`LmsParameters`].

use serde::{Deserialize, Serialize};

use crate::indicator::{AxisKind, Gender, Indicator, ReferenceSource};

/// Percentile curve values at one axis point. Any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PercentileSet {
    pub p3: Option<f64>,
    pub p15: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub p85: Option<f64>,
    pub p97: Option<f64>,
}

impl PercentileSet {
    /// Percentile ranks in curve order, paired with their values.
    pub fn ranked(&self) -> [(u8, Option<f64>); 7] {
        [
            (3, self.p3),
            (15, self.p15),
            (25, self.p25),
            (50, self.p50),
            (75, self.p75),
            (85, self.p85),
            (97, self.p97),
        ]
    }

    /// The five curves drawn on a chart (3, 15, 50, 85, 97), when all are finite.
    pub fn canonical(&self) -> Option<[f64; 5]> {
        let values = [self.p3?, self.p15?, self.p50?, self.p85?, self.p97?];
        values
            .iter()
            .all(|value| value.is_finite())
            .then_some(values)
    }

    /// True when the present values never decrease with rank.
    pub fn is_monotone(&self) -> bool {
        let mut previous: Option<f64> = None;
        for (_, value) in self.ranked() {
            let Some(value) = value else {
                continue;
            };
            if let Some(prev) = previous
                && value < prev
            {
                return false;
            }
            previous = Some(value);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.ranked().iter().all(|(_, value)| value.is_none())
    }
}

/// Box-Cox power-normal parameters: skewness (L), median (M), coefficient of variation (S).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsParameters {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl LmsParameters {
    pub fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }

    /// `M > 0`, `S > 0` and all three finite.
    pub fn is_valid(&self) -> bool {
        self.l.is_finite() && self.m.is_finite() && self.s.is_finite() && self.m > 0.0 && self.s > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    /// Age in years or height in centimeters, depending on the series axis.
    pub axis: f64,
    pub percentiles: PercentileSet,
    pub lms: Option<LmsParameters>,
}

impl ReferencePoint {
    pub fn new(axis: f64, percentiles: PercentileSet, lms: Option<LmsParameters>) -> Self {
        Self {
            axis,
            percentiles,
            lms,
        }
    }
}

/// Sorted reference table with unique axis values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSeries {
    pub indicator: Indicator,
    pub gender: Gender,
    pub source: ReferenceSource,
    pub axis: AxisKind,
    points: Vec<ReferencePoint>,
}

impl ReferenceSeries {
    /// Builds a series from points in source order.
    ///
    /// Points with a non-finite axis are dropped. The rest are stably sorted
    /// ascending and, on equal axis values, the point appearing later wins.
    pub fn from_points(
        indicator: Indicator,
        gender: Gender,
        source: ReferenceSource,
        mut points: Vec<ReferencePoint>,
    ) -> Self {
        points.retain(|point| point.axis.is_finite());
        points.sort_by(|a, b| a.axis.total_cmp(&b.axis));
        let mut unique: Vec<ReferencePoint> = Vec::with_capacity(points.len());
        for point in points {
            match unique.last_mut() {
                Some(last) if last.axis == point.axis => *last = point,
                _ => unique.push(point),
            }
        }
        Self {
            indicator,
            gender,
            source,
            axis: indicator.axis(),
            points: unique,
        }
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    pub fn axis_values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.axis).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis range covered by the table.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.axis, self.points.last()?.axis))
    }

    pub fn get(&self, index: usize) -> Option<&ReferencePoint> {
        self.points.get(index)
    }
}
