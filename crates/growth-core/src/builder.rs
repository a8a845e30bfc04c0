//! Reference series construction.
//!
//! Turns typed rows of one or two source tables into a sorted, deduplicated
//! [`ReferenceSeries`]. Two indicators merge tables at fixed clinical
//! breakpoints:
//!
//! - height-for-age from a non-default source joins the infant length table
//!   (birth to 24 months) with the stature table (24 months and over);
//! - weight-for-height joins the recumbent length table (below 85 cm) with
//!   the standing height table (85 cm and over).

use growth_ingest::{ReferenceLibrary, ReferenceRow};
use growth_model::{
    BuildOptions, Gender, Indicator, MonotonicityPolicy, ReferencePoint, ReferenceSeries,
    ReferenceSource, TableKind,
};
use tracing::{debug, warn};

use crate::normalize::{lms_parameters, normalize_row};

/// Stature is not measured before this age.
pub const STATURE_MIN_MONTHS: f64 = 24.0;

/// Recumbent length below this height, standing height from it.
pub const LENGTH_HEIGHT_BREAKPOINT_CM: f64 = 85.0;

/// Column a table's axis value is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisColumn {
    /// `Month`, converted to years.
    Month,
    /// `Length` in cm.
    Length,
    /// `Height` (or `Stature`) in cm.
    Height,
}

impl AxisColumn {
    pub fn for_table(kind: TableKind) -> Self {
        match kind {
            TableKind::Wfl => AxisColumn::Length,
            TableKind::Wfh => AxisColumn::Height,
            _ => AxisColumn::Month,
        }
    }

    /// Axis value of a row, or `None` when the column is missing or non-numeric.
    pub fn read(&self, row: &ReferenceRow) -> Option<f64> {
        let value = match self {
            AxisColumn::Month => row.month? / 12.0,
            AxisColumn::Length => row.length?,
            AxisColumn::Height => row.height?,
        };
        value.is_finite().then_some(value)
    }
}

/// Input tables for one series, shaped by the merge rule.
#[derive(Debug, Clone, Copy)]
pub enum SourceTables<'a> {
    Single {
        axis: AxisColumn,
        rows: &'a [ReferenceRow],
    },
    InfantAndStature {
        infant: &'a [ReferenceRow],
        stature: &'a [ReferenceRow],
    },
    LengthAndHeight {
        length: &'a [ReferenceRow],
        height: &'a [ReferenceRow],
    },
}

impl<'a> SourceTables<'a> {
    pub fn single(kind: TableKind, rows: &'a [ReferenceRow]) -> Self {
        SourceTables::Single {
            axis: AxisColumn::for_table(kind),
            rows,
        }
    }
}

/// Which published tables make up an indicator's series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    Single(TableKind),
    InfantAndStature { infant: TableKind, stature: TableKind },
    LengthAndHeight { length: TableKind, height: TableKind },
}

impl MergeRule {
    pub fn for_indicator(indicator: Indicator, source: ReferenceSource) -> Self {
        match indicator {
            Indicator::WeightForAge => MergeRule::Single(TableKind::Wfa),
            Indicator::HeightForAge if source.is_default() => MergeRule::Single(TableKind::Lhfa),
            Indicator::HeightForAge => MergeRule::InfantAndStature {
                infant: TableKind::Lhfa,
                stature: TableKind::Hfa,
            },
            Indicator::HeadCircumferenceForAge => MergeRule::Single(TableKind::Hcfa),
            Indicator::BmiForAge => MergeRule::Single(TableKind::Bmifa),
            Indicator::ArmCircumferenceForAge => MergeRule::Single(TableKind::Acfa),
            Indicator::SubscapularSkinfoldForAge => MergeRule::Single(TableKind::Ssfa),
            Indicator::TricepsSkinfoldForAge => MergeRule::Single(TableKind::Tsfa),
            Indicator::WeightForHeight => MergeRule::LengthAndHeight {
                length: TableKind::Wfl,
                height: TableKind::Wfh,
            },
        }
    }

    pub fn required_tables(&self) -> Vec<TableKind> {
        match self {
            MergeRule::Single(kind) => vec![*kind],
            MergeRule::InfantAndStature { infant, stature } => vec![*infant, *stature],
            MergeRule::LengthAndHeight { length, height } => vec![*length, *height],
        }
    }

    /// Assembles the inputs through `lookup`. A missing table contributes no
    /// rows; `None` only when every table is missing.
    pub fn tables<'a, F>(&self, lookup: F) -> Option<SourceTables<'a>>
    where
        F: Fn(TableKind) -> Option<&'a [ReferenceRow]>,
    {
        if self.required_tables().into_iter().all(|kind| lookup(kind).is_none()) {
            return None;
        }
        let rows = |kind: TableKind| {
            lookup(kind).unwrap_or_else(|| {
                debug!(table = %kind, "reference table missing, treating as empty");
                &[]
            })
        };
        Some(match self {
            MergeRule::Single(kind) => SourceTables::single(*kind, rows(*kind)),
            MergeRule::InfantAndStature { infant, stature } => SourceTables::InfantAndStature {
                infant: rows(*infant),
                stature: rows(*stature),
            },
            MergeRule::LengthAndHeight { length, height } => SourceTables::LengthAndHeight {
                length: rows(*length),
                height: rows(*height),
            },
        })
    }
}

fn accept_row(row: &ReferencePoint, options: &BuildOptions, indicator: Indicator) -> bool {
    if row.percentiles.is_monotone() {
        return true;
    }
    match options.monotonicity {
        MonotonicityPolicy::Ignore => true,
        MonotonicityPolicy::Warn => {
            warn!(indicator = %indicator, axis = row.axis, "percentile columns are not monotone");
            true
        }
        MonotonicityPolicy::Reject => {
            warn!(indicator = %indicator, axis = row.axis, "dropping non-monotone row");
            false
        }
    }
}

/// Normalizes rows into points, dropping rows without an axis value.
fn points_from_rows<'r>(
    rows: impl IntoIterator<Item = &'r ReferenceRow>,
    axis: AxisColumn,
    options: &BuildOptions,
    indicator: Indicator,
) -> Vec<ReferencePoint> {
    let mut dropped = 0usize;
    let mut points = Vec::new();
    for row in rows {
        let Some(value) = axis.read(row) else {
            dropped += 1;
            continue;
        };
        let point = ReferencePoint::new(value, normalize_row(row), lms_parameters(row));
        if accept_row(&point, options, indicator) {
            points.push(point);
        }
    }
    if dropped > 0 {
        debug!(indicator = %indicator, dropped, "dropped rows without axis value");
    }
    points
}

pub fn build_series(
    indicator: Indicator,
    gender: Gender,
    source: ReferenceSource,
    tables: &SourceTables<'_>,
    options: &BuildOptions,
) -> ReferenceSeries {
    let points = match *tables {
        SourceTables::Single { axis, rows } => points_from_rows(rows, axis, options, indicator),
        SourceTables::InfantAndStature { infant, stature } => {
            let mut points = points_from_rows(infant, AxisColumn::Month, options, indicator);
            let stature_rows = stature
                .iter()
                .filter(|row| row.month.is_some_and(|month| month >= STATURE_MIN_MONTHS));
            points.extend(points_from_rows(
                stature_rows,
                AxisColumn::Month,
                options,
                indicator,
            ));
            points
        }
        SourceTables::LengthAndHeight { length, height } => {
            let mut points: Vec<ReferencePoint> =
                points_from_rows(length, AxisColumn::Length, options, indicator)
                    .into_iter()
                    .filter(|point| point.axis < LENGTH_HEIGHT_BREAKPOINT_CM)
                    .collect();
            points.extend(
                points_from_rows(height, AxisColumn::Height, options, indicator)
                    .into_iter()
                    .filter(|point| point.axis >= LENGTH_HEIGHT_BREAKPOINT_CM),
            );
            points
        }
    };
    let series = ReferenceSeries::from_points(indicator, gender, source, points);
    debug!(
        indicator = %indicator,
        gender = %gender,
        source = %source,
        points = series.len(),
        "built reference series"
    );
    series
}

/// Builds the series for an indicator from a loaded library.
pub fn build_from_library(
    library: &ReferenceLibrary,
    indicator: Indicator,
    gender: Gender,
    source: ReferenceSource,
    options: &BuildOptions,
) -> Option<ReferenceSeries> {
    let rule = MergeRule::for_indicator(indicator, source);
    let tables = rule.tables(|kind| library.rows(kind, gender, source))?;
    Some(build_series(indicator, gender, source, &tables, options))
}
