//! Command stages shared by the `growth` binary and its tests.
//!
//! Each stage loads or transforms data and returns a serializable report;
//! printing is left to the caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{debug, info, info_span, trace};

use growth_core::{
    MeasurementPercentile, PercentileEstimate, annotate_with_correction, build_from_library,
    estimate_at, reconcile_with_correction, strategy,
};
use growth_ingest::{ReferenceLibrary, read_measurements};
use growth_model::{
    AxisKind, BuildOptions, ChartPoint, ChronologicalAge, Gender, Indicator, LookupStrategy,
    Measurement, ReferenceSeries, ReferenceSource,
};

use crate::logging::redact_value;

/// Which reference series to build, and how to search it.
#[derive(Debug, Clone)]
pub struct SeriesRequest {
    pub data_dir: PathBuf,
    pub indicator: Indicator,
    pub gender: Gender,
    pub source: ReferenceSource,
    pub lookup: LookupStrategy,
    pub options: BuildOptions,
}

/// Loads the reference directory and builds the requested series.
pub fn load_series(request: &SeriesRequest) -> Result<ReferenceSeries> {
    let span = info_span!(
        "series",
        indicator = %request.indicator,
        gender = %request.gender,
        source = %request.source
    );
    let _guard = span.enter();
    let library = ReferenceLibrary::load_dir(&request.data_dir)
        .with_context(|| format!("load reference tables from {}", request.data_dir.display()))?;
    info!(tables = library.len(), "loaded reference library");
    for descriptor in library.descriptors() {
        debug!(file = %descriptor.file_name(), "reference table available");
    }
    let series = build_from_library(
        &library,
        request.indicator,
        request.gender,
        request.source,
        &request.options,
    )
    .ok_or_else(|| {
        anyhow!(
            "no {} reference tables for {} ({}) in {}",
            request.source,
            request.indicator,
            request.gender,
            request.data_dir.display()
        )
    })?;
    info!(points = series.len(), "built reference series");
    Ok(series)
}

pub fn load_measurements(path: &Path) -> Result<Vec<Measurement>> {
    let measurements = read_measurements(path)
        .with_context(|| format!("read measurements from {}", path.display()))?;
    info!(count = measurements.len(), "loaded measurements");
    Ok(measurements)
}

pub fn percentile(
    series: &ReferenceSeries,
    lookup: LookupStrategy,
    axis: f64,
    value: f64,
) -> Option<PercentileEstimate> {
    debug!(
        axis = redact_value(&axis.to_string()),
        value = redact_value(&value.to_string()),
        "estimating percentile"
    );
    estimate_at(series, axis, value, strategy(lookup))
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartReport {
    pub indicator: Indicator,
    pub gender: Gender,
    pub source: ReferenceSource,
    pub axis: AxisKind,
    pub points: Vec<ChartPoint>,
}

impl ChartReport {
    pub fn patient_count(&self) -> usize {
        self.points
            .iter()
            .filter(|point| point.patient.is_some())
            .count()
    }
}

pub fn chart_report(
    series: &ReferenceSeries,
    measurements: &[Measurement],
    lookup: LookupStrategy,
) -> ChartReport {
    let points = reconcile_with_correction(
        series,
        measurements,
        &series.indicator.selector(),
        &ChronologicalAge,
        strategy(lookup),
    );
    let report = ChartReport {
        indicator: series.indicator,
        gender: series.gender,
        source: series.source,
        axis: series.axis,
        points,
    };
    info!(
        points = report.points.len(),
        plotted = report.patient_count(),
        measurements = measurements.len(),
        "reconciled chart series"
    );
    report
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotationReport {
    pub indicator: Indicator,
    pub gender: Gender,
    pub source: ReferenceSource,
    pub rows: Vec<MeasurementPercentile>,
}

pub fn annotation_report(
    series: &ReferenceSeries,
    measurements: &[Measurement],
    lookup: LookupStrategy,
) -> AnnotationReport {
    let rows = annotate_with_correction(
        series,
        measurements,
        &series.indicator.selector(),
        &ChronologicalAge,
        strategy(lookup),
    );
    for row in &rows {
        let label = row
            .estimate
            .map(|estimate| estimate.label.to_string())
            .unwrap_or_default();
        trace!(
            date = %row.date,
            value = redact_value(&row.value.to_string()),
            label = redact_value(&label),
            "annotated measurement"
        );
    }
    AnnotationReport {
        indicator: series.indicator,
        gender: series.gender,
        source: series.source,
        rows,
    }
}

pub fn to_json<T: Serialize>(report: &T) -> Result<String> {
    serde_json::to_string_pretty(report).context("serialize report")
}
