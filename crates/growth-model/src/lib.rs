//! Growth reference data model.
//!
//! Plain data types shared by the ingest, core and CLI crates: indicators and
//! table kinds, reference series, patient measurements, chart points and
//! percentile labels.

pub mod chart;
pub mod correction;
pub mod error;
pub mod indicator;
pub mod measurement;
pub mod options;
pub mod reference;

pub use chart::{ChartPoint, PercentileLabel};
pub use correction::{AgeCorrection, ChronologicalAge};
pub use error::{GrowthError, Result};
pub use indicator::{AxisKind, Gender, Indicator, Metric, ReferenceSource, TableKind};
pub use measurement::{Measurement, MetricSelector, PatientSample};
pub use options::{BuildOptions, LookupStrategy, MonotonicityPolicy};
pub use reference::{LmsParameters, PercentileSet, ReferencePoint, ReferenceSeries};
