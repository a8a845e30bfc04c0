//! Growth reference engine.
//!
//! Normalizes reference rows, builds one ordered series per indicator,
//! estimates percentiles with the LMS transform (piecewise-linear fallback)
//! and reconciles patient measurements onto the reference axis.

pub mod annotate;
pub mod builder;
pub mod lookup;
pub mod normalize;
pub mod percentile;
pub mod reconcile;

pub use annotate::{MeasurementPercentile, annotate, annotate_with_correction};
pub use builder::{
    AxisColumn, LENGTH_HEIGHT_BREAKPOINT_CM, MergeRule, STATURE_MIN_MONTHS, SourceTables,
    build_from_library, build_series,
};
pub use lookup::{BinarySearch, LinearScan, NearestPoint, nearest_point, strategy};
pub use normalize::{interpolate, lms_parameters, normalize_row};
pub use percentile::{
    EstimateMethod, PercentileEstimate, erf, estimate, estimate_at, estimate_detailed,
    estimate_linear, normal_cdf, z_score,
};
pub use reconcile::{reconcile, reconcile_with_correction};
