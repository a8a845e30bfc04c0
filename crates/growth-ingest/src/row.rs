//! Typed reference table rows.

use crate::table::RawRow;

/// Columns a reference table may carry. Every field is optional: absence of
/// a percentile column is what triggers interpolation downstream.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReferenceRow {
    pub month: Option<f64>,
    pub length: Option<f64>,
    /// Standing height (`Height`, or `Stature` in CDC tables).
    pub height: Option<f64>,
    pub l: Option<f64>,
    pub m: Option<f64>,
    pub s: Option<f64>,
    pub p3: Option<f64>,
    pub p10: Option<f64>,
    pub p15: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub p85: Option<f64>,
    pub p90: Option<f64>,
    pub p97: Option<f64>,
}

impl ReferenceRow {
    /// Extracts the known columns. Cells holding text read as absent.
    pub fn from_raw(raw: &RawRow) -> Self {
        Self {
            month: raw.number("Month"),
            length: raw.number("Length"),
            height: raw.number_any(&["Height", "Stature"]),
            l: raw.number("L"),
            m: raw.number("M"),
            s: raw.number("S"),
            p3: raw.number("P3"),
            p10: raw.number("P10"),
            p15: raw.number("P15"),
            p25: raw.number("P25"),
            p50: raw.number("P50"),
            p75: raw.number("P75"),
            p85: raw.number("P85"),
            p90: raw.number("P90"),
            p97: raw.number("P97"),
        }
    }
}

pub fn reference_rows(raw: &[RawRow]) -> Vec<ReferenceRow> {
    raw.iter().map(ReferenceRow::from_raw).collect()
}
