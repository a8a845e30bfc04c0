//! Patient measurement files.
//!
//! A CSV with `date` (YYYY-MM-DD) and `age_years` columns plus any of the
//! metric columns `weight`, `height`, `head_circumference`,
//! `arm_circumference`, `subscapular_skinfold`, `triceps_skinfold`.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use growth_model::Measurement;

use crate::error::{IngestError, Result};

pub fn parse_measurements(text: &str) -> Result<Vec<Measurement>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut measurements = Vec::new();
    for record in reader.deserialize::<Measurement>() {
        let measurement = record.map_err(|error| IngestError::Measurement {
            line: error.position().map(csv::Position::line).unwrap_or(0),
            message: error.to_string(),
        })?;
        measurements.push(measurement);
    }
    Ok(measurements)
}

pub fn read_measurements(path: &Path) -> Result<Vec<Measurement>> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_measurements(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_optional_columns() {
        let text = "date,age_years,weight,height\n2024-01-10,1.0,9.6,75.7\n2024-07-10,1.5,,80.1\n";
        let measurements = parse_measurements(text).expect("parse");
        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].weight, Some(9.6));
        assert_eq!(measurements[1].weight, None);
        assert_eq!(measurements[1].height, Some(80.1));
        assert_eq!(measurements[1].head_circumference, None);
    }

    #[test]
    fn reports_bad_dates() {
        let err = parse_measurements("date,age_years\nyesterday,1.0\n").unwrap_err();
        assert!(matches!(err, IngestError::Measurement { .. }));
    }
}
