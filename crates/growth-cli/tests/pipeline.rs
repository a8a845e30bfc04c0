//! Integration tests for the command pipeline stages.

use std::fs;
use std::path::Path;

use growth_cli::pipeline::{
    SeriesRequest, annotation_report, chart_report, load_measurements, load_series, percentile,
    to_json,
};
use growth_model::{BuildOptions, Gender, Indicator, LookupStrategy, ReferenceSource};

const WFA_BOYS: &str = "Month,L,M,S,P3,P15,P50,P85,P97\n\
                        12,1,9.6,0.094,7.8,8.6,9.6,10.5,11.5\n\
                        24,1,12.2,0.1,9.8,10.8,12.2,13.6,15.1\n";

const VISITS: &str = "date,age_years,weight,height\n\
                      2024-06-01,1.0,9.6,75.7\n\
                      2024-05-01,0.9,9.1,74.0\n";

fn request(data_dir: &Path) -> SeriesRequest {
    SeriesRequest {
        data_dir: data_dir.to_path_buf(),
        indicator: Indicator::WeightForAge,
        gender: Gender::Boys,
        source: ReferenceSource::Who,
        lookup: LookupStrategy::Binary,
        options: BuildOptions::default(),
    }
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("wfa_boys_who.csv"), WFA_BOYS).expect("write table");
    fs::write(dir.path().join("visits.csv"), VISITS).expect("write visits");
    dir
}

#[test]
fn chart_report_json() {
    let dir = fixture();
    let series = load_series(&request(dir.path())).expect("series");
    let measurements = load_measurements(&dir.path().join("visits.csv")).expect("measurements");
    let report = chart_report(&series, &measurements, LookupStrategy::Linear);
    assert_eq!(report.patient_count(), 1);
    let json = to_json(&report).expect("json");
    insta::assert_snapshot!(json);
}

#[test]
fn annotation_report_labels() {
    let dir = fixture();
    let series = load_series(&request(dir.path())).expect("series");
    let measurements = load_measurements(&dir.path().join("visits.csv")).expect("measurements");
    let report = annotation_report(&series, &measurements, LookupStrategy::Binary);
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].date.to_string(), "2024-05-01");
    let last = report.rows[1].estimate.expect("estimate");
    assert_eq!(last.label.to_string(), "50.0th");

    let value = serde_json::to_value(&report).expect("json value");
    assert_eq!(value["indicator"], "weight-for-age");
    assert_eq!(value["rows"][1]["estimate"]["label"], "50.0th");
    assert_eq!(value["rows"][1]["estimate"]["method"], "lms");
}

#[test]
fn percentile_uses_nearest_point() {
    let dir = fixture();
    let series = load_series(&request(dir.path())).expect("series");
    let estimate = percentile(&series, LookupStrategy::Linear, 1.2, 20.0).expect("estimate");
    assert_eq!(estimate.label.to_string(), "> 99.9th");
}

#[test]
fn missing_tables_are_reported() {
    let dir = fixture();
    let mut girls = request(dir.path());
    girls.gender = Gender::Girls;
    let error = load_series(&girls).unwrap_err();
    assert!(error.to_string().contains("no who reference tables"));
}
