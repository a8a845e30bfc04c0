//! Integration tests for directory loading and standardization.

use std::fs;

use growth_ingest::{
    IngestError, ReferenceLibrary, TableDescriptor, read_measurements, standardize_directories,
    write_standardized,
};
use growth_model::{Gender, ReferenceSource, TableKind};

#[test]
fn loads_standardized_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join("wfa_boys_who.csv"),
        "Month,L,M,S,P3,P50,P97\n0,0.3487,3.3464,0.14602,2.5,3.3,4.4\n12,1,9.6,0.094,7.8,9.6,11.5\n",
    )
    .expect("write wfa");
    fs::write(dir.path().join("notes.csv"), "a,b\n1,2\n").expect("write notes");
    fs::write(dir.path().join("readme.txt"), "ignored").expect("write readme");

    let library = ReferenceLibrary::load_dir(dir.path()).expect("load library");
    assert_eq!(library.len(), 1);
    let rows = library
        .rows(TableKind::Wfa, Gender::Boys, ReferenceSource::Who)
        .expect("wfa rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].month, Some(12.0));
    assert_eq!(rows[1].m, Some(9.6));
    assert!(
        library
            .rows(TableKind::Wfa, Gender::Girls, ReferenceSource::Who)
            .is_none()
    );
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("nope");
    let err = ReferenceLibrary::load_dir(&missing).unwrap_err();
    assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
}

#[test]
fn standardizes_raw_downloads() {
    let root = tempfile::tempdir().expect("temp dir");
    let who = root.path().join("who");
    let cdc = root.path().join("cdc");
    fs::create_dir_all(&who).expect("who dir");
    fs::create_dir_all(&cdc).expect("cdc dir");
    fs::write(
        who.join("wfa-boys-zscore-expanded-tables.csv"),
        "Week,L,M,S\n0,0.3487,3.3464,0.14602\n13,0.2,6.2,0.12\n",
    )
    .expect("write who weekly");
    fs::write(
        who.join("wfa_boys_0-to-5-years_zscores.csv"),
        "Month,L,M,S\n3,0.2,6.3,0.12\n60,-0.1,18.3,0.13\n",
    )
    .expect("write who monthly");
    fs::write(
        cdc.join("statage.csv"),
        "Sex,Agemos,L,M,S\n1,24,0.9,86.4,0.04\n2,24,1.0,85.0,0.04\n",
    )
    .expect("write cdc");

    let tables = standardize_directories(Some(&who), Some(&cdc)).expect("standardize");
    let wfa = tables
        .get(&TableDescriptor::new(
            TableKind::Wfa,
            Gender::Boys,
            ReferenceSource::Who,
        ))
        .expect("who wfa");
    let months: Vec<f64> = wfa.rows.iter().filter_map(|row| row.number("Month")).collect();
    assert_eq!(months.len(), 4);
    assert!(months.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(
        tables.contains_key(&TableDescriptor::new(
            TableKind::Hfa,
            Gender::Girls,
            ReferenceSource::Cdc
        ))
    );

    let out = root.path().join("public");
    let written = write_standardized(&out, &tables).expect("write standardized");
    assert_eq!(written, tables.len());
    let library = ReferenceLibrary::load_dir(&out).expect("reload");
    assert_eq!(library.len(), tables.len());
    let statage = library
        .rows(TableKind::Hfa, Gender::Boys, ReferenceSource::Cdc)
        .expect("cdc boys");
    assert_eq!(statage[0].month, Some(24.0));
}

#[test]
fn reads_measurement_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("visits.csv");
    fs::write(
        &path,
        "date,age_years,weight,height,head_circumference\n2023-05-01,0.5,7.9,67.6,43.3\n",
    )
    .expect("write visits");
    let measurements = read_measurements(&path).expect("read measurements");
    assert_eq!(measurements.len(), 1);
    assert_eq!(
        measurements[0].date,
        chrono::NaiveDate::from_ymd_opt(2023, 5, 1).expect("date")
    );
    assert_eq!(measurements[0].head_circumference, Some(43.3));
}
