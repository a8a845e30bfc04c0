//! Reference file discovery and classification.
//!
//! Standardized files are named `{code}_{gender}_{source}.csv`, for example
//! `wfa_boys_who.csv`. Raw publisher downloads use their own naming and are
//! classified by substring patterns.

use std::path::{Path, PathBuf};

use growth_model::{Gender, ReferenceSource, TableKind};

use crate::error::{IngestError, Result};

/// Identity of one standardized reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableDescriptor {
    pub kind: TableKind,
    pub gender: Gender,
    pub source: ReferenceSource,
}

impl TableDescriptor {
    pub fn new(kind: TableKind, gender: Gender, source: ReferenceSource) -> Self {
        Self {
            kind,
            gender,
            source,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}_{}_{}.csv", self.kind, self.gender, self.source)
    }
}

/// WHO file name patterns, checked in order.
const WHO_PATTERNS: [(&str, TableKind); 9] = [
    ("bmi", TableKind::Bmifa),
    ("lhfa", TableKind::Lhfa),
    ("wfa", TableKind::Wfa),
    ("hcfa", TableKind::Hcfa),
    ("acfa", TableKind::Acfa),
    ("ssfa", TableKind::Ssfa),
    ("tsfa", TableKind::Tsfa),
    ("wfl", TableKind::Wfl),
    ("wfh", TableKind::Wfh),
];

/// CDC file name patterns, checked in order (`wtageinf` before `wtage`).
const CDC_PATTERNS: [(&str, TableKind); 8] = [
    ("wtageinf", TableKind::Wfa),
    ("wtage", TableKind::Wfa),
    ("lenageinf", TableKind::Lhfa),
    ("statage", TableKind::Hfa),
    ("hcageinf", TableKind::Hcfa),
    ("wtleninf", TableKind::Wfl),
    ("wtstat", TableKind::Wfh),
    ("bmiage", TableKind::Bmifa),
];

/// Lists all CSV files in a directory, sorted by file name.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Classifies a standardized file name such as `lhfa_girls_cdc.csv`.
pub fn classify_standard_file(path: &Path) -> Option<TableDescriptor> {
    let stem = file_stem(path);
    let mut parts = stem.split('_');
    let kind = parts.next()?.parse::<TableKind>().ok()?;
    let gender = parts.next()?.parse::<Gender>().ok()?;
    let source = parts.next()?.parse::<ReferenceSource>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(TableDescriptor::new(kind, gender, source))
}

/// Gender from a raw file name. `girls`/`female` are checked first since
/// `female` contains `male`.
fn gender_from_name(stem: &str) -> Option<Gender> {
    if stem.contains("girls") || stem.contains("female") {
        Some(Gender::Girls)
    } else if stem.contains("boys") || stem.contains("male") {
        Some(Gender::Boys)
    } else {
        None
    }
}

/// Classifies a raw WHO download such as `wfa-boys-zscore-expanded-tables.csv`.
pub fn classify_who_file(path: &Path) -> Option<(TableKind, Gender)> {
    let stem = file_stem(path);
    let kind = WHO_PATTERNS
        .iter()
        .find(|(pattern, _)| stem.contains(pattern))
        .map(|(_, kind)| *kind)?;
    Some((kind, gender_from_name(&stem)?))
}

/// Classifies a raw CDC download such as `wtageinf.csv`. CDC files hold both
/// genders, split later by the `Sex` column.
pub fn classify_cdc_file(path: &Path) -> Option<TableKind> {
    let stem = file_stem(path);
    CDC_PATTERNS
        .iter()
        .find(|(pattern, _)| stem.contains(pattern))
        .map(|(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_names() {
        assert_eq!(
            classify_standard_file(Path::new("refs/wfa_boys_who.csv")),
            Some(TableDescriptor::new(
                TableKind::Wfa,
                Gender::Boys,
                ReferenceSource::Who
            ))
        );
        assert_eq!(classify_standard_file(Path::new("wfa_boys.csv")), None);
        assert_eq!(classify_standard_file(Path::new("wfa_boys_who_v2.csv")), None);
        assert_eq!(classify_standard_file(Path::new("xyz_boys_who.csv")), None);
    }

    #[test]
    fn descriptor_file_name_round_trips() {
        let descriptor = TableDescriptor::new(TableKind::Hfa, Gender::Girls, ReferenceSource::Cdc);
        assert_eq!(descriptor.file_name(), "hfa_girls_cdc.csv");
        assert_eq!(
            classify_standard_file(Path::new(&descriptor.file_name())),
            Some(descriptor)
        );
    }

    #[test]
    fn who_names() {
        assert_eq!(
            classify_who_file(Path::new("bmi-girls-z-who-2007-exp.csv")),
            Some((TableKind::Bmifa, Gender::Girls))
        );
        assert_eq!(
            classify_who_file(Path::new("WFA_Female_0-5.csv")),
            Some((TableKind::Wfa, Gender::Girls))
        );
        assert_eq!(
            classify_who_file(Path::new("lhfa_boys_p_exp.csv")),
            Some((TableKind::Lhfa, Gender::Boys))
        );
        assert_eq!(classify_who_file(Path::new("wfa_unknown.csv")), None);
    }

    #[test]
    fn cdc_names() {
        assert_eq!(classify_cdc_file(Path::new("wtageinf.csv")), Some(TableKind::Wfa));
        assert_eq!(classify_cdc_file(Path::new("statage.csv")), Some(TableKind::Hfa));
        assert_eq!(classify_cdc_file(Path::new("wtstat.csv")), Some(TableKind::Wfh));
        assert_eq!(classify_cdc_file(Path::new("zscore.csv")), None);
    }
}
