//! In-memory collection of standardized reference tables.

use std::collections::BTreeMap;
use std::path::Path;

use growth_model::{Gender, ReferenceSource, TableKind};
use tracing::{debug, info};

use crate::discovery::{TableDescriptor, classify_standard_file, list_csv_files};
use crate::error::Result;
use crate::row::{ReferenceRow, reference_rows};
use crate::table::{ParseOptions, read_table};

#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    tables: BTreeMap<TableDescriptor, Vec<ReferenceRow>>,
}

impl ReferenceLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `{code}_{gender}_{source}.csv` file of a directory.
    /// Files with other names are ignored.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let mut library = Self::new();
        for path in list_csv_files(dir)? {
            let Some(descriptor) = classify_standard_file(&path) else {
                debug!(path = %path.display(), "ignoring non-reference file");
                continue;
            };
            let table = read_table(&path, ParseOptions::default())?;
            debug!(
                path = %path.display(),
                rows = table.rows.len(),
                "loaded reference table"
            );
            library.insert(descriptor, reference_rows(&table.rows));
        }
        info!(
            dir = %dir.display(),
            tables = library.len(),
            "reference library loaded"
        );
        Ok(library)
    }

    pub fn insert(&mut self, descriptor: TableDescriptor, rows: Vec<ReferenceRow>) {
        self.tables.insert(descriptor, rows);
    }

    pub fn rows(
        &self,
        kind: TableKind,
        gender: Gender,
        source: ReferenceSource,
    ) -> Option<&[ReferenceRow]> {
        self.tables
            .get(&TableDescriptor::new(kind, gender, source))
            .map(Vec::as_slice)
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.tables.keys()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
