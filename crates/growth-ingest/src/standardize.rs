//! Standardization of raw WHO and CDC downloads.
//!
//! Raw tables differ in how they index the axis: WHO infant tables use
//! `Week`, CDC tables use `Agemos` and hold both genders with a `Sex`
//! column. Standardized tables always put the axis column first (`Month`,
//! `Length` or `Height`) and hold one gender.

use std::collections::BTreeMap;
use std::path::Path;

use growth_model::{Gender, ReferenceSource, TableKind};
use tracing::{debug, info, warn};

use crate::discovery::{
    TableDescriptor, classify_cdc_file, classify_who_file, list_csv_files,
};
use crate::error::{IngestError, Result};
use crate::table::{CellValue, ParseOptions, ParsedTable, RawRow, read_table};

/// Weeks per month used when converting WHO weekly tables.
pub const WEEKS_PER_MONTH: f64 = 4.33;

const HEIGHT_AXIS_COLUMNS: [&str; 3] = ["Length", "Height", "Stature"];

fn is_height_indexed(kind: TableKind) -> bool {
    matches!(kind, TableKind::Wfl | TableKind::Wfh)
}

fn move_to_front(headers: &mut Vec<String>, column: &str) {
    headers.retain(|header| header != column);
    headers.insert(0, column.to_string());
}

fn find_height_axis(table: &ParsedTable) -> Option<&'static str> {
    HEIGHT_AXIS_COLUMNS
        .into_iter()
        .find(|column| table.has_column(column))
}

/// Standardizes one WHO table. Returns `None` when no axis column exists.
pub fn standardize_who(mut table: ParsedTable, kind: TableKind) -> Option<ParsedTable> {
    if is_height_indexed(kind) {
        let axis = ["Length", "Height"]
            .into_iter()
            .find(|column| table.has_column(column))?;
        move_to_front(&mut table.headers, axis);
        return Some(table);
    }
    if table.has_column("Week") {
        for row in &mut table.rows {
            if let Some(CellValue::Number(weeks)) = row.remove("Week") {
                row.insert("Month", CellValue::Number(weeks / WEEKS_PER_MONTH));
            }
        }
        table.headers.retain(|header| header != "Week");
    } else if !table.has_column("Month") {
        return None;
    }
    move_to_front(&mut table.headers, "Month");
    Some(table)
}

/// Standardizes one CDC table and splits it by the `Sex` column.
pub fn standardize_cdc(mut table: ParsedTable, kind: TableKind) -> Vec<(Gender, ParsedTable)> {
    if !table.has_column("Sex") {
        return Vec::new();
    }
    let axis = if is_height_indexed(kind) {
        match find_height_axis(&table) {
            Some(axis) => axis,
            None => return Vec::new(),
        }
    } else {
        if !table.has_column("Agemos") {
            return Vec::new();
        }
        for row in &mut table.rows {
            row.rename("Agemos", "Month");
        }
        for header in &mut table.headers {
            if header == "Agemos" {
                *header = "Month".to_string();
            }
        }
        "Month"
    };
    let mut headers = table.headers.clone();
    headers.retain(|header| header != "Sex");
    move_to_front(&mut headers, axis);

    let mut split = Vec::new();
    for gender in [Gender::Boys, Gender::Girls] {
        let rows: Vec<_> = table
            .rows
            .iter()
            .filter(|row| row.number("Sex").and_then(Gender::from_sex_code) == Some(gender))
            .cloned()
            .map(|mut row| {
                row.remove("Sex");
                row
            })
            .collect();
        if !rows.is_empty() {
            split.push((
                gender,
                ParsedTable {
                    headers: headers.clone(),
                    rows,
                },
            ));
        }
    }
    split
}

/// Concatenates tables for one key, sorts by the axis column and keeps the
/// last row for each axis value. Rows without a numeric axis sort last.
pub fn combine_tables(tables: Vec<ParsedTable>) -> Option<ParsedTable> {
    let first = tables.first()?;
    let axis = first.headers.first().cloned().unwrap_or_else(|| "Month".to_string());
    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::new();
    for table in tables {
        for header in table.headers {
            if !headers.contains(&header) {
                headers.push(header);
            }
        }
        rows.extend(table.rows);
    }
    rows.sort_by(|a, b| match (a.number(&axis), b.number(&axis)) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    let mut combined: Vec<RawRow> = Vec::with_capacity(rows.len());
    for row in rows {
        let key = row.number(&axis);
        match combined.last_mut() {
            Some(last) if key.is_some() && last.number(&axis) == key => *last = row,
            _ => combined.push(row),
        }
    }
    Some(ParsedTable {
        headers,
        rows: combined,
    })
}

/// Standardizes every raw WHO and CDC table found in the given directories.
///
/// Missing directories are skipped. Files that cannot be classified or lack
/// an axis column are logged and skipped.
pub fn standardize_directories(
    who_dir: Option<&Path>,
    cdc_dir: Option<&Path>,
) -> Result<BTreeMap<TableDescriptor, ParsedTable>> {
    let mut grouped: BTreeMap<TableDescriptor, Vec<ParsedTable>> = BTreeMap::new();

    if let Some(dir) = who_dir.filter(|dir| dir.is_dir()) {
        for path in list_csv_files(dir)? {
            let Some((kind, gender)) = classify_who_file(&path) else {
                debug!(path = %path.display(), "skipping unclassified WHO file");
                continue;
            };
            let table = read_table(&path, ParseOptions::default())?;
            match standardize_who(table, kind) {
                Some(table) => grouped
                    .entry(TableDescriptor::new(kind, gender, ReferenceSource::Who))
                    .or_default()
                    .push(table),
                None => warn!(path = %path.display(), "WHO file has no axis column"),
            }
        }
    }

    if let Some(dir) = cdc_dir.filter(|dir| dir.is_dir()) {
        for path in list_csv_files(dir)? {
            let Some(kind) = classify_cdc_file(&path) else {
                debug!(path = %path.display(), "skipping unclassified CDC file");
                continue;
            };
            let table = read_table(&path, ParseOptions::default())?;
            let split = standardize_cdc(table, kind);
            if split.is_empty() {
                warn!(path = %path.display(), "CDC file lacks Sex or axis column");
            }
            for (gender, table) in split {
                grouped
                    .entry(TableDescriptor::new(kind, gender, ReferenceSource::Cdc))
                    .or_default()
                    .push(table);
            }
        }
    }

    Ok(grouped
        .into_iter()
        .filter_map(|(descriptor, tables)| Some((descriptor, combine_tables(tables)?)))
        .collect())
}

/// Writes standardized tables as `{code}_{gender}_{source}.csv`.
pub fn write_standardized(
    out_dir: &Path,
    tables: &BTreeMap<TableDescriptor, ParsedTable>,
) -> Result<usize> {
    std::fs::create_dir_all(out_dir).map_err(|source| IngestError::FileWrite {
        path: out_dir.to_path_buf(),
        source,
    })?;
    for (descriptor, table) in tables {
        let path = out_dir.join(descriptor.file_name());
        let text = table.to_csv()?;
        std::fs::write(&path, text).map_err(|source| IngestError::FileWrite {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), rows = table.rows.len(), "wrote standardized table");
    }
    Ok(tables.len())
}
