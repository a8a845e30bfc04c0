//! Delimited reference table parsing.

use std::collections::BTreeMap;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{IngestError, Result};

/// A parsed cell: numbers are typed, everything else keeps its text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Types a trimmed token. Only finite decimal numbers become `Number`.
    pub fn from_token(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => CellValue::Number(value),
            _ => CellValue::Text(token.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(_) => None,
        }
    }

    fn render(&self) -> String {
        match self {
            CellValue::Number(value) => format!("{value}"),
            CellValue::Text(text) => text.clone(),
        }
    }
}

/// One table row keyed by column name. Empty cells are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: BTreeMap<String, CellValue>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(CellValue::as_number)
    }

    /// First numeric value among several column names.
    pub fn number_any(&self, columns: &[&str]) -> Option<f64> {
        columns.iter().find_map(|column| self.number(column))
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn insert(&mut self, column: impl Into<String>, value: CellValue) {
        self.cells.insert(column.into(), value);
    }

    pub fn remove(&mut self, column: &str) -> Option<CellValue> {
        self.cells.remove(column)
    }

    pub fn rename(&mut self, from: &str, to: &str) {
        if let Some(value) = self.cells.remove(from) {
            self.cells.insert(to.to_string(), value);
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Field separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
    /// Comma unless the header line only contains tabs or semicolons.
    Auto,
}

impl Delimiter {
    fn resolve(self, text: &str) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Auto => {
                let header = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
                if header.contains(',') {
                    b','
                } else if header.contains('\t') {
                    b'\t'
                } else if header.contains(';') {
                    b';'
                } else {
                    b','
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub delimiter: Delimiter,
}

impl ParseOptions {
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Header names plus typed rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl ParsedTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|header| header == column)
    }

    /// Renders the table back to comma-separated text.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            let record: Vec<String> = self
                .headers
                .iter()
                .map(|header| row.get(header).map(CellValue::render).unwrap_or_default())
                .collect();
            writer.write_record(&record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|error| IngestError::TableWrite {
                message: error.to_string(),
            })?;
        String::from_utf8(bytes).map_err(|error| IngestError::TableWrite {
            message: error.to_string(),
        })
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Parses delimited text. The first non-blank line is the header.
///
/// Short rows leave trailing columns absent, extra cells are ignored, and
/// blank or whitespace-only lines are skipped.
pub fn parse_table(text: &str, options: ParseOptions) -> Result<ParsedTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter.resolve(text))
        .from_reader(text.as_bytes());
    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let Some(columns) = &headers else {
            headers = Some(record.iter().map(normalize_header).collect());
            continue;
        };
        let mut row = RawRow::new();
        for (column, value) in columns.iter().zip(record.iter()) {
            let token = value.trim();
            if token.is_empty() || column.is_empty() {
                continue;
            }
            row.insert(column.clone(), CellValue::from_token(token));
        }
        rows.push(row);
    }
    Ok(ParsedTable {
        headers: headers.unwrap_or_default(),
        rows,
    })
}

/// Parses comma-separated text into rows.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    Ok(parse_table(text, ParseOptions::default())?.rows)
}

/// Reads and parses a table file.
pub fn read_table(path: &Path, options: ParseOptions) -> Result<ParsedTable> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(&text, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_numbers_and_keeps_text() {
        let rows = parse_rows("Month,L,Note\n0,0.3487,birth\n1,-0.1,\n").expect("parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number("Month"), Some(0.0));
        assert_eq!(rows[0].number("L"), Some(0.3487));
        assert_eq!(rows[0].get("Note"), Some(&CellValue::Text("birth".to_string())));
        assert!(!rows[1].contains("Note"));
    }

    #[test]
    fn skips_blank_lines_and_tolerates_short_rows() {
        let rows = parse_rows("Month,P3,P50\n\n   \n12,7.8\n24,9.7,12.2,99\n").expect("parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number("P3"), Some(7.8));
        assert_eq!(rows[0].get("P50"), None);
        assert_eq!(rows[1].len(), 3);
    }

    #[test]
    fn non_finite_tokens_stay_text() {
        assert_eq!(CellValue::from_token("NaN"), CellValue::Text("NaN".to_string()));
        assert_eq!(CellValue::from_token("inf"), CellValue::Text("inf".to_string()));
        assert_eq!(CellValue::from_token("1e2"), CellValue::Number(100.0));
    }

    #[test]
    fn auto_delimiter_detects_tabs() {
        let table = parse_table(
            "\u{feff}Month\tM\n3\t6.4\n",
            ParseOptions::default().with_delimiter(Delimiter::Auto),
        )
        .expect("parse");
        assert_eq!(table.headers, vec!["Month", "M"]);
        assert_eq!(table.rows[0].number("M"), Some(6.4));
    }

    #[test]
    fn empty_text_yields_empty_table() {
        let table = parse_table("", ParseOptions::default()).expect("parse");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn renders_back_to_csv() {
        let table = parse_table("Month,M,Note\n0.5,3.3,x\n1,,\n", ParseOptions::default())
            .expect("parse");
        let csv = table.to_csv().expect("render");
        assert_eq!(csv, "Month,M,Note\n0.5,3.3,x\n1,,\n");
    }
}
