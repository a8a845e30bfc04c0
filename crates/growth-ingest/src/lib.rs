//! Growth reference ingestion.
//!
//! This crate turns delimited text into typed reference rows and loads the
//! files a chart needs:
//!
//! - **table**: delimited text parsing with numeric auto-typing
//! - **row**: typed [`ReferenceRow`] extraction from parsed rows
//! - **discovery**: reference file naming and classification
//! - **standardize**: raw WHO/CDC downloads to standardized tables
//! - **library**: a directory of standardized tables, keyed by kind, gender and source
//! - **measurements**: patient measurement CSV files

mod error;

pub mod discovery;
pub mod library;
pub mod measurements;
pub mod row;
pub mod standardize;
pub mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === Table Parsing ===
pub use row::{ReferenceRow, reference_rows};
pub use table::{
    CellValue, Delimiter, ParseOptions, ParsedTable, RawRow, parse_rows, parse_table, read_table,
};

// === Discovery and Loading ===
pub use discovery::{
    TableDescriptor, classify_cdc_file, classify_standard_file, classify_who_file, list_csv_files,
};
pub use library::ReferenceLibrary;
pub use measurements::{parse_measurements, read_measurements};
pub use standardize::{
    combine_tables, standardize_cdc, standardize_directories, standardize_who, write_standardized,
};
