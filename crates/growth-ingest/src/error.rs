//! Error types for growth reference ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading reference tables and measurements.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// The delimited byte stream could not be decoded.
    #[error("failed to parse table: {0}")]
    Csv(#[from] csv::Error),

    /// A measurement record could not be decoded.
    #[error("invalid measurement on line {line}: {message}")]
    Measurement { line: u64, message: String },

    /// Failed to serialize a table.
    #[error("failed to write table: {message}")]
    TableWrite { message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
