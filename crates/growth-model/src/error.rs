use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrowthError {
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),
    #[error("unknown table kind: {0}")]
    UnknownTableKind(String),
    #[error("unknown gender: {0}")]
    UnknownGender(String),
    #[error("unknown reference source: {0}")]
    UnknownSource(String),
}

pub type Result<T> = std::result::Result<T, GrowthError>;
