use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid lane: '{0}' (expected one of gold, mid, jungle, roam, exp)")]
    InvalidLane(String),

    #[error("Hero not found: {0}")]
    HeroNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data source error: {0}")]
    Source(String),
}

/// Row-level failures while building a catalog from raw rows.
///
/// Row numbers are zero-based positions in the input sequence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Required column '{column}' missing in row {row}")]
    MissingColumn { row: usize, column: String },

    #[error("Column '{column}' has no value in row {row}")]
    MissingValue { row: usize, column: String },

    #[error("Column '{column}' in row {row} is not a number: {value}")]
    InvalidNumber { row: usize, column: String, value: String },

    #[error("Column '{column}' in row {row} is not finite: {value}")]
    NonFinite { row: usize, column: String, value: f64 },
}
