//! Error types for labeled-array construction and CF decoding.

use thiserror::Error;

/// Result type alias using CfError.
pub type CfResult<T> = Result<T, CfError>;

/// Primary error type for dataset operations.
#[derive(Debug, Error)]
pub enum CfError {
    // === Structural Errors ===
    #[error("Dimension '{dim}' has size {existing} but variable '{variable}' uses size {found}")]
    DimensionConflict {
        dim: String,
        variable: String,
        existing: usize,
        found: usize,
    },

    #[error("Variable '{variable}' declares {dims} dimensions but its data has rank {rank}")]
    RankMismatch {
        variable: String,
        dims: usize,
        rank: usize,
    },

    #[error("Invalid shape for '{variable}': {message}")]
    ShapeError { variable: String, message: String },

    #[error("Variable not found: {0}")]
    VariableNotFound(String),

    #[error("Duplicate variable name: {0}")]
    DuplicateVariable(String),

    // === Dictionary Errors ===
    #[error("Malformed dataset dictionary: {0}")]
    InvalidDict(String),

    // === Metadata Errors ===
    #[error("Invalid attribute '{attr}' on '{variable}': {message}")]
    InvalidAttribute {
        variable: String,
        attr: String,
        message: String,
    },

    #[error("Invalid time units: {0}")]
    InvalidTimeUnits(String),

    #[error("Unsupported calendar: {0}")]
    UnsupportedCalendar(String),

    #[error("Flag mismatch on '{variable}': {values} flag values but {meanings} meanings")]
    FlagMismatch {
        variable: String,
        values: usize,
        meanings: usize,
    },
}

impl From<ndarray::ShapeError> for CfError {
    fn from(err: ndarray::ShapeError) -> Self {
        CfError::ShapeError {
            variable: String::new(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CfError {
    fn from(err: serde_json::Error) -> Self {
        CfError::InvalidDict(format!("JSON error: {}", err))
    }
}
