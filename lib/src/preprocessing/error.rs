//! Error types for feature preprocessing.

use crate::schema::ColumnGroup;
use std::fmt;

/// Error type for classification, encoding and table operations.
#[derive(Debug)]
pub enum FeatureError {
    /// A column required by the schema is absent from the input table.
    MissingColumn { column: String, group: ColumnGroup },
    /// A column looked up by name does not exist.
    ColumnNotFound(String),
    /// A category value was not seen during fit and the policy is to fail.
    UnseenCategory { column: String, value: String },
    /// A text cell was found in a column that must be numeric.
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },
    /// Two columns with the same name in one table.
    DuplicateColumn(String),
    /// A column does not have the table's row count.
    LengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },
    /// Two tables cannot be aligned row by row.
    IndexMismatch { left_rows: usize, right_rows: usize },
    /// Empty data provided where non-empty was required.
    EmptyData(String),
    /// Invalid configuration value.
    InvalidParameter(String),
    /// Serialization or deserialization error.
    SerializationError(String),
    /// Malformed CSV input.
    CsvError(String),
    /// I/O error during file operations.
    IoError(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::MissingColumn { column, group } => {
                write!(f, "Missing column: '{}' ({} group)", column, group)
            }
            FeatureError::ColumnNotFound(name) => {
                write!(f, "Column not found: '{}'", name)
            }
            FeatureError::UnseenCategory { column, value } => {
                write!(f, "Unseen category '{}' in column '{}'", value, column)
            }
            FeatureError::NonNumeric { column, row, value } => {
                write!(
                    f,
                    "Non-numeric value '{}' in column '{}' at row {}",
                    value, column, row
                )
            }
            FeatureError::DuplicateColumn(name) => {
                write!(f, "Duplicate column: '{}'", name)
            }
            FeatureError::LengthMismatch {
                column,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Length mismatch: column '{}' has {} rows, expected {}",
                    column, got, expected
                )
            }
            FeatureError::IndexMismatch {
                left_rows,
                right_rows,
            } => {
                write!(
                    f,
                    "Index mismatch: cannot align {} rows with {} rows",
                    left_rows, right_rows
                )
            }
            FeatureError::EmptyData(msg) => {
                write!(f, "Empty data: {}", msg)
            }
            FeatureError::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {}", msg)
            }
            FeatureError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            FeatureError::CsvError(msg) => {
                write!(f, "CSV error: {}", msg)
            }
            FeatureError::IoError(msg) => {
                write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for FeatureError {}

impl From<std::io::Error> for FeatureError {
    fn from(err: std::io::Error) -> Self {
        FeatureError::IoError(err.to_string())
    }
}

impl From<bincode::Error> for FeatureError {
    fn from(err: bincode::Error) -> Self {
        FeatureError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for FeatureError {
    fn from(err: serde_json::Error) -> Self {
        FeatureError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for FeatureError {
    fn from(err: csv::Error) -> Self {
        FeatureError::CsvError(err.to_string())
    }
}
