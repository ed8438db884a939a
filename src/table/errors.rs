//! Table error types

use thiserror::Error;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while building, loading or saving tables
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column names must not be empty")]
    EmptyColumnName,

    #[error("Row {row} has {actual} values, expected {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Unsupported value in column '{column}': {found}")]
    UnsupportedValue { column: String, found: String },

    #[error("Invalid date '{value}' in column '{column}' (expected YYYY-MM-DD)")]
    InvalidDate { column: String, value: String },

    #[error("Unknown column type: {0}")]
    UnknownType(String),

    #[error("Malformed table JSON: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_mismatch_message() {
        let err = TableError::WidthMismatch {
            row: 3,
            expected: 2,
            actual: 5,
        };
        assert_eq!(err.to_string(), "Row 3 has 5 values, expected 2");
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TableError = io.into();
        assert!(matches!(err, TableError::Io(_)));
    }
}
