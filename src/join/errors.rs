//! Join error types
//!
//! Error codes:
//! - JOIN_UNKNOWN_COLUMN
//! - JOIN_NO_COMMON_COLUMNS
//! - JOIN_EMPTY_KEY
//! - JOIN_DUPLICATE_KEY_COLUMN
//! - JOIN_INVALID_OPTION
//! - JOIN_RELATIONSHIP_VIOLATED
//! - JOIN_UNMATCHED_ROWS

use std::fmt;

use super::by::Side;

/// Join-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinErrorCode {
    /// A key column is absent from one of the tables
    UnknownColumn,
    /// Natural join over tables without shared column names
    NoCommonColumns,
    /// Key specification lists no columns
    EmptyKey,
    /// The same column appears twice on one side of the key
    DuplicateKeyColumn,
    /// Join options or key specification could not be used
    InvalidOption,
    /// Matches violate the expected relationship
    RelationshipViolated,
    /// Rows would be dropped while unmatched rows are rejected
    UnmatchedRows,
}

impl JoinErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            JoinErrorCode::UnknownColumn => "JOIN_UNKNOWN_COLUMN",
            JoinErrorCode::NoCommonColumns => "JOIN_NO_COMMON_COLUMNS",
            JoinErrorCode::EmptyKey => "JOIN_EMPTY_KEY",
            JoinErrorCode::DuplicateKeyColumn => "JOIN_DUPLICATE_KEY_COLUMN",
            JoinErrorCode::InvalidOption => "JOIN_INVALID_OPTION",
            JoinErrorCode::RelationshipViolated => "JOIN_RELATIONSHIP_VIOLATED",
            JoinErrorCode::UnmatchedRows => "JOIN_UNMATCHED_ROWS",
        }
    }

    /// Whether the error comes from the data rather than the call
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            JoinErrorCode::RelationshipViolated | JoinErrorCode::UnmatchedRows
        )
    }
}

impl fmt::Display for JoinErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Join error with code and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinError {
    code: JoinErrorCode,
    message: String,
}

impl JoinError {
    fn new(code: JoinErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Key column missing from one side
    pub fn unknown_column(side: Side, column: &str) -> Self {
        Self::new(
            JoinErrorCode::UnknownColumn,
            format!("Join column '{}' not found in {}", column, side),
        )
    }

    /// Natural join without shared columns
    pub fn no_common_columns() -> Self {
        Self::new(
            JoinErrorCode::NoCommonColumns,
            "No common columns to join by; supply an explicit key",
        )
    }

    /// Empty key specification
    pub fn empty_key() -> Self {
        Self::new(JoinErrorCode::EmptyKey, "Join key must name at least one column")
    }

    /// Column repeated on one side of the key
    pub fn duplicate_key_column(side: Side, column: &str) -> Self {
        Self::new(
            JoinErrorCode::DuplicateKeyColumn,
            format!("Join column '{}' used more than once in {}", column, side),
        )
    }

    /// Unusable option or key specification
    pub fn invalid_option(reason: impl Into<String>) -> Self {
        Self::new(JoinErrorCode::InvalidOption, reason)
    }

    /// Relationship expectation not met
    pub fn relationship_violated(reason: impl Into<String>) -> Self {
        Self::new(JoinErrorCode::RelationshipViolated, reason)
    }

    /// Unmatched rows on a side that must fully match
    pub fn unmatched_rows(side: Side, count: usize, first_row: usize) -> Self {
        Self::new(
            JoinErrorCode::UnmatchedRows,
            format!(
                "{} row(s) of {} have no match (first: row {})",
                count, side, first_row
            ),
        )
    }

    /// Returns the error code
    pub fn code(&self) -> JoinErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for JoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for JoinError {}

/// Result type for join operations
pub type JoinResult<T> = Result<T, JoinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(JoinErrorCode::UnknownColumn.code(), "JOIN_UNKNOWN_COLUMN");
        assert_eq!(JoinErrorCode::NoCommonColumns.code(), "JOIN_NO_COMMON_COLUMNS");
        assert_eq!(
            JoinErrorCode::RelationshipViolated.code(),
            "JOIN_RELATIONSHIP_VIOLATED"
        );
        assert_eq!(JoinErrorCode::UnmatchedRows.code(), "JOIN_UNMATCHED_ROWS");
    }

    #[test]
    fn test_data_errors() {
        assert!(JoinError::unmatched_rows(Side::Left, 2, 0).code().is_data_error());
        assert!(!JoinError::empty_key().code().is_data_error());
    }

    #[test]
    fn test_error_display() {
        let err = JoinError::unknown_column(Side::Right, "tailnum");
        let display = err.to_string();
        assert!(display.starts_with("JOIN_UNKNOWN_COLUMN: "));
        assert!(display.contains("'tailnum'"));
        assert!(display.contains(" y"));
    }
}
