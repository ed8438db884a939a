//! Diagnostics errors

use thiserror::Error;

use crate::join::JoinError;
use crate::table::TableError;

/// Result type for key diagnostics
pub type DiagnosticsResult<T> = Result<T, DiagnosticsError>;

/// Key diagnostics errors
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("Key must name at least one column")]
    EmptyKey,

    #[error("Column '{0}' listed twice in key")]
    DuplicateKeyColumn(String),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Join(#[from] JoinError),
}
