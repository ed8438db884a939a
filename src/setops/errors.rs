//! Set operation errors

use thiserror::Error;

use crate::table::TableError;

/// Result type for set operations
pub type SetOpResult<T> = Result<T, SetOpError>;

/// Set operation errors
#[derive(Debug, Error)]
pub enum SetOpError {
    #[error("Tables have different columns (only in x: [{}], only in y: [{}])", only_x.join(", "), only_y.join(", "))]
    IncompatibleColumns {
        only_x: Vec<String>,
        only_y: Vec<String>,
    },

    #[error("Unknown set operation: {0}")]
    UnknownOperation(String),

    #[error(transparent)]
    Table(#[from] TableError),
}
