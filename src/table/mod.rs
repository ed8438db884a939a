//! Tables and values
//!
//! A table is an ordered sequence of rows sharing one column set. Rows are
//! positional; column names are unique and non-empty.
//!
//! # Values
//!
//! - `Null` and float NaN are missing values
//! - No type coercion between variants
//! - `Date` values read and print as `YYYY-MM-DD`

mod display;
mod errors;
mod loader;
#[allow(clippy::module_inception)]
mod table;
mod value;

pub use display::{TableDisplay, DEFAULT_PRINT_ROWS};
pub use errors::{TableError, TableResult};
pub use loader::TableLoader;
pub use table::{row_identity, ColumnType, Row, Table};
pub use value::{Value, ValueKey, DATE_FORMAT};
