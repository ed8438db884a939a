//! Key diagnostics
//!
//! Checks the two conditions that make joins misbehave: a declared
//! primary key that is not unique, and foreign keys with no primary-key
//! match in the parent table.

mod count;
mod errors;
mod keys;
mod orphans;

pub use count::count_by;
pub use errors::{DiagnosticsError, DiagnosticsResult};
pub use keys::{check_primary_key, KeyReport};
pub use orphans::{find_orphans, OrphanReport};
