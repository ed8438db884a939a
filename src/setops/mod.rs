//! Set operations over whole rows
//!
//! Both tables must share the same column names. The result uses `x`'s
//! column order. Every operation except `union_all` removes duplicate rows.

mod errors;
mod ops;

pub use errors::{SetOpError, SetOpResult};
pub use ops::{intersect, setdiff, setequal, symdiff, union, union_all, SetOp};
