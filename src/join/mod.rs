//! Join evaluator
//!
//! Mutating joins (inner, left, right, full) add `y` columns to `x`;
//! filtering joins (semi, anti) keep or drop `x` rows by match existence.
//!
//! # Semantics
//!
//! - Keys compare by exact equality, no coercion
//! - Missing key values never match unless `NullMatching::Na`
//! - Duplicate keys on both sides produce every matching pair
//! - Output rows follow `x` order; rows only in `y` come last
//! - Without an explicit key, the common column names are used

mod by;
mod errors;
mod executor;
mod index;
mod layout;
mod options;
mod result;

pub use by::{JoinBy, KeyPair, ResolvedKeys, Side};
pub use errors::{JoinError, JoinErrorCode, JoinResult};
pub use executor::{anti_join, full_join, inner_join, left_join, right_join, semi_join, Joiner};
pub use index::{key_of, KeyIndex};
pub use layout::OutputLayout;
pub use options::{
    JoinOptions, JoinType, NullMatching, Relationship, Unmatched, DEFAULT_SUFFIX_LEFT,
    DEFAULT_SUFFIX_RIGHT,
};
pub use result::{JoinOutput, JoinStats};
