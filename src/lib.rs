//! tidyjoin - relational joins and set operations over in-memory tables
//!
//! - table: values, tables, JSON loading and tibble printing
//! - join: inner, left, right, full, semi and anti joins
//! - setops: intersect, union, setdiff and friends
//! - diagnostics: primary key and orphaned foreign key checks

pub mod cli;
pub mod diagnostics;
pub mod join;
pub mod observability;
pub mod setops;
pub mod table;
