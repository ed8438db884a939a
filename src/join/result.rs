//! Join results

use serde::Serialize;

use crate::table::Table;

use super::by::KeyPair;
use super::options::JoinType;

/// Counts describing one join evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    pub how: JoinType,
    pub by: Vec<KeyPair>,
    pub left_rows: usize,
    pub right_rows: usize,
    pub output_rows: usize,
    /// `x` rows with at least one match
    pub matched_left: usize,
    pub unmatched_left: usize,
    /// `y` rows without any match
    pub unmatched_right: usize,
}

/// Output table plus statistics
#[derive(Debug, Clone)]
pub struct JoinOutput {
    pub table: Table,
    pub stats: JoinStats,
}

impl JoinOutput {
    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.table.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
