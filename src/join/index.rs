//! Hash index over the key columns of one table

use std::collections::HashMap;

use crate::table::{Table, Value, ValueKey};

use super::options::NullMatching;

/// Key tuple of a row, or `None` when the row can never match.
///
/// Under `NullMatching::Never` a row with any missing key component has
/// no key.
pub fn key_of(row: &[Value], columns: &[usize], na_matches: NullMatching) -> Option<Vec<ValueKey>> {
    let mut key = Vec::with_capacity(columns.len());
    for &col in columns {
        let value = &row[col];
        if na_matches == NullMatching::Never && value.is_missing() {
            return None;
        }
        key.push(value.identity());
    }
    Some(key)
}

/// Maps key tuples to row positions, positions in table order
#[derive(Debug)]
pub struct KeyIndex {
    map: HashMap<Vec<ValueKey>, Vec<usize>>,
    columns: Vec<usize>,
    na_matches: NullMatching,
}

impl KeyIndex {
    /// Indexes `table` on the given key columns
    pub fn build(table: &Table, columns: &[usize], na_matches: NullMatching) -> Self {
        let mut map: HashMap<Vec<ValueKey>, Vec<usize>> = HashMap::new();
        for (pos, row) in table.rows().iter().enumerate() {
            if let Some(key) = key_of(row, columns, na_matches) {
                map.entry(key).or_default().push(pos);
            }
        }

        Self {
            map,
            columns: columns.to_vec(),
            na_matches,
        }
    }

    /// Rows of the indexed table whose key equals the key of `row`.
    ///
    /// `probe_columns` are the key positions within `row`, aligned with the
    /// indexed columns.
    pub fn lookup(&self, row: &[Value], probe_columns: &[usize]) -> &[usize] {
        debug_assert_eq!(probe_columns.len(), self.columns.len());
        key_of(row, probe_columns, self.na_matches)
            .and_then(|key| self.map.get(&key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct indexed keys
    pub fn distinct_keys(&self) -> usize {
        self.map.len()
    }
}
