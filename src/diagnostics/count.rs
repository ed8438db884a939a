//! Counting rows per key

use std::collections::HashMap;

use crate::table::{row_identity, Row, Table, Value, ValueKey};

use super::errors::{DiagnosticsError, DiagnosticsResult};

/// Name of the count column, unless a key column already uses it
const COUNT_COLUMN: &str = "n";

/// Counts rows per distinct key tuple.
///
/// The result has the key columns followed by a count column `n` (`nn`,
/// `nnn`, ... if the key already has an `n`). Groups appear in order of
/// first occurrence; with `sort` they are stably ordered by descending count.
/// Missing values form their own groups.
pub fn count_by(table: &Table, columns: &[&str], sort: bool) -> DiagnosticsResult<Table> {
    let positions = key_positions(table, columns)?;

    let mut groups: Vec<(Row, i64)> = Vec::new();
    let mut slots: HashMap<Vec<ValueKey>, usize> = HashMap::new();
    for row in table.rows() {
        let key: Row = positions.iter().map(|&i| row[i].clone()).collect();
        let id = row_identity(&key);
        if let Some(&slot) = slots.get(&id) {
            groups[slot].1 += 1;
        } else {
            slots.insert(id, groups.len());
            groups.push((key, 1));
        }
    }

    if sort {
        groups.sort_by(|a, b| b.1.cmp(&a.1));
    }

    let mut out_columns: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let mut count_name = COUNT_COLUMN.to_string();
    while out_columns.contains(&count_name) {
        count_name.push_str(COUNT_COLUMN);
    }
    out_columns.push(count_name);

    let rows = groups
        .into_iter()
        .map(|(mut key, n)| {
            key.push(Value::Int(n));
            key
        })
        .collect();

    Ok(Table::from_parts(out_columns, rows))
}

/// Resolves key column names to positions, rejecting empty or repeated keys
pub(crate) fn key_positions(table: &Table, columns: &[&str]) -> DiagnosticsResult<Vec<usize>> {
    if columns.is_empty() {
        return Err(DiagnosticsError::EmptyKey);
    }

    let mut positions = Vec::with_capacity(columns.len());
    for name in columns {
        let index = table.require_column(name)?;
        if positions.contains(&index) {
            return Err(DiagnosticsError::DuplicateKeyColumn(name.to_string()));
        }
        positions.push(index);
    }
    Ok(positions)
}
