//! Primary key checks

use serde_json::{json, Value as JsonValue};

use crate::observability::{log_event_with_fields, Event};
use crate::table::{Table, TableLoader, Value};

use super::count::{count_by, key_positions};
use super::errors::DiagnosticsResult;

/// Outcome of checking whether columns form a primary key
#[derive(Debug, Clone)]
pub struct KeyReport {
    pub key: Vec<String>,
    pub total_rows: usize,
    /// Key tuples occurring more than once, with their counts
    pub duplicates: Table,
    /// Rows with at least one missing key component
    pub missing_key_rows: usize,
}

impl KeyReport {
    /// True when every row has a complete key and no key repeats
    pub fn is_primary_key(&self) -> bool {
        self.duplicates.is_empty() && self.missing_key_rows == 0
    }

    /// Number of rows sharing their key with another row
    pub fn duplicate_rows(&self) -> usize {
        self.duplicates
            .rows()
            .iter()
            .map(|r| match r.last() {
                Some(Value::Int(n)) => *n as usize,
                _ => 0,
            })
            .sum()
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "key": self.key,
            "total_rows": self.total_rows,
            "is_primary_key": self.is_primary_key(),
            "missing_key_rows": self.missing_key_rows,
            "duplicates": TableLoader::to_json(&self.duplicates),
        })
    }
}

/// Checks that `columns` uniquely identify every row of `table`.
///
/// Rows whose key has a missing component are counted separately; they
/// also appear among the duplicates when the same missing key repeats.
pub fn check_primary_key(table: &Table, columns: &[&str]) -> DiagnosticsResult<KeyReport> {
    let positions = key_positions(table, columns)?;

    let missing_key_rows = table
        .rows()
        .iter()
        .filter(|r| positions.iter().any(|&i| r[i].is_missing()))
        .count();

    let counts = count_by(table, columns, true)?;
    let duplicate_groups = counts
        .rows()
        .iter()
        .take_while(|r| matches!(r.last(), Some(Value::Int(n)) if *n > 1))
        .count();
    let duplicates = Table::from_parts(
        counts.columns().to_vec(),
        counts.rows()[..duplicate_groups].to_vec(),
    );

    let report = KeyReport {
        key: columns.iter().map(|c| c.to_string()).collect(),
        total_rows: table.num_rows(),
        duplicates,
        missing_key_rows,
    };

    let key = columns.join(", ");
    let groups = duplicate_groups.to_string();
    let missing = missing_key_rows.to_string();
    let fields = [
        ("key", key.as_str()),
        ("duplicate_groups", groups.as_str()),
        ("missing_key_rows", missing.as_str()),
    ];
    log_event_with_fields(Event::KeyCheckComplete, &fields);
    if !report.is_primary_key() {
        log_event_with_fields(Event::KeyNotUnique, &fields);
    }

    Ok(report)
}
