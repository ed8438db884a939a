//! Row-set operations
//!
//! Both tables must have the same set of column names; `y` is aligned to
//! `x`'s column order. Rows compare by full-row identity, where a missing
//! value equals a missing value of the same kind.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::observability::{log_event_with_fields, Event};
use crate::table::{row_identity, Row, Table, ValueKey};

use super::errors::{SetOpError, SetOpResult};

/// Set operations producing a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    Intersect,
    Union,
    UnionAll,
    Setdiff,
    Symdiff,
}

impl SetOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetOp::Intersect => "intersect",
            SetOp::Union => "union",
            SetOp::UnionAll => "union-all",
            SetOp::Setdiff => "setdiff",
            SetOp::Symdiff => "symdiff",
        }
    }

    /// Evaluates the operation on `x` and `y`
    pub fn apply(&self, x: &Table, y: &Table) -> SetOpResult<Table> {
        let y_rows = align(x, y)?;
        let x_rows = x.rows();

        let rows = match self {
            SetOp::Intersect => {
                let in_y = identities(&y_rows);
                distinct_where(x_rows, |id| in_y.contains(id))
            }
            SetOp::Union => {
                let mut seen = HashSet::new();
                x_rows
                    .iter()
                    .chain(y_rows.iter())
                    .filter(|r| seen.insert(row_identity(r)))
                    .cloned()
                    .collect()
            }
            SetOp::UnionAll => x_rows.iter().chain(y_rows.iter()).cloned().collect(),
            SetOp::Setdiff => {
                let in_y = identities(&y_rows);
                distinct_where(x_rows, |id| !in_y.contains(id))
            }
            SetOp::Symdiff => {
                let in_x = identities(x_rows);
                let in_y = identities(&y_rows);
                let mut rows = distinct_where(x_rows, |id| !in_y.contains(id));
                rows.extend(distinct_where(&y_rows, |id| !in_x.contains(id)));
                rows
            }
        };

        let count = rows.len().to_string();
        log_event_with_fields(
            Event::SetOpComplete,
            &[("op", self.as_str()), ("rows", count.as_str())],
        );

        Ok(Table::from_parts(x.columns().to_vec(), rows))
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SetOp {
    type Err = SetOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intersect" => Ok(SetOp::Intersect),
            "union" => Ok(SetOp::Union),
            "union-all" | "union_all" => Ok(SetOp::UnionAll),
            "setdiff" => Ok(SetOp::Setdiff),
            "symdiff" => Ok(SetOp::Symdiff),
            other => Err(SetOpError::UnknownOperation(other.to_string())),
        }
    }
}

/// `y`'s rows with columns reordered to `x`'s order
fn align(x: &Table, y: &Table) -> SetOpResult<Vec<Row>> {
    let only_x: Vec<String> = x
        .columns()
        .iter()
        .filter(|c| !y.has_column(c))
        .cloned()
        .collect();
    let only_y: Vec<String> = y
        .columns()
        .iter()
        .filter(|c| !x.has_column(c))
        .cloned()
        .collect();
    if !only_x.is_empty() || !only_y.is_empty() {
        return Err(SetOpError::IncompatibleColumns { only_x, only_y });
    }

    if x.columns() == y.columns() {
        return Ok(y.rows().to_vec());
    }

    let order = x
        .columns()
        .iter()
        .map(|c| y.require_column(c))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(y.rows()
        .iter()
        .map(|r| order.iter().map(|&i| r[i].clone()).collect())
        .collect())
}

fn identities(rows: &[Row]) -> HashSet<Vec<ValueKey>> {
    rows.iter().map(|r| row_identity(r)).collect()
}

/// Distinct rows, first occurrence first, whose identity passes `keep`
fn distinct_where<F>(rows: &[Row], keep: F) -> Vec<Row>
where
    F: Fn(&Vec<ValueKey>) -> bool,
{
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|r| {
            let id = row_identity(r);
            keep(&id) && seen.insert(id)
        })
        .cloned()
        .collect()
}

/// Rows of `x` that also appear in `y`, without duplicates
pub fn intersect(x: &Table, y: &Table) -> SetOpResult<Table> {
    SetOp::Intersect.apply(x, y)
}

/// Rows of either table, without duplicates
pub fn union(x: &Table, y: &Table) -> SetOpResult<Table> {
    SetOp::Union.apply(x, y)
}

/// All rows of `x` followed by all rows of `y`
pub fn union_all(x: &Table, y: &Table) -> SetOpResult<Table> {
    SetOp::UnionAll.apply(x, y)
}

/// Rows of `x` that do not appear in `y`, without duplicates
pub fn setdiff(x: &Table, y: &Table) -> SetOpResult<Table> {
    SetOp::Setdiff.apply(x, y)
}

/// Rows in exactly one of the tables, without duplicates
pub fn symdiff(x: &Table, y: &Table) -> SetOpResult<Table> {
    SetOp::Symdiff.apply(x, y)
}

/// Whether both tables hold the same distinct rows
pub fn setequal(x: &Table, y: &Table) -> SetOpResult<bool> {
    let y_rows = align(x, y)?;
    Ok(identities(x.rows()) == identities(&y_rows))
}
