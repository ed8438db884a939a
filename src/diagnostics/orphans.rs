//! Orphaned foreign keys

use serde_json::{json, Value as JsonValue};

use crate::join::{JoinBy, JoinOptions, JoinType, Joiner};
use crate::observability::{log_event_with_fields, Event};
use crate::table::{Table, TableLoader};

use super::count::count_by;
use super::errors::DiagnosticsResult;

/// Child rows whose foreign key has no match in the parent
#[derive(Debug, Clone)]
pub struct OrphanReport {
    pub child_rows: usize,
    /// Unmatched child rows, in child order
    pub orphans: Table,
    /// Orphan key tuples with counts, most frequent first
    pub orphan_keys: Table,
}

impl OrphanReport {
    pub fn has_orphans(&self) -> bool {
        !self.orphans.is_empty()
    }

    pub fn to_json(&self) -> JsonValue {
        json!({
            "child_rows": self.child_rows,
            "orphan_rows": self.orphans.num_rows(),
            "orphan_keys": TableLoader::to_json(&self.orphan_keys),
            "orphans": TableLoader::to_json(&self.orphans),
        })
    }
}

/// Finds `child` rows whose key matches no `parent` row.
///
/// A missing foreign key never matches, so such rows are orphans.
pub fn find_orphans(child: &Table, parent: &Table, by: &JoinBy) -> DiagnosticsResult<OrphanReport> {
    let keys = by.resolve(child, parent)?;
    let resolved = JoinBy::Pairs(keys.pairs.clone());

    let orphans = Joiner::new(JoinOptions::default())
        .join(JoinType::Anti, child, parent, &resolved)?
        .into_table();

    let key_columns: Vec<&str> = keys.pairs.iter().map(|p| p.left.as_str()).collect();
    let orphan_keys = count_by(&orphans, &key_columns, true)?;

    if !orphans.is_empty() {
        let key = key_columns.join(", ");
        let rows = orphans.num_rows().to_string();
        let distinct = orphan_keys.num_rows().to_string();
        log_event_with_fields(
            Event::OrphansFound,
            &[
                ("key", key.as_str()),
                ("rows", rows.as_str()),
                ("distinct_keys", distinct.as_str()),
            ],
        );
    }

    Ok(OrphanReport {
        child_rows: child.num_rows(),
        orphans,
        orphan_keys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    fn flights() -> Table {
        Table::from_rows(
            ["flight", "tailnum"],
            vec![
                row![1545, "N14228"],
                row![1714, "N24211"],
                row![1141, "N619AA"],
                row![725, None::<&str>],
                row![461, "N619AA"],
                row![1696, "N24211"],
            ],
        )
        .unwrap()
    }

    fn planes() -> Table {
        Table::from_rows(
            ["tailnum", "year"],
            vec![row!["N14228", 1999], row!["N24211", 1998]],
        )
        .unwrap()
    }

    #[test]
    fn test_orphans_in_child_order() {
        let report = find_orphans(&flights(), &planes(), &JoinBy::columns(["tailnum"])).unwrap();
        assert!(report.has_orphans());
        assert_eq!(report.child_rows, 6);
        assert_eq!(
            report.orphans.rows(),
            &[
                row![1141, "N619AA"],
                row![725, None::<&str>],
                row![461, "N619AA"]
            ]
        );
        assert_eq!(
            report.orphan_keys.rows(),
            &[row!["N619AA", 2], row![None::<&str>, 1]]
        );
    }

    #[test]
    fn test_no_orphans() {
        let child = Table::from_rows(["tailnum"], vec![row!["N14228"]]).unwrap();
        let report = find_orphans(&child, &planes(), &JoinBy::natural()).unwrap();
        assert!(!report.has_orphans());
        assert!(report.orphan_keys.is_empty());
    }

    #[test]
    fn test_orphans_with_renamed_key() {
        let airports = Table::from_rows(["faa"], vec![row!["EWR"], row!["JFK"]]).unwrap();
        let flights = Table::from_rows(["dest"], vec![row!["JFK"], row!["BQN"]]).unwrap();
        let report = find_orphans(&flights, &airports, &JoinBy::pairs([("dest", "faa")])).unwrap();
        assert_eq!(report.orphans.rows(), &[row!["BQN"]]);
        assert_eq!(report.orphan_keys.columns(), &["dest", "n"]);
    }
}
