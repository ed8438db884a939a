//! Join executor
//!
//! Evaluation order:
//! 1. Validate options and resolve the key
//! 2. Index `y` on its key columns
//! 3. Probe the index with every `x` row, in `x` order
//! 4. Check relationship and unmatched-row expectations
//! 5. Emit rows for the join type
//!
//! Same inputs and options always produce the same output, row for row.

use crate::observability::{log_event_with_fields, Event};
use crate::table::{Row, Table, Value};

use super::by::{JoinBy, ResolvedKeys, Side};
use super::errors::{JoinError, JoinResult};
use super::index::KeyIndex;
use super::layout::OutputLayout;
use super::options::{JoinOptions, JoinType, Relationship, Unmatched};
use super::result::{JoinOutput, JoinStats};

/// Evaluates joins with a fixed set of options
#[derive(Debug, Clone, Default)]
pub struct Joiner {
    options: JoinOptions,
}

/// Match positions of every `x` row, plus per-`y` match counts
struct Matches<'a> {
    left: Vec<&'a [usize]>,
    right_counts: Vec<usize>,
}

impl Matches<'_> {
    fn first_unmatched_left(&self) -> Option<usize> {
        self.left.iter().position(|m| m.is_empty())
    }

    fn first_unmatched_right(&self) -> Option<usize> {
        self.right_counts.iter().position(|&c| c == 0)
    }

    fn unmatched_left(&self) -> usize {
        self.left.iter().filter(|m| m.is_empty()).count()
    }

    fn unmatched_right(&self) -> usize {
        self.right_counts.iter().filter(|&&c| c == 0).count()
    }
}

impl Joiner {
    pub fn new(options: JoinOptions) -> Self {
        Self { options }
    }

    /// Joins `x` with `y`.
    pub fn join(&self, how: JoinType, x: &Table, y: &Table, by: &JoinBy) -> JoinResult<JoinOutput> {
        self.options.validate()?;
        let keys = by.resolve(x, y)?;

        let index = KeyIndex::build(y, &keys.right, self.options.na_matches);

        let mut right_counts = vec![0usize; y.num_rows()];
        let left: Vec<&[usize]> = x
            .rows()
            .iter()
            .map(|row| {
                let found = index.lookup(row, &keys.left);
                for &j in found {
                    right_counts[j] += 1;
                }
                found
            })
            .collect();
        let matches = Matches { left, right_counts };

        if how.is_mutating() {
            if let Err(err) = self
                .check_relationship(&matches)
                .and_then(|_| self.check_unmatched(how, &matches))
            {
                log_event_with_fields(
                    Event::JoinRejected,
                    &[("how", how.as_str()), ("code", err.code().code())],
                );
                return Err(err);
            }
        }

        let table = match how {
            JoinType::Semi | JoinType::Anti => filter_rows(how, x, &matches),
            _ => self.combine_rows(how, x, y, &keys, &matches),
        };

        let stats = JoinStats {
            how,
            by: keys.pairs,
            left_rows: x.num_rows(),
            right_rows: y.num_rows(),
            output_rows: table.num_rows(),
            matched_left: x.num_rows() - matches.unmatched_left(),
            unmatched_left: matches.unmatched_left(),
            unmatched_right: matches.unmatched_right(),
        };

        let rows = stats.output_rows.to_string();
        log_event_with_fields(
            Event::JoinComplete,
            &[("how", how.as_str()), ("rows", rows.as_str())],
        );

        Ok(JoinOutput { table, stats })
    }

    fn check_relationship(&self, matches: &Matches<'_>) -> JoinResult<()> {
        let relationship = self.options.relationship;
        let multi_left = matches.left.iter().position(|m| m.len() > 1);
        let multi_right = matches.right_counts.iter().position(|&c| c > 1);

        if relationship.requires_single_match_for_left() {
            if let Some(row) = multi_left {
                return Err(JoinError::relationship_violated(format!(
                    "row {} of x matches multiple rows in y",
                    row
                )));
            }
        }
        if relationship.requires_single_match_for_right() {
            if let Some(row) = multi_right {
                return Err(JoinError::relationship_violated(format!(
                    "row {} of y matches multiple rows in x",
                    row
                )));
            }
        }

        if relationship == Relationship::None {
            if let (Some(x_row), Some(y_row)) = (multi_left, multi_right) {
                let (x_row, y_row) = (x_row.to_string(), y_row.to_string());
                log_event_with_fields(
                    Event::ManyToManyDetected,
                    &[("x_row", x_row.as_str()), ("y_row", y_row.as_str())],
                );
            }
        }

        Ok(())
    }

    fn check_unmatched(&self, how: JoinType, matches: &Matches<'_>) -> JoinResult<()> {
        if self.options.unmatched == Unmatched::Drop {
            return Ok(());
        }

        if !how.keeps_unmatched_left() {
            if let Some(first) = matches.first_unmatched_left() {
                return Err(JoinError::unmatched_rows(
                    Side::Left,
                    matches.unmatched_left(),
                    first,
                ));
            }
        }
        if !how.keeps_unmatched_right() {
            if let Some(first) = matches.first_unmatched_right() {
                return Err(JoinError::unmatched_rows(
                    Side::Right,
                    matches.unmatched_right(),
                    first,
                ));
            }
        }
        Ok(())
    }

    fn combine_rows(
        &self,
        how: JoinType,
        x: &Table,
        y: &Table,
        keys: &ResolvedKeys,
        matches: &Matches<'_>,
    ) -> Table {
        let layout = OutputLayout::new(x, y, keys, &self.options);
        let mut rows: Vec<Row> = Vec::new();

        for (i, found) in matches.left.iter().enumerate() {
            let x_row = &x.rows()[i];
            if found.is_empty() {
                if how.keeps_unmatched_left() {
                    rows.push(combine(&layout, x.num_columns(), Some(x_row), None));
                }
                continue;
            }
            for &j in found.iter() {
                rows.push(combine(&layout, x.num_columns(), Some(x_row), Some(&y.rows()[j])));
            }
        }

        if how.keeps_unmatched_right() {
            for (j, count) in matches.right_counts.iter().enumerate() {
                if *count == 0 {
                    rows.push(combine(&layout, x.num_columns(), None, Some(&y.rows()[j])));
                }
            }
        }

        Table::from_parts(layout.columns, rows)
    }
}

/// Builds one output row from an optional `x` row and an optional `y` row
fn combine(layout: &OutputLayout, x_width: usize, x_row: Option<&Row>, y_row: Option<&Row>) -> Row {
    let mut out = Vec::with_capacity(layout.columns.len());

    match x_row {
        Some(x_row) => out.extend(x_row.iter().cloned()),
        None => {
            out.resize(x_width, Value::Null);
            if let Some(y_row) = y_row {
                for &(xi, yi) in &layout.coalesce {
                    out[xi] = y_row[yi].clone();
                }
            }
        }
    }

    match y_row {
        Some(y_row) => out.extend(layout.right_columns.iter().map(|&j| y_row[j].clone())),
        None => out.resize(layout.columns.len(), Value::Null),
    }

    out
}

/// Rows of `x` kept by a semi or anti join
fn filter_rows(how: JoinType, x: &Table, matches: &Matches<'_>) -> Table {
    let want_match = how == JoinType::Semi;
    let rows = x
        .rows()
        .iter()
        .zip(&matches.left)
        .filter(|(_, found)| !found.is_empty() == want_match)
        .map(|(row, _)| row.clone())
        .collect();
    Table::from_parts(x.columns().to_vec(), rows)
}

fn run(how: JoinType, x: &Table, y: &Table, by: &JoinBy) -> JoinResult<Table> {
    Joiner::default().join(how, x, y, by).map(JoinOutput::into_table)
}

/// Pairs of matching rows; unmatched rows on either side are dropped
pub fn inner_join(x: &Table, y: &Table, by: &JoinBy) -> JoinResult<Table> {
    run(JoinType::Inner, x, y, by)
}

/// Every `x` row; `y` columns are `NA` where `x` has no match
pub fn left_join(x: &Table, y: &Table, by: &JoinBy) -> JoinResult<Table> {
    run(JoinType::Left, x, y, by)
}

/// Every `y` row; `x` columns are `NA` where `y` has no match
pub fn right_join(x: &Table, y: &Table, by: &JoinBy) -> JoinResult<Table> {
    run(JoinType::Right, x, y, by)
}

/// Every row of both tables at least once
pub fn full_join(x: &Table, y: &Table, by: &JoinBy) -> JoinResult<Table> {
    run(JoinType::Full, x, y, by)
}

/// `x` rows with at least one match, each at most once
pub fn semi_join(x: &Table, y: &Table, by: &JoinBy) -> JoinResult<Table> {
    run(JoinType::Semi, x, y, by)
}

/// `x` rows without any match
pub fn anti_join(x: &Table, y: &Table, by: &JoinBy) -> JoinResult<Table> {
    run(JoinType::Anti, x, y, by)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::{JoinErrorCode, NullMatching};
    use crate::observability::capture_lines;
    use crate::row;

    fn x() -> Table {
        Table::from_rows(
            ["key", "val_x"],
            vec![row![1, "x1"], row![2, "x2"], row![3, "x3"]],
        )
        .unwrap()
    }

    fn y() -> Table {
        Table::from_rows(
            ["key", "val_y"],
            vec![row![1, "y1"], row![2, "y2"], row![4, "y3"]],
        )
        .unwrap()
    }

    fn by_key() -> JoinBy {
        JoinBy::columns(["key"])
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let t = inner_join(&x(), &y(), &by_key()).unwrap();
        assert_eq!(t.columns(), &["key", "val_x", "val_y"]);
        assert_eq!(t.rows(), &[row![1, "x1", "y1"], row![2, "x2", "y2"]]);
    }

    #[test]
    fn test_left_join_fills_missing() {
        let t = left_join(&x(), &y(), &by_key()).unwrap();
        assert_eq!(
            t.rows(),
            &[
                row![1, "x1", "y1"],
                row![2, "x2", "y2"],
                row![3, "x3", None::<&str>]
            ]
        );
    }

    #[test]
    fn test_right_join_coalesces_keys() {
        let t = right_join(&x(), &y(), &by_key()).unwrap();
        assert_eq!(
            t.rows(),
            &[
                row![1, "x1", "y1"],
                row![2, "x2", "y2"],
                row![4, None::<&str>, "y3"]
            ]
        );
    }

    #[test]
    fn test_full_join_appends_unmatched_y() {
        let t = full_join(&x(), &y(), &by_key()).unwrap();
        assert_eq!(
            t.rows(),
            &[
                row![1, "x1", "y1"],
                row![2, "x2", "y2"],
                row![3, "x3", None::<&str>],
                row![4, None::<&str>, "y3"]
            ]
        );
    }

    #[test]
    fn test_filtering_joins() {
        let semi = semi_join(&x(), &y(), &by_key()).unwrap();
        assert_eq!(semi.columns(), x().columns());
        assert_eq!(semi.rows(), &[row![1, "x1"], row![2, "x2"]]);

        let anti = anti_join(&x(), &y(), &by_key()).unwrap();
        assert_eq!(anti.rows(), &[row![3, "x3"]]);
    }

    #[test]
    fn test_duplicate_keys_produce_cartesian_product() {
        let x = Table::from_rows(["key", "a"], vec![row![1, "a1"], row![1, "a2"]]).unwrap();
        let y = Table::from_rows(["key", "b"], vec![row![1, "b1"], row![1, "b2"]]).unwrap();
        let t = inner_join(&x, &y, &by_key()).unwrap();
        assert_eq!(
            t.rows(),
            &[
                row![1, "a1", "b1"],
                row![1, "a1", "b2"],
                row![1, "a2", "b1"],
                row![1, "a2", "b2"]
            ]
        );
    }

    #[test]
    fn test_null_keys_never_match_by_default() {
        let x = Table::from_rows(["key", "a"], vec![row![None::<i64>, "a1"]]).unwrap();
        let y = Table::from_rows(["key", "b"], vec![row![None::<i64>, "b1"]]).unwrap();

        assert!(inner_join(&x, &y, &by_key()).unwrap().is_empty());

        let joiner = Joiner::new(JoinOptions::default().with_na_matches(NullMatching::Na));
        let out = joiner.join(JoinType::Inner, &x, &y, &by_key()).unwrap();
        assert_eq!(out.table.rows(), &[row![None::<i64>, "a1", "b1"]]);
    }

    #[test]
    fn test_keep_does_not_coalesce() {
        let joiner = Joiner::new(JoinOptions::default().with_keep(true));
        let out = joiner.join(JoinType::Full, &x(), &y(), &by_key()).unwrap();
        assert_eq!(out.table.columns(), &["key.x", "val_x", "key.y", "val_y"]);
        assert_eq!(out.table.rows()[2], row![3, "x3", None::<i64>, None::<&str>]);
        assert_eq!(out.table.rows()[3], row![None::<i64>, None::<&str>, 4, "y3"]);
    }

    #[test]
    fn test_stats() {
        let out = Joiner::default()
            .join(JoinType::Left, &x(), &y(), &by_key())
            .unwrap();
        assert_eq!(out.stats.left_rows, 3);
        assert_eq!(out.stats.right_rows, 3);
        assert_eq!(out.stats.output_rows, 3);
        assert_eq!(out.stats.matched_left, 2);
        assert_eq!(out.stats.unmatched_left, 1);
        assert_eq!(out.stats.unmatched_right, 1);
    }

    #[test]
    fn test_relationship_many_to_one_rejects_duplicate_y_keys() {
        let y = Table::from_rows(["key", "b"], vec![row![1, "b1"], row![1, "b2"]]).unwrap();
        let joiner = Joiner::new(JoinOptions::default().with_relationship(Relationship::ManyToOne));
        let err = joiner.join(JoinType::Left, &x(), &y, &by_key()).unwrap_err();
        assert_eq!(err.code(), JoinErrorCode::RelationshipViolated);
        assert!(err.message().contains("row 0 of x"));
    }

    #[test]
    fn test_relationship_one_to_many_rejects_duplicate_x_keys() {
        let x = Table::from_rows(["key", "a"], vec![row![1, "a1"], row![1, "a2"]]).unwrap();
        let joiner = Joiner::new(JoinOptions::default().with_relationship(Relationship::OneToMany));
        let err = joiner.join(JoinType::Inner, &x, &y(), &by_key()).unwrap_err();
        assert_eq!(err.code(), JoinErrorCode::RelationshipViolated);
        assert!(err.message().contains("row 0 of y"));
    }

    #[test]
    fn test_unmatched_error() {
        let joiner = Joiner::new(JoinOptions::default().with_unmatched(Unmatched::Error));

        let err = joiner.join(JoinType::Inner, &x(), &y(), &by_key()).unwrap_err();
        assert_eq!(err.code(), JoinErrorCode::UnmatchedRows);
        assert!(err.message().contains("of x"));

        let err = joiner.join(JoinType::Left, &x(), &y(), &by_key()).unwrap_err();
        assert!(err.message().contains("of y"));

        assert!(joiner.join(JoinType::Full, &x(), &y(), &by_key()).is_ok());
        assert!(joiner.join(JoinType::Anti, &x(), &y(), &by_key()).is_ok());
    }

    #[test]
    fn test_na_matches_keeps_na_and_nan_apart() {
        let x = Table::from_rows(
            ["key", "a"],
            vec![row![None::<f64>, "a1"], row![f64::NAN, "a2"]],
        )
        .unwrap();
        let y = Table::from_rows(["key", "b"], vec![row![f64::NAN, "b1"]]).unwrap();
        let joiner = Joiner::new(JoinOptions::default().with_na_matches(NullMatching::Na));

        let out = joiner.join(JoinType::Inner, &x, &y, &by_key()).unwrap();
        assert_eq!(out.table.num_rows(), 1);
        assert!(matches!(out.table.rows()[0][0], Value::Float(f) if f.is_nan()));
        assert_eq!(out.table.rows()[0][1..], [Value::from("a2"), Value::from("b1")]);

        let out = joiner.join(JoinType::Left, &x, &y, &by_key()).unwrap();
        assert_eq!(out.table.rows()[0], row![None::<f64>, "a1", None::<&str>]);
        assert_eq!(out.stats.unmatched_left, 1);
    }

    #[test]
    fn test_many_to_many_logged_when_relationship_unset() {
        let x = Table::from_rows(["key", "a"], vec![row![1, "a1"], row![1, "a2"]]).unwrap();
        let y = Table::from_rows(["key", "b"], vec![row![1, "b1"], row![1, "b2"], row![1, "b3"]])
            .unwrap();
        let many_to_many = |lines: &[String]| {
            lines
                .iter()
                .any(|l| l.contains(Event::ManyToManyDetected.as_str()))
        };

        let mut result = None;
        let lines = capture_lines(|| result = Some(inner_join(&x, &y, &by_key())));
        assert_eq!(result.unwrap().unwrap().num_rows(), 6);
        assert!(many_to_many(&lines));

        let joiner =
            Joiner::new(JoinOptions::default().with_relationship(Relationship::ManyToMany));
        let mut result = None;
        let lines = capture_lines(|| result = Some(joiner.join(JoinType::Inner, &x, &y, &by_key())));
        assert_eq!(result.unwrap().unwrap().table.num_rows(), 6);
        assert!(!many_to_many(&lines));

        let joiner = Joiner::new(JoinOptions::default().with_relationship(Relationship::OneToOne));
        let err = joiner.join(JoinType::Inner, &x, &y, &by_key()).unwrap_err();
        assert_eq!(err.code(), JoinErrorCode::RelationshipViolated);
    }

    #[test]
    fn test_right_join_unmatched_error_checks_x() {
        let joiner = Joiner::new(JoinOptions::default().with_unmatched(Unmatched::Error));

        let err = joiner.join(JoinType::Right, &x(), &y(), &by_key()).unwrap_err();
        assert_eq!(err.code(), JoinErrorCode::UnmatchedRows);
        assert_eq!(err.message(), "1 row(s) of x have no match (first: row 2)");

        let x = Table::from_rows(["key", "val_x"], vec![row![1, "x1"], row![2, "x2"]]).unwrap();
        let out = joiner.join(JoinType::Right, &x, &y(), &by_key()).unwrap();
        assert_eq!(out.table.num_rows(), 3);
    }

    #[test]
    fn test_invalid_suffix_rejected_before_join() {
        let joiner = Joiner::new(JoinOptions::default().with_suffix("_s", "_s"));
        let err = joiner.join(JoinType::Inner, &x(), &y(), &by_key()).unwrap_err();
        assert_eq!(err.code(), JoinErrorCode::InvalidOption);
    }
}
