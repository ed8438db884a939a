//! Join key specification and resolution

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::observability::{log_event_with_fields, Event};
use crate::table::Table;

use super::errors::{JoinError, JoinResult};

/// Which input of a join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The first table, `x`
    Left,
    /// The second table, `y`
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "x"),
            Side::Right => write!(f, "y"),
        }
    }
}

/// One key column of `x` matched against one key column of `y`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPair {
    pub left: String,
    pub right: String,
}

impl KeyPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Same column name on both sides
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            left: name.clone(),
            right: name,
        }
    }
}

impl fmt::Display for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.left == self.right {
            write!(f, "{}", self.left)
        } else {
            write!(f, "{} == {}", self.left, self.right)
        }
    }
}

/// How the key of a join is chosen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum JoinBy {
    /// All column names common to both tables, in `x` order
    #[default]
    Natural,
    /// Same-named key columns
    Columns(Vec<String>),
    /// Explicit `x` column to `y` column mapping
    Pairs(Vec<KeyPair>),
}

impl JoinBy {
    pub fn natural() -> Self {
        JoinBy::Natural
    }

    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        JoinBy::Columns(columns.into_iter().map(Into::into).collect())
    }

    pub fn pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        JoinBy::Pairs(
            pairs
                .into_iter()
                .map(|(a, b)| KeyPair::new(a, b))
                .collect(),
        )
    }

    /// Parses `a,b` (same-named columns) or `a=b,c=d` (pairs).
    ///
    /// An empty string means a natural join. Items without `=` in a pair
    /// list join same-named columns.
    pub fn parse(spec: &str) -> JoinResult<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Ok(JoinBy::Natural);
        }

        let mut pairs = Vec::new();
        let mut any_mapping = false;

        for item in spec.split(',') {
            let item = item.trim();
            if item.is_empty() {
                return Err(JoinError::invalid_option(format!(
                    "empty column in key specification '{}'",
                    spec
                )));
            }

            match item.split_once('=') {
                Some((left, right)) => {
                    let (left, right) = (left.trim(), right.trim());
                    if left.is_empty() || right.is_empty() {
                        return Err(JoinError::invalid_option(format!(
                            "incomplete key mapping '{}'",
                            item
                        )));
                    }
                    any_mapping = true;
                    pairs.push(KeyPair::new(left, right));
                }
                None => pairs.push(KeyPair::same(item)),
            }
        }

        if any_mapping {
            Ok(JoinBy::Pairs(pairs))
        } else {
            Ok(JoinBy::Columns(pairs.into_iter().map(|p| p.left).collect()))
        }
    }

    /// Resolves the key against both tables
    pub fn resolve(&self, x: &Table, y: &Table) -> JoinResult<ResolvedKeys> {
        let pairs: Vec<KeyPair> = match self {
            JoinBy::Natural => {
                let common: Vec<KeyPair> = x
                    .columns()
                    .iter()
                    .filter(|c| y.has_column(c))
                    .map(|c| KeyPair::same(c.as_str()))
                    .collect();
                if common.is_empty() {
                    return Err(JoinError::no_common_columns());
                }

                let names: Vec<&str> = common.iter().map(|p| p.left.as_str()).collect();
                let by = names.join(", ");
                log_event_with_fields(Event::NaturalKeyInferred, &[("by", by.as_str())]);
                common
            }
            JoinBy::Columns(columns) => columns.iter().map(|c| KeyPair::same(c.as_str())).collect(),
            JoinBy::Pairs(pairs) => pairs.clone(),
        };

        if pairs.is_empty() {
            return Err(JoinError::empty_key());
        }

        let mut left = Vec::with_capacity(pairs.len());
        let mut right = Vec::with_capacity(pairs.len());
        let mut seen_left = HashSet::new();
        let mut seen_right = HashSet::new();

        for pair in &pairs {
            let l = x
                .column_index(&pair.left)
                .ok_or_else(|| JoinError::unknown_column(Side::Left, &pair.left))?;
            let r = y
                .column_index(&pair.right)
                .ok_or_else(|| JoinError::unknown_column(Side::Right, &pair.right))?;

            if !seen_left.insert(l) {
                return Err(JoinError::duplicate_key_column(Side::Left, &pair.left));
            }
            if !seen_right.insert(r) {
                return Err(JoinError::duplicate_key_column(Side::Right, &pair.right));
            }

            left.push(l);
            right.push(r);
        }

        Ok(ResolvedKeys { pairs, left, right })
    }
}

/// Key columns resolved to positions in both tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKeys {
    pub pairs: Vec<KeyPair>,
    /// Key column positions in `x`
    pub left: Vec<usize>,
    /// Key column positions in `y`, aligned with `left`
    pub right: Vec<usize>,
}
