//! Output column layout of mutating joins
//!
//! All `x` columns come first, in `x` order, followed by the emitted `y`
//! columns in `y` order. `y` key columns are emitted only with `keep`.
//! Colliding names get the side's suffix, repeated until the name is unique.

use std::collections::HashSet;

use crate::table::Table;

use super::by::ResolvedKeys;
use super::options::JoinOptions;

/// Column layout of a mutating join's output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Final column names
    pub columns: Vec<String>,
    /// Positions of the `y` columns that are emitted, in output order
    pub right_columns: Vec<usize>,
    /// `(x, y)` key positions whose `x` value is taken from `y` when the
    /// row has no `x` side; empty under `keep`
    pub coalesce: Vec<(usize, usize)>,
}

impl OutputLayout {
    pub fn new(x: &Table, y: &Table, keys: &ResolvedKeys, options: &JoinOptions) -> Self {
        let (suffix_left, suffix_right) = &options.suffix;

        let right_columns: Vec<usize> = (0..y.num_columns())
            .filter(|i| options.keep || !keys.right.contains(i))
            .collect();

        let x_names = x.columns();
        let y_names: Vec<&String> = right_columns.iter().map(|&i| &y.columns()[i]).collect();

        // Names that may be suffixed: x keys stay as they are unless kept
        let left_suffixed: Vec<bool> = x_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (options.keep || !keys.left.contains(&i)) && y_names.contains(&name)
            })
            .collect();
        let right_suffixed: Vec<bool> = y_names.iter().map(|name| x_names.contains(name)).collect();

        // Every original name, so a suffixed name never shadows one
        let mut taken: HashSet<String> = x_names
            .iter()
            .chain(y_names.iter().copied())
            .cloned()
            .collect();

        let mut columns = Vec::with_capacity(x_names.len() + y_names.len());
        for (name, suffixed) in x_names.iter().zip(&left_suffixed) {
            columns.push(if *suffixed {
                unique_name(name, suffix_left, &mut taken)
            } else {
                name.clone()
            });
        }
        for (name, suffixed) in y_names.iter().zip(&right_suffixed) {
            columns.push(if *suffixed {
                unique_name(name, suffix_right, &mut taken)
            } else {
                (*name).clone()
            });
        }

        let coalesce = if options.keep {
            Vec::new()
        } else {
            keys.left
                .iter()
                .copied()
                .zip(keys.right.iter().copied())
                .collect()
        };

        Self {
            columns,
            right_columns,
            coalesce,
        }
    }
}

fn unique_name(name: &str, suffix: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = format!("{}{}", name, suffix);
    while taken.contains(&candidate) {
        candidate.push_str(suffix);
    }
    taken.insert(candidate.clone());
    candidate
}
