//! Set Operation Tests
//!
//! - intersect, union and setdiff remove duplicate rows
//! - union_all keeps them
//! - y's columns are matched to x's by name
//! - Tables with different column sets are rejected

use tidyjoin::row;
use tidyjoin::setops::{
    intersect, setdiff, setequal, symdiff, union, union_all, SetOp, SetOpError,
};
use tidyjoin::table::Table;

// =============================================================================
// Helper Functions
// =============================================================================

fn df1() -> Table {
    Table::from_rows(["x", "y"], vec![row![1, 1], row![2, 1]]).unwrap()
}

fn df2() -> Table {
    Table::from_rows(["x", "y"], vec![row![1, 1], row![2, 2]]).unwrap()
}

// =============================================================================
// Worked Examples
// =============================================================================

#[test]
fn test_intersect_and_union_example() {
    assert_eq!(intersect(&df1(), &df2()).unwrap().rows(), &[row![1, 1]]);
    assert_eq!(
        union(&df1(), &df2()).unwrap().rows(),
        &[row![1, 1], row![2, 1], row![2, 2]]
    );
}

#[test]
fn test_setdiff_is_not_symmetric() {
    assert_eq!(setdiff(&df1(), &df2()).unwrap().rows(), &[row![2, 1]]);
    assert_eq!(setdiff(&df2(), &df1()).unwrap().rows(), &[row![2, 2]]);
}

// =============================================================================
// Duplicate Handling
// =============================================================================

#[test]
fn test_duplicates_removed_except_union_all() {
    let dup = Table::from_rows(["x", "y"], vec![row![1, 1], row![1, 1], row![2, 1]]).unwrap();

    assert_eq!(intersect(&dup, &df1()).unwrap().num_rows(), 2);
    assert_eq!(union(&dup, &dup).unwrap().num_rows(), 2);
    assert_eq!(setdiff(&dup, &df2()).unwrap().rows(), &[row![2, 1]]);
    assert_eq!(union_all(&dup, &dup).unwrap().num_rows(), 6);
}

#[test]
fn test_symdiff_is_both_setdiffs() {
    let t = symdiff(&df1(), &df2()).unwrap();
    let mut expected = setdiff(&df1(), &df2()).unwrap().into_rows();
    expected.extend(setdiff(&df2(), &df1()).unwrap().into_rows());
    assert_eq!(t.rows(), expected.as_slice());
}

#[test]
fn test_set_identities() {
    let ops = [SetOp::Intersect, SetOp::Union, SetOp::Setdiff, SetOp::Symdiff];
    for op in ops {
        let t = op.apply(&df1(), &df1()).unwrap();
        match op {
            SetOp::Intersect | SetOp::Union => assert!(setequal(&t, &df1()).unwrap()),
            _ => assert!(t.is_empty(), "{} of a table with itself", op),
        }
    }
}

// =============================================================================
// Column Compatibility
// =============================================================================

#[test]
fn test_column_order_of_y_does_not_matter() {
    let swapped = Table::from_rows(["y", "x"], vec![row![2, 2]]).unwrap();
    let t = setdiff(&df2(), &swapped).unwrap();
    assert_eq!(t.columns(), &["x", "y"]);
    assert_eq!(t.rows(), &[row![1, 1]]);
}

#[test]
fn test_different_columns_rejected() {
    let other = Table::from_rows(["x", "z"], vec![row![1, 1]]).unwrap();
    let err = intersect(&df1(), &other).unwrap_err();
    assert!(matches!(err, SetOpError::IncompatibleColumns { .. }));
    assert!(err.to_string().contains("only in y: [z]"));
}

#[test]
fn test_values_of_different_types_are_different_rows() {
    let ints = Table::from_rows(["v"], vec![row![1]]).unwrap();
    let floats = Table::from_rows(["v"], vec![row![1.0]]).unwrap();
    assert!(intersect(&ints, &floats).unwrap().is_empty());
    assert_eq!(union(&ints, &floats).unwrap().num_rows(), 2);
}
