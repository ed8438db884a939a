//! Table Loading Tests
//!
//! - Records and columnar JSON load to the same table
//! - Saving and loading preserves column order and types
//! - Malformed input is rejected with a table error

use chrono::NaiveDate;
use serde_json::json;
use tempfile::TempDir;
use tidyjoin::row;
use tidyjoin::table::{ColumnType, Table, TableError, TableLoader, Value};

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_records_and_columnar_forms_agree() {
    let records = TableLoader::from_json(&json!([
        {"key": 1, "val": "x1"},
        {"key": 2, "val": null}
    ]))
    .unwrap();
    let columnar = TableLoader::from_json(&json!({
        "columns": ["key", "val"],
        "rows": [[1, "x1"], [2, null]]
    }))
    .unwrap();

    assert_eq!(records, columnar);
    assert_eq!(records.rows(), &[row![1, "x1"], row![2, None::<&str>]]);
}

#[test]
fn test_record_key_order_is_column_order() {
    let t = TableLoader::parse(r#"[{"z": 1, "a": 2, "m": 3}]"#).unwrap();
    assert_eq!(t.columns(), &["z", "a", "m"]);
}

#[test]
fn test_date_columns() {
    let t = TableLoader::from_json(&json!({
        "columns": ["day", "temp"],
        "types": ["date", "dbl"],
        "rows": [["2013-01-01", 39.02], ["2013-01-02", null]]
    }))
    .unwrap();

    let day = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
    assert_eq!(t.rows()[0][0], Value::Date(day));
    assert_eq!(t.column_type(0), ColumnType::Date);
    assert_eq!(t.column_type(1), ColumnType::Double);
}

#[test]
fn test_malformed_tables_rejected() {
    let cases = [
        json!(42),
        json!([{"a": 1}, {"b": 2}]),
        json!([{"a": [1, 2]}]),
        json!({"columns": ["a", "a"], "rows": []}),
        json!({"columns": ["a"], "rows": [[1, 2]]}),
        json!({"columns": ["d"], "types": ["date"], "rows": [["01/02/2013"]]}),
    ];
    for case in cases {
        assert!(TableLoader::from_json(&case).is_err(), "accepted {}", case);
    }
}

// =============================================================================
// Saving
// =============================================================================

#[test]
fn test_save_and_load_preserves_columns_and_types() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("weather.json");

    let day = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
    let t = Table::from_rows(
        ["origin", "day", "temp", "rain"],
        vec![
            row!["EWR", day, 39.02, false],
            row!["JFK", day, None::<f64>, true],
        ],
    )
    .unwrap();

    TableLoader::save(&t, &path).unwrap();
    let loaded = TableLoader::load(&path).unwrap();

    assert_eq!(loaded, t);
    assert_eq!(loaded.column_type(1), ColumnType::Date);
}

#[test]
fn test_save_and_load_keeps_dates_in_mixed_columns() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("mixed.json");

    let day = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
    let t = Table::from_rows(
        ["c"],
        vec![row![day], row![1], row!["2013-01-02"], row![None::<i64>]],
    )
    .unwrap();
    assert_eq!(t.column_type(0), ColumnType::Mixed);

    TableLoader::save(&t, &path).unwrap();
    let loaded = TableLoader::load(&path).unwrap();

    assert_eq!(loaded, t);
    assert_eq!(loaded.rows()[0][0], Value::Date(day));
    assert_eq!(loaded.rows()[2][0], Value::Str("2013-01-02".to_string()));

    let back = TableLoader::from_json(&TableLoader::to_json(&t)).unwrap();
    assert_eq!(back, t);
}

#[test]
fn test_load_missing_file() {
    let err = TableLoader::load(std::path::Path::new("/nonexistent/t.json")).unwrap_err();
    assert!(matches!(err, TableError::Io(_)));
}
