//! JSON loading and saving of tables
//!
//! Two input forms are accepted:
//!
//! - records: `[{"key": 1, "val": "x1"}, ...]`
//! - columnar: `{"columns": [...], "types": [...], "rows": [[...], ...]}`
//!
//! Tables are always saved in the columnar form, with `types`. In a `mixed`
//! column a date is written as `{"date": "2013-01-01"}` so it does not read
//! back as a string.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::{json, Map, Value as JsonValue};

use super::errors::{TableError, TableResult};
use super::table::{ColumnType, Row, Table};
use super::value::{Value, DATE_FORMAT};

/// Key of the object wrapping a date cell in a mixed column
const DATE_CELL_KEY: &str = "date";

/// Loads and saves tables as JSON
pub struct TableLoader;

impl TableLoader {
    /// Reads a table from a JSON file
    pub fn load(path: &Path) -> TableResult<Table> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses a table from JSON text
    pub fn parse(content: &str) -> TableResult<Table> {
        let json: JsonValue = serde_json::from_str(content)?;
        Self::from_json(&json)
    }

    /// Builds a table from either JSON form
    pub fn from_json(json: &JsonValue) -> TableResult<Table> {
        match json {
            JsonValue::Array(records) => Self::from_records(records),
            JsonValue::Object(obj) => Self::from_columnar(obj),
            other => Err(TableError::Malformed(format!(
                "expected an array of records or a columnar object, found {}",
                json_kind(other)
            ))),
        }
    }

    fn from_records(records: &[JsonValue]) -> TableResult<Table> {
        let Some(first) = records.first() else {
            return Table::new(Vec::<String>::new());
        };
        let first = first
            .as_object()
            .ok_or_else(|| TableError::Malformed("record 0 is not an object".to_string()))?;

        let columns: Vec<String> = first.keys().cloned().collect();
        let mut table = Table::new(columns.clone())?;

        for (i, record) in records.iter().enumerate() {
            let obj = record
                .as_object()
                .ok_or_else(|| TableError::Malformed(format!("record {} is not an object", i)))?;

            if obj.len() != columns.len() {
                return Err(TableError::Malformed(format!(
                    "record {} has {} fields, expected {}",
                    i,
                    obj.len(),
                    columns.len()
                )));
            }

            let row = columns
                .iter()
                .map(|c| match obj.get(c) {
                    Some(v) => Value::from_json(c, v),
                    None => Err(TableError::Malformed(format!(
                        "record {} is missing column '{}'",
                        i, c
                    ))),
                })
                .collect::<TableResult<Row>>()?;
            table.push_row(row)?;
        }

        Ok(table)
    }

    fn from_columnar(obj: &Map<String, JsonValue>) -> TableResult<Table> {
        let columns: Vec<String> = obj
            .get("columns")
            .and_then(JsonValue::as_array)
            .ok_or_else(|| TableError::Malformed("missing 'columns' array".to_string()))?
            .iter()
            .map(|c| {
                c.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| TableError::Malformed("column names must be strings".to_string()))
            })
            .collect::<TableResult<_>>()?;

        let types: Vec<ColumnType> = match obj.get("types") {
            None | Some(JsonValue::Null) => vec![ColumnType::Unknown; columns.len()],
            Some(JsonValue::Array(types)) => types
                .iter()
                .map(|t| match t.as_str() {
                    Some(s) => ColumnType::from_abbreviation(s),
                    None => Err(TableError::Malformed("column types must be strings".to_string())),
                })
                .collect::<TableResult<_>>()?,
            Some(_) => return Err(TableError::Malformed("'types' must be an array".to_string())),
        };

        if types.len() != columns.len() {
            return Err(TableError::Malformed(format!(
                "{} types given for {} columns",
                types.len(),
                columns.len()
            )));
        }

        let rows = match obj.get("rows") {
            None => &[][..],
            Some(JsonValue::Array(rows)) => rows.as_slice(),
            Some(_) => return Err(TableError::Malformed("'rows' must be an array".to_string())),
        };

        let mut table = Table::new(columns.clone())?;
        for (i, row) in rows.iter().enumerate() {
            let cells = row
                .as_array()
                .ok_or_else(|| TableError::Malformed(format!("row {} is not an array", i)))?;
            if cells.len() != columns.len() {
                return Err(TableError::WidthMismatch {
                    row: i,
                    expected: columns.len(),
                    actual: cells.len(),
                });
            }

            let row = cells
                .iter()
                .zip(columns.iter().zip(&types))
                .map(|(cell, (column, ty))| typed_value(column, *ty, cell))
                .collect::<TableResult<Row>>()?;
            table.push_row(row)?;
        }

        Ok(table)
    }

    /// Converts a table to its columnar JSON form
    pub fn to_json(table: &Table) -> JsonValue {
        let column_types: Vec<ColumnType> =
            (0..table.num_columns()).map(|i| table.column_type(i)).collect();
        let types: Vec<&str> = column_types.iter().map(ColumnType::abbreviation).collect();
        let rows: Vec<JsonValue> = table
            .rows()
            .iter()
            .map(|r| {
                JsonValue::Array(
                    r.iter()
                        .zip(&column_types)
                        .map(|(value, ty)| cell_json(value, *ty))
                        .collect(),
                )
            })
            .collect();

        json!({
            "columns": table.columns(),
            "types": types,
            "rows": rows,
        })
    }

    /// Writes a table to a JSON file
    pub fn save(table: &Table, path: &Path) -> TableResult<()> {
        let content = serde_json::to_string_pretty(&Self::to_json(table))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Writes one cell; dates in mixed columns are wrapped
fn cell_json(value: &Value, ty: ColumnType) -> JsonValue {
    match (value, ty) {
        (Value::Date(_), ColumnType::Mixed) => json!({ DATE_CELL_KEY: value.to_json() }),
        _ => value.to_json(),
    }
}

/// Converts a JSON cell according to a declared column type
fn typed_value(column: &str, ty: ColumnType, cell: &JsonValue) -> TableResult<Value> {
    if cell.is_null() {
        return Ok(Value::Null);
    }

    let mismatch = || TableError::UnsupportedValue {
        column: column.to_string(),
        found: format!("{} in {} column", cell, ty.abbreviation()),
    };

    if let (ColumnType::Mixed | ColumnType::Unknown, JsonValue::Object(obj)) = (ty, cell) {
        return match (obj.len(), obj.get(DATE_CELL_KEY)) {
            (1, Some(JsonValue::String(s))) => parse_date(column, s),
            _ => Err(mismatch()),
        };
    }

    match ty {
        ColumnType::Logical => cell.as_bool().map(Value::Bool).ok_or_else(mismatch),
        ColumnType::Integer => cell.as_i64().map(Value::Int).ok_or_else(mismatch),
        ColumnType::Double => cell.as_f64().map(Value::Float).ok_or_else(mismatch),
        ColumnType::Character => cell
            .as_str()
            .map(|s| Value::Str(s.to_string()))
            .ok_or_else(mismatch),
        ColumnType::Date => {
            let s = cell.as_str().ok_or_else(mismatch)?;
            parse_date(column, s)
        }
        ColumnType::Mixed | ColumnType::Unknown => Value::from_json(column, cell),
    }
}

fn parse_date(column: &str, s: &str) -> TableResult<Value> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map(Value::Date)
        .map_err(|_| TableError::InvalidDate {
            column: column.to_string(),
            value: s.to_string(),
        })
}

fn json_kind(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[test]
    fn test_records_form_keeps_column_order() {
        let t = TableLoader::parse(r#"[{"zeta": 1, "alpha": "a"}, {"alpha": "b", "zeta": 2}]"#)
            .unwrap();
        assert_eq!(t.columns(), &["zeta".to_string(), "alpha".to_string()]);
        assert_eq!(t.rows(), &[row![1, "a"], row![2, "b"]]);
    }

    #[test]
    fn test_records_must_share_columns() {
        let err = TableLoader::parse(r#"[{"a": 1}, {"b": 2}]"#).unwrap_err();
        assert!(matches!(err, TableError::Malformed(_)));

        let err = TableLoader::parse(r#"[{"a": 1}, {"a": 2, "b": 3}]"#).unwrap_err();
        assert!(matches!(err, TableError::Malformed(_)));
    }

    #[test]
    fn test_columnar_with_types() {
        let t = TableLoader::parse(
            r#"{"columns": ["day", "n", "rate"], "types": ["date", "int", "dbl"],
                "rows": [["2013-01-01", 3, 1], ["2013-01-02", null, 2.5]]}"#,
        )
        .unwrap();
        let day = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        assert_eq!(t.rows()[0], row![day, 3, 1.0]);
        assert_eq!(t.rows()[1][1], Value::Null);
        assert_eq!(t.column_type(0), ColumnType::Date);
    }

    #[test]
    fn test_columnar_rejects_type_mismatch() {
        let err = TableLoader::parse(r#"{"columns": ["n"], "types": ["int"], "rows": [["x"]]}"#)
            .unwrap_err();
        assert!(matches!(err, TableError::UnsupportedValue { .. }));
    }

    #[test]
    fn test_columnar_rejects_bad_date() {
        let err = TableLoader::parse(
            r#"{"columns": ["d"], "types": ["date"], "rows": [["01/02/2013"]]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::InvalidDate { .. }));
    }

    #[test]
    fn test_columnar_width_mismatch() {
        let err = TableLoader::parse(r#"{"columns": ["a", "b"], "rows": [[1]]}"#).unwrap_err();
        assert!(matches!(err, TableError::WidthMismatch { row: 0, .. }));
    }

    #[test]
    fn test_to_json_writes_types() {
        let t = Table::from_rows(["k", "v"], vec![row![1, "a"]]).unwrap();
        let json = TableLoader::to_json(&t);
        assert_eq!(json["types"], json!(["int", "chr"]));
        assert_eq!(json["rows"], json!([[1, "a"]]));
    }

    #[test]
    fn test_mixed_column_wraps_dates() {
        let day = NaiveDate::from_ymd_opt(2013, 1, 1).unwrap();
        let t = Table::from_rows(["c"], vec![row![day], row!["2013-01-01"]]).unwrap();
        let json = TableLoader::to_json(&t);
        assert_eq!(json["types"], json!(["mixed"]));
        assert_eq!(json["rows"], json!([[{"date": "2013-01-01"}], ["2013-01-01"]]));
    }

    #[test]
    fn test_mixed_column_rejects_other_objects() {
        let err = TableLoader::parse(
            r#"{"columns": ["c"], "types": ["mixed"], "rows": [[{"when": "2013-01-01"}]]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::UnsupportedValue { .. }));

        let err = TableLoader::parse(
            r#"{"columns": ["c"], "types": ["mixed"], "rows": [[{"date": "Jan 1"}]]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TableError::InvalidDate { .. }));
    }

    #[test]
    fn test_scalar_is_malformed() {
        assert!(matches!(
            TableLoader::parse("42").unwrap_err(),
            TableError::Malformed(_)
        ));
    }
}
