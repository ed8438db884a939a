//! Scalar cell values
//!
//! Values are compared exactly. There is no type coercion:
//! `Int(1)`, `Float(1.0)` and `Str("1")` are three different values.

use std::fmt;

use chrono::NaiveDate;
use serde_json::Value as JsonValue;

use super::errors::{TableError, TableResult};

/// Date format used for parsing and printing `Date` values
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit missing marker (printed as `NA`)
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
}

impl Value {
    /// Returns true for `Null` and for floating point NaN
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Short type label used in tibble headers
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "lgl",
            Value::Int(_) => "int",
            Value::Float(_) => "dbl",
            Value::Str(_) => "chr",
            Value::Date(_) => "date",
        }
    }

    /// Hashable identity of this value.
    ///
    /// Two values have the same identity exactly when they are equal under
    /// row-identity semantics: same variant, same payload, `-0.0 == 0.0`,
    /// and missing values equal to missing values of the same kind.
    pub fn identity(&self) -> ValueKey {
        match self {
            Value::Null => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Int(i) => ValueKey::Int(*i),
            Value::Float(f) if f.is_nan() => ValueKey::NaN,
            Value::Float(f) if *f == 0.0 => ValueKey::Float(0f64.to_bits()),
            Value::Float(f) => ValueKey::Float(f.to_bits()),
            Value::Str(s) => ValueKey::Str(s.clone()),
            Value::Date(d) => ValueKey::Date(*d),
        }
    }

    /// Converts a JSON scalar into a value.
    ///
    /// Integers become `Int`, other numbers `Float`. Arrays and objects are
    /// rejected.
    pub fn from_json(column: &str, json: &JsonValue) -> TableResult<Self> {
        match json {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => n.as_f64().map(Value::Float).ok_or_else(|| {
                    TableError::UnsupportedValue {
                        column: column.to_string(),
                        found: n.to_string(),
                    }
                }),
            },
            JsonValue::String(s) => Ok(Value::Str(s.clone())),
            JsonValue::Array(_) | JsonValue::Object(_) => Err(TableError::UnsupportedValue {
                column: column.to_string(),
                found: json.to_string(),
            }),
        }
    }

    /// Converts this value to JSON. NaN has no JSON form and becomes `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Str(s) => JsonValue::String(s.clone()),
            Value::Date(d) => JsonValue::String(d.format(DATE_FORMAT).to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NA"),
            Value::Bool(true) => write!(f, "TRUE"),
            Value::Bool(false) => write!(f, "FALSE"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_nan() => write!(f, "NaN"),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Hashable identity of a [`Value`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    NaN,
    Bool(bool),
    Int(i64),
    /// Canonical bit pattern of a non-NaN float
    Float(u64),
    Str(String),
    Date(NaiveDate),
}

/// Builds a row of [`Value`]s from heterogeneous literals.
///
/// ```ignore
/// let row = row![1, "x1", None::<i64>];
/// ```
#[macro_export]
macro_rules! row {
    () => { Vec::<$crate::table::Value>::new() };
    ($($v:expr),+ $(,)?) => {
        vec![$($crate::table::Value::from($v)),+]
    };
}
