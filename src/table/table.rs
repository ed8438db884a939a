//! In-memory tables
//!
//! A table is an ordered list of unique column names plus an ordered
//! sequence of rows. Every row holds exactly one value per column.

use std::collections::HashSet;

use super::errors::{TableError, TableResult};
use super::value::{Value, ValueKey};

/// One record, positionally aligned with the table's columns
pub type Row = Vec<Value>;

/// Column type derived from the non-missing values of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Logical,
    Integer,
    Double,
    Character,
    Date,
    /// Values of more than one type
    Mixed,
    /// Empty column or only missing values
    Unknown,
}

impl ColumnType {
    /// Abbreviation as shown in tibble headers and written to JSON
    pub fn abbreviation(&self) -> &'static str {
        match self {
            ColumnType::Logical => "lgl",
            ColumnType::Integer => "int",
            ColumnType::Double => "dbl",
            ColumnType::Character => "chr",
            ColumnType::Date => "date",
            ColumnType::Mixed => "mixed",
            ColumnType::Unknown => "unknown",
        }
    }

    /// Parses an abbreviation
    pub fn from_abbreviation(s: &str) -> TableResult<Self> {
        match s {
            "lgl" => Ok(ColumnType::Logical),
            "int" => Ok(ColumnType::Integer),
            "dbl" => Ok(ColumnType::Double),
            "chr" => Ok(ColumnType::Character),
            "date" => Ok(ColumnType::Date),
            "mixed" => Ok(ColumnType::Mixed),
            "unknown" => Ok(ColumnType::Unknown),
            other => Err(TableError::UnknownType(other.to_string())),
        }
    }

    /// Whether cells of this type are right-aligned when printed
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Double)
    }

    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ColumnType::Logical),
            Value::Int(_) => Some(ColumnType::Integer),
            // NaN is missing but still only occurs in double columns
            Value::Float(_) => Some(ColumnType::Double),
            Value::Str(_) => Some(ColumnType::Character),
            Value::Date(_) => Some(ColumnType::Date),
        }
    }
}

/// An ordered collection of rows sharing one column set
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given columns.
    ///
    /// Column names must be non-empty and unique.
    pub fn new<I, S>(columns: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::with_capacity(columns.len());
        for name in &columns {
            if name.is_empty() {
                return Err(TableError::EmptyColumnName);
            }
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Creates a table from columns and rows, checking every row's width
    pub fn from_rows<I, S>(columns: I, rows: Vec<Row>) -> TableResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new(columns)?;
        table.rows.reserve(rows.len());
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Builds a table whose invariants the caller already guarantees
    pub(crate) fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    /// Appends a row
    pub fn push_row(&mut self, row: Row) -> TableResult<()> {
        if row.len() != self.columns.len() {
            return Err(TableError::WidthMismatch {
                row: self.rows.len(),
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, if present
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Position of a column, or `UnknownColumn`
    pub fn require_column(&self, name: &str) -> TableResult<usize> {
        self.column_index(name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Derives the type of the column at `index`
    pub fn column_type(&self, index: usize) -> ColumnType {
        let mut found: Option<ColumnType> = None;
        for row in &self.rows {
            let Some(ty) = ColumnType::of(&row[index]) else {
                continue;
            };
            match found {
                None => found = Some(ty),
                Some(existing) if existing != ty => return ColumnType::Mixed,
                Some(_) => {}
            }
        }
        found.unwrap_or(ColumnType::Unknown)
    }

    /// Projects the table onto the named columns, in the given order
    pub fn select(&self, names: &[&str]) -> TableResult<Table> {
        let indices = names
            .iter()
            .map(|n| self.require_column(n))
            .collect::<TableResult<Vec<_>>>()?;

        let mut out = Table::new(names.iter().copied())?;
        out.rows = self
            .rows
            .iter()
            .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
            .collect();
        Ok(out)
    }

    /// Distinct rows, keeping the first occurrence of each
    pub fn distinct(&self) -> Table {
        let mut seen = HashSet::with_capacity(self.rows.len());
        let rows = self
            .rows
            .iter()
            .filter(|r| seen.insert(row_identity(r)))
            .cloned()
            .collect();
        Table::from_parts(self.columns.clone(), rows)
    }
}

/// Hashable identity of a whole row
pub fn row_identity(row: &[Value]) -> Vec<ValueKey> {
    row.iter().map(Value::identity).collect()
}
