use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::coercion::Timestamp;

/// One typed cell of an exported table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Free text.
    Text(String),
    /// Integer count.
    Integer(i64),
    /// Floating-point measure.
    Float(f64),
    /// Flag.
    Boolean(bool),
    /// Coerced timestamp; unknown values export as null.
    Timestamp(Timestamp),
    /// Absent value.
    Null,
}

impl CellValue {
    /// Text cell, or null when absent.
    #[must_use]
    pub fn optional_text(value: Option<&str>) -> Self {
        value.map_or(Self::Null, |text| Self::Text(text.to_owned()))
    }

    /// Converts the cell to JSON.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Integer(value) => Value::Number((*value).into()),
            Self::Float(value) => Number::from_f64(*value).map_or(Value::Null, Value::Number),
            Self::Boolean(flag) => Value::Bool(*flag),
            Self::Timestamp(timestamp) => timestamp.to_rfc3339().map_or(Value::Null, Value::String),
            Self::Null => Value::Null,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Timestamp> for CellValue {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A named exported table with a fixed header and typed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl OutputTable {
    /// Creates an empty table with the given header.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|column| (*column).to_owned()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row; cells beyond the header are dropped, missing cells are null.
    pub fn push_row(&mut self, mut cells: Vec<CellValue>) {
        cells.resize(self.columns.len(), CellValue::Null);
        self.rows.push(cells);
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the header.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows in header order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Returns the row count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell under `column` in row `index`.
    #[must_use]
    pub fn cell(&self, index: usize, column: &str) -> Option<&CellValue> {
        let position = self.columns.iter().position(|name| name == column)?;
        self.rows.get(index)?.get(position)
    }

    /// Renders rows as JSON objects keyed by column name.
    #[must_use]
    pub fn to_json_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .columns
                    .iter()
                    .zip(row)
                    .map(|(column, cell)| (column.clone(), cell.to_json()))
                    .collect();
                Value::Object(object)
            })
            .collect()
    }
}
