use std::collections::BTreeMap;

use appsight_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One untyped source row: column name to cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    cells: BTreeMap<String, String>,
}

impl RawRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(column, value)` pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (column, value) in pairs {
            record.set(column, value);
        }

        record
    }

    /// Sets one cell. Column names are trimmed.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        self.cells.insert(column.trim().to_owned(), value.into());
    }

    /// Returns the cell text, treating blank cells as absent.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Returns the column names present on this row.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }
}

/// A named table of untyped rows as supplied by ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<RawRecord>,
}

impl RawTable {
    /// Creates a table with the declared header. Header names are trimmed.
    #[must_use]
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns: columns
                .into_iter()
                .map(|column| column.trim().to_owned())
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table from header and rows; cells outside the header are kept.
    #[must_use]
    pub fn with_rows(name: impl Into<String>, columns: Vec<String>, rows: Vec<RawRecord>) -> Self {
        let mut table = Self::new(name, columns);
        table.rows = rows;
        table
    }

    /// Appends one row.
    pub fn push(&mut self, row: RawRecord) {
        self.rows.push(row);
    }

    /// Returns the logical table name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the declared header.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns whether the header declares `column`.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|declared| declared == column)
    }

    /// Fails with [`AppError::MissingColumn`] on the first absent column.
    pub fn require_columns(&self, columns: &[&str]) -> AppResult<()> {
        match columns.iter().find(|column| !self.has_column(column)) {
            Some(column) => Err(AppError::missing_column(self.name.as_str(), *column)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use appsight_core::AppError;

    use super::{RawRecord, RawTable};

    #[test]
    fn blank_cells_read_as_absent() {
        let record = RawRecord::from_pairs([("name", "  "), ("id", "a1")]);
        assert_eq!(record.get("name"), None);
        assert_eq!(record.get("id"), Some("a1"));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn header_names_are_trimmed() {
        let table = RawTable::new("environments", vec![" admin_environmentid ".to_owned()]);
        assert!(table.has_column("admin_environmentid"));
    }

    #[test]
    fn require_columns_names_first_missing_column() {
        let table = RawTable::new("audit_events", vec!["App ID".to_owned()]);
        let result = table.require_columns(&["App ID", "User UPN"]);

        match result {
            Err(AppError::MissingColumn { table, column }) => {
                assert_eq!(table, "audit_events");
                assert_eq!(column, "User UPN");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
