use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use appsight_application::{SinkHandle, SourceHandle, SourceTable, TableSink, TableSource};
use appsight_core::{AppError, AppResult};
use appsight_domain::{OutputTable, RawRecord, RawTable};
use serde_json::{Map, Value};
use tracing::debug;

/// Table store backed by JSON files on the local filesystem.
///
/// Inputs are either an array of row objects or an object carrying an
/// explicit `columns` header next to its `rows`; the second form keeps the
/// header of an empty table. A bare `[]` has no rows to take a header from,
/// so it loads with no columns and fails the required-column check; empty
/// exports must use the object form. Outputs are written to
/// `<destination>/<table>.json` as an array of row objects.
#[derive(Debug, Clone)]
pub struct JsonFileTableStore {
    base_dir: PathBuf,
}

impl JsonFileTableStore {
    /// Creates a store resolving relative handles against `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    fn parse_table(table: SourceTable, path: &Path, document: Value) -> AppResult<RawTable> {
        let (declared_columns, rows) = match document {
            Value::Array(rows) => (Vec::new(), rows),
            Value::Object(mut object) => {
                let columns = match object.remove("columns") {
                    Some(Value::Array(columns)) => columns
                        .into_iter()
                        .map(|column| match column {
                            Value::String(column) => Ok(column),
                            other => Err(AppError::Validation(format!(
                                "column names in '{}' must be strings, found {other}",
                                path.display()
                            ))),
                        })
                        .collect::<AppResult<Vec<String>>>()?,
                    Some(_) => {
                        return Err(AppError::Validation(format!(
                            "'columns' in '{}' must be an array",
                            path.display()
                        )));
                    }
                    None => Vec::new(),
                };
                let rows = match object.remove("rows") {
                    Some(Value::Array(rows)) => rows,
                    None => Vec::new(),
                    Some(_) => {
                        return Err(AppError::Validation(format!(
                            "'rows' in '{}' must be an array",
                            path.display()
                        )));
                    }
                };
                (columns, rows)
            }
            _ => {
                return Err(AppError::Validation(format!(
                    "table file '{}' must hold an array or an object with rows",
                    path.display()
                )));
            }
        };

        let mut columns = declared_columns;
        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let Value::Object(cells) = row else {
                return Err(AppError::Validation(format!(
                    "row {index} of '{}' is not an object",
                    path.display()
                )));
            };

            records.push(Self::parse_record(cells, &mut columns));
        }

        Ok(RawTable::with_rows(table.as_str(), columns, records))
    }

    fn parse_record(cells: Map<String, Value>, columns: &mut Vec<String>) -> RawRecord {
        let mut record = RawRecord::new();
        for (column, value) in cells {
            let column = column.trim().to_owned();
            if !columns.contains(&column) {
                columns.push(column.clone());
            }

            let text = match value {
                Value::Null => continue,
                Value::String(text) => text,
                Value::Bool(flag) => flag.to_string(),
                Value::Number(number) => number.to_string(),
                nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
            };
            record.set(column, text);
        }
        record
    }
}

#[async_trait]
impl TableSource for JsonFileTableStore {
    async fn load_table(
        &self,
        table: SourceTable,
        handle: &SourceHandle,
    ) -> AppResult<Option<RawTable>> {
        let path = self.resolve(handle.as_str());
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read table file '{}': {error}",
                    path.display()
                )));
            }
        };

        let document: Value = serde_json::from_slice(&bytes).map_err(|error| {
            AppError::Validation(format!(
                "table file '{}' is not valid JSON: {error}",
                path.display()
            ))
        })?;

        let parsed = Self::parse_table(table, &path, document)?;
        debug!(
            table = %table,
            path = %path.display(),
            rows = parsed.len(),
            "table file parsed"
        );
        Ok(Some(parsed))
    }
}

#[async_trait]
impl TableSink for JsonFileTableStore {
    async fn write_table(&self, destination: &SinkHandle, table: &OutputTable) -> AppResult<()> {
        let directory = self.resolve(destination.as_str());
        tokio::fs::create_dir_all(&directory).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to create output directory '{}': {error}",
                directory.display()
            ))
        })?;

        let encoded = serde_json::to_vec_pretty(&table.to_json_records()).map_err(|error| {
            AppError::Internal(format!(
                "failed to encode output table '{}': {error}",
                table.name()
            ))
        })?;

        let path = directory.join(format!("{}.json", table.name()));
        let staging = directory.join(format!(".{}.json.tmp", table.name()));
        tokio::fs::write(&staging, encoded).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to write output table '{}': {error}",
                staging.display()
            ))
        })?;
        tokio::fs::rename(&staging, &path).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to replace output table '{}': {error}",
                path.display()
            ))
        })?;

        debug!(table = table.name(), path = %path.display(), "table file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
