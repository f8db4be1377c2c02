use std::collections::HashMap;

use async_trait::async_trait;
use appsight_application::{SinkHandle, SourceHandle, SourceTable, TableSink, TableSource};
use appsight_core::AppResult;
use appsight_domain::{OutputTable, RawTable};
use tokio::sync::RwLock;

/// In-memory table store usable as both source and sink.
#[derive(Debug, Default)]
pub struct InMemoryTableStore {
    sources: RwLock<HashMap<String, RawTable>>,
    written: RwLock<HashMap<(String, String), OutputTable>>,
}

impl InMemoryTableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: RwLock::new(HashMap::new()),
            written: RwLock::new(HashMap::new()),
        }
    }

    /// Stores `table` so it loads from `location`.
    pub async fn insert_source(&self, location: impl Into<String>, table: RawTable) {
        self.sources.write().await.insert(location.into(), table);
    }

    /// Returns the table last written as `name` under `destination`.
    pub async fn written_table(&self, destination: &str, name: &str) -> Option<OutputTable> {
        self.written
            .read()
            .await
            .get(&(destination.to_owned(), name.to_owned()))
            .cloned()
    }

    /// Returns the names written under `destination`, sorted.
    pub async fn written_names(&self, destination: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .written
            .read()
            .await
            .keys()
            .filter_map(|(stored_destination, name)| {
                (stored_destination == destination).then(|| name.clone())
            })
            .collect();
        names.sort();
        names
    }
}

#[async_trait]
impl TableSource for InMemoryTableStore {
    async fn load_table(
        &self,
        _table: SourceTable,
        handle: &SourceHandle,
    ) -> AppResult<Option<RawTable>> {
        Ok(self.sources.read().await.get(handle.as_str()).cloned())
    }
}

#[async_trait]
impl TableSink for InMemoryTableStore {
    async fn write_table(&self, destination: &SinkHandle, table: &OutputTable) -> AppResult<()> {
        self.written.write().await.insert(
            (destination.as_str().to_owned(), table.name().to_owned()),
            table.clone(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use appsight_application::{SinkHandle, SourceHandle, SourceTable, TableSink, TableSource};
    use appsight_domain::{CellValue, OutputTable, RawRecord, RawTable};

    use super::InMemoryTableStore;

    #[tokio::test]
    async fn unknown_source_loads_as_none() {
        let store = InMemoryTableStore::new();
        let handle = SourceHandle::new("missing").unwrap_or_else(|_| unreachable!());

        let loaded = store.load_table(SourceTable::Applications, &handle).await;
        assert!(loaded.is_ok());
        assert!(loaded.unwrap_or_default().is_none());
    }

    #[tokio::test]
    async fn inserted_source_round_trips() {
        let store = InMemoryTableStore::new();
        let table = RawTable::with_rows(
            "environments",
            vec!["admin_environmentid".to_owned()],
            vec![RawRecord::from_pairs([("admin_environmentid", "ENV1")])],
        );
        store.insert_source("environments", table.clone()).await;

        let handle = SourceHandle::new("environments").unwrap_or_else(|_| unreachable!());
        let loaded = store.load_table(SourceTable::Environments, &handle).await;
        assert!(loaded.is_ok());
        assert_eq!(loaded.unwrap_or_default(), Some(table));
    }

    #[tokio::test]
    async fn rewriting_a_table_replaces_it() {
        let store = InMemoryTableStore::new();
        let destination = SinkHandle::new("out").unwrap_or_else(|_| unreachable!());

        let mut first = OutputTable::new("usage_ranking", &["App ID"]);
        first.push_row(vec![CellValue::from("a1")]);
        assert!(store.write_table(&destination, &first).await.is_ok());

        let second = OutputTable::new("usage_ranking", &["App ID"]);
        assert!(store.write_table(&destination, &second).await.is_ok());

        assert_eq!(store.written_names("out").await, vec!["usage_ranking".to_owned()]);
        assert_eq!(
            store.written_table("out", "usage_ranking").await,
            Some(second)
        );
        assert!(store.written_table("elsewhere", "usage_ranking").await.is_none());
    }
}
