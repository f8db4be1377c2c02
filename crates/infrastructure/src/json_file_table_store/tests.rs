use appsight_application::{SinkHandle, SourceHandle, SourceTable, TableSink, TableSource};
use appsight_core::AppError;
use appsight_domain::{CellValue, OutputTable, RawTable};
use serde_json::{Value, json};

use super::JsonFileTableStore;

fn source(location: &str) -> SourceHandle {
    SourceHandle::new(location).unwrap_or_else(|_| unreachable!())
}

async fn load(store: &JsonFileTableStore, location: &str) -> Option<RawTable> {
    let loaded = store.load_table(SourceTable::Applications, &source(location)).await;
    assert!(loaded.is_ok());
    loaded.unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn missing_file_loads_as_none() {
    let directory = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let store = JsonFileTableStore::new(directory.path());

    assert!(load(&store, "applications.json").await.is_none());
}

#[tokio::test]
async fn array_of_rows_becomes_text_cells() {
    let directory = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let document = json!([
        {
            "admin_appid": "a1",
            " admin_appsharedusers ": 12,
            "admin_appsharedwithtenant": true,
            "admin_appdeleted": null
        },
        { "admin_appid": "a2", "admin_apptype": "597910003" }
    ]);
    let write = std::fs::write(
        directory.path().join("applications.json"),
        document.to_string(),
    );
    assert!(write.is_ok());

    let store = JsonFileTableStore::new(directory.path());
    let table = load(&store, "applications.json")
        .await
        .unwrap_or_else(|| unreachable!());

    assert_eq!(table.name(), "applications");
    assert_eq!(table.len(), 2);
    assert!(table.has_column("admin_appsharedusers"));
    assert!(table.has_column("admin_appdeleted"));
    assert!(table.has_column("admin_apptype"));

    let first = &table.rows()[0];
    assert_eq!(first.get("admin_appsharedusers"), Some("12"));
    assert_eq!(first.get("admin_appsharedwithtenant"), Some("true"));
    assert_eq!(first.get("admin_appdeleted"), None);
    assert_eq!(table.rows()[1].get("admin_apptype"), Some("597910003"));
}

#[tokio::test]
async fn explicit_header_survives_empty_table() {
    let directory = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let document = json!({ "columns": ["App ID", "User UPN"], "rows": [] });
    let write = std::fs::write(directory.path().join("audit.json"), document.to_string());
    assert!(write.is_ok());

    let store = JsonFileTableStore::new(directory.path());
    let table = load(&store, "audit.json")
        .await
        .unwrap_or_else(|| unreachable!());

    assert!(table.is_empty());
    assert!(table.require_columns(&["App ID", "User UPN"]).is_ok());
}

#[tokio::test]
async fn malformed_document_is_rejected() {
    let directory = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let write = std::fs::write(directory.path().join("broken.json"), "[1, 2]");
    assert!(write.is_ok());

    let store = JsonFileTableStore::new(directory.path());
    let loaded = store
        .load_table(SourceTable::Environments, &source("broken.json"))
        .await;

    assert!(matches!(loaded, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn written_table_replaces_previous_file() {
    let directory = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let store = JsonFileTableStore::new(directory.path());
    let destination = SinkHandle::new("enriched").unwrap_or_else(|_| unreachable!());

    let mut first = OutputTable::new("owner_rollup", &["Owner Name", "total_apps"]);
    first.push_row(vec![CellValue::from("Ana"), CellValue::from(2_i64)]);
    first.push_row(vec![CellValue::from("Bo"), CellValue::from(1_i64)]);
    assert!(store.write_table(&destination, &first).await.is_ok());

    let mut second = OutputTable::new("owner_rollup", &["Owner Name", "total_apps"]);
    second.push_row(vec![CellValue::from("Ana"), CellValue::from(3_i64)]);
    assert!(store.write_table(&destination, &second).await.is_ok());

    let contents = std::fs::read_to_string(directory.path().join("enriched/owner_rollup.json"));
    assert!(contents.is_ok());
    let document: Value =
        serde_json::from_str(&contents.unwrap_or_default()).unwrap_or_else(|_| unreachable!());

    assert_eq!(document, json!([{ "Owner Name": "Ana", "total_apps": 3 }]));
    assert!(!directory.path().join("enriched/.owner_rollup.json.tmp").exists());
}

#[tokio::test]
async fn bare_empty_array_loads_without_header() {
    let directory = tempfile::tempdir().unwrap_or_else(|_| unreachable!());
    let write = std::fs::write(directory.path().join("audit.json"), "[]");
    assert!(write.is_ok());

    let store = JsonFileTableStore::new(directory.path());
    let table = load(&store, "audit.json")
        .await
        .unwrap_or_else(|| unreachable!());

    assert!(table.is_empty());
    assert!(table.columns().is_empty());
    assert!(matches!(
        table.require_columns(&["App ID", "User UPN"]),
        Err(AppError::MissingColumn { .. })
    ));
}
