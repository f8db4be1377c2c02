//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_table_store;
mod json_file_table_store;

pub use in_memory_table_store::InMemoryTableStore;
pub use json_file_table_store::JsonFileTableStore;
