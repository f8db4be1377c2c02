use std::fmt::{Display, Formatter};

use async_trait::async_trait;
use appsight_core::{AppResult, NonEmptyString};
use appsight_domain::{OutputTable, RawTable};

/// Logical input tables consumed by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceTable {
    /// Application export.
    Applications,
    /// Environment export.
    Environments,
    /// Audit log export.
    AuditEvents,
    /// User directory export.
    DirectoryUsers,
}

impl SourceTable {
    /// Every logical input table.
    pub const ALL: [Self; 4] = [
        Self::Applications,
        Self::Environments,
        Self::AuditEvents,
        Self::DirectoryUsers,
    ];

    /// Returns the stable logical name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applications => "applications",
            Self::Environments => "environments",
            Self::AuditEvents => "audit_events",
            Self::DirectoryUsers => "directory_users",
        }
    }
}

impl Display for SourceTable {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Adapter-specific location of one input table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceHandle(NonEmptyString);

impl SourceHandle {
    /// Creates a validated handle.
    pub fn new(location: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(location).map(Self)
    }

    /// Returns the location text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Adapter-specific destination for output tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SinkHandle(NonEmptyString);

impl SinkHandle {
    /// Creates a validated handle.
    pub fn new(location: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(location).map(Self)
    }

    /// Returns the location text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Port supplying raw input tables.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Loads the table stored at `handle`.
    ///
    /// Returns `Ok(None)` when nothing exists at the handle; the pipeline
    /// turns that into [`appsight_core::AppError::MissingTable`].
    async fn load_table(
        &self,
        table: SourceTable,
        handle: &SourceHandle,
    ) -> AppResult<Option<RawTable>>;
}

/// Port receiving output tables.
#[async_trait]
pub trait TableSink: Send + Sync {
    /// Writes one table under `destination`, replacing any previous copy.
    async fn write_table(&self, destination: &SinkHandle, table: &OutputTable) -> AppResult<()>;
}
