use std::collections::BTreeMap;

use appsight_core::{AppError, AppResult};

use crate::pipeline_ports::{SinkHandle, SourceHandle, SourceTable};

/// Default number of owners kept in the owner roll-up.
pub const DEFAULT_OWNER_TOP_N: usize = 30;

/// Default number of applications kept in the usage ranking.
pub const DEFAULT_USAGE_RANKING_TOP_N: usize = 50;

/// Which classified rows the roll-ups aggregate over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollupScope {
    /// Every classified application.
    #[default]
    All,
    /// Only high-adoption applications.
    HighAdoption,
}

impl RollupScope {
    /// Returns the stable configuration value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::HighAdoption => "high_adoption",
        }
    }

    /// Parses a configuration value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim() {
            "all" => Ok(Self::All),
            "high_adoption" => Ok(Self::HighAdoption),
            other => Err(AppError::Validation(format!(
                "unknown rollup scope '{other}', expected 'all' or 'high_adoption'"
            ))),
        }
    }
}

/// Explicit configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Input location per logical table.
    pub sources: BTreeMap<SourceTable, SourceHandle>,
    /// Output destination.
    pub destination: SinkHandle,
    /// Owners kept in the owner roll-up.
    pub owner_top_n: usize,
    /// Applications kept in the usage ranking.
    pub usage_ranking_top_n: usize,
    /// Rows the roll-ups aggregate over.
    pub rollup_scope: RollupScope,
}

impl PipelineConfig {
    /// Creates a configuration with defaults and no sources.
    #[must_use]
    pub fn new(destination: SinkHandle) -> Self {
        Self {
            sources: BTreeMap::new(),
            destination,
            owner_top_n: DEFAULT_OWNER_TOP_N,
            usage_ranking_top_n: DEFAULT_USAGE_RANKING_TOP_N,
            rollup_scope: RollupScope::default(),
        }
    }

    /// Maps one logical table to its source.
    #[must_use]
    pub fn with_source(mut self, table: SourceTable, handle: SourceHandle) -> Self {
        self.sources.insert(table, handle);
        self
    }

    /// Returns the source mapped to `table`.
    pub fn source(&self, table: SourceTable) -> AppResult<&SourceHandle> {
        self.sources
            .get(&table)
            .ok_or_else(|| AppError::MissingTable(table.as_str().to_owned()))
    }

    /// Checks that every input is mapped and limits are usable.
    pub fn validate(&self) -> AppResult<()> {
        for table in SourceTable::ALL {
            self.source(table)?;
        }

        if self.owner_top_n == 0 {
            return Err(AppError::Validation(
                "owner_top_n must be greater than zero".to_owned(),
            ));
        }

        if self.usage_ranking_top_n == 0 {
            return Err(AppError::Validation(
                "usage_ranking_top_n must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use appsight_core::AppError;

    use super::{PipelineConfig, RollupScope};
    use crate::pipeline_ports::{SinkHandle, SourceHandle, SourceTable};

    fn handle(location: &str) -> SourceHandle {
        SourceHandle::new(location).unwrap_or_else(|_| unreachable!())
    }

    fn destination() -> SinkHandle {
        SinkHandle::new("out").unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn unmapped_table_is_reported_by_name() {
        let config = PipelineConfig::new(destination())
            .with_source(SourceTable::Applications, handle("apps.json"));

        match config.validate() {
            Err(AppError::MissingTable(table)) => assert_eq!(table, "environments"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let mut config = SourceTable::ALL
            .into_iter()
            .fold(PipelineConfig::new(destination()), |config, table| {
                config.with_source(table, handle(table.as_str()))
            });
        assert!(config.validate().is_ok());

        config.owner_top_n = 0;
        assert!(config.validate().is_err());

        config.owner_top_n = 1;
        config.usage_ranking_top_n = 0;
        match config.validate() {
            Err(AppError::Validation(message)) => {
                assert!(message.contains("usage_ranking_top_n"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rollup_scope_parses_known_values() {
        assert_eq!(RollupScope::parse("all").ok(), Some(RollupScope::All));
        assert_eq!(
            RollupScope::parse(" high_adoption ").ok(),
            Some(RollupScope::HighAdoption)
        );
        assert!(RollupScope::parse("everything").is_err());
    }
}
