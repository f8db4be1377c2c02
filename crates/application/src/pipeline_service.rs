use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use appsight_core::{AppError, AppResult, RunId};
use appsight_domain::columns;
use appsight_domain::identifier::{normalize_app_environment_id, normalize_key};
use appsight_domain::{
    ApplicationRecord, AuditEventRecord, CellValue, ClassifiedApplication, DirectoryUserRecord,
    EnrichedApplication, EnvironmentRecord, EnvironmentRollup, Excludable, ExecutiveKpis,
    FunnelRow, FunnelStage, JoinedApplication, OutputTable, OwnerRollup, RawTable,
    UsageMetric, UsageRankingEntry,
};
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::pipeline_config::{PipelineConfig, RollupScope};
use crate::pipeline_ports::{SourceTable, TableSink, TableSource};

mod classification;
mod coercion;
mod enrichment;
mod export;
mod intake;
mod metrics;
mod rollups;

/// Output table holding every classified application.
pub const ENRICHED_APPLICATIONS_TABLE: &str = "enriched_applications";
/// Output table holding high-adoption applications.
pub const HIGH_ADOPTION_TABLE: &str = "high_adoption_applications";
/// Output table holding the per-environment roll-up.
pub const ENVIRONMENT_ROLLUP_TABLE: &str = "environment_rollup";
/// Output table holding the per-owner roll-up.
pub const OWNER_ROLLUP_TABLE: &str = "owner_rollup";
/// Output table holding the usage ranking.
pub const USAGE_RANKING_TABLE: &str = "usage_ranking";
/// Output table holding the governance funnel.
pub const GOVERNANCE_FUNNEL_TABLE: &str = "governance_funnel";
/// Output table holding the executive indicators.
pub const EXECUTIVE_KPIS_TABLE: &str = "executive_kpis";

/// Stages whose row counts are reported for every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Application rows after deletion, type exclusion and id deduplication.
    ApplicationIntake,
    /// Audit events reduced to per-application metrics.
    UsageAggregation,
    /// Lookup joins against metrics, directory and environments.
    Enrichment,
    /// Exclusion rule reapplied after the joins.
    PostJoinExclusion,
    /// Text attributes converted to semantic types.
    Coercion,
    /// Business classification.
    Classification,
    /// High-adoption subset.
    HighAdoption,
    /// Per-environment roll-up.
    EnvironmentRollup,
    /// Per-owner roll-up.
    OwnerRollup,
    /// Usage ranking.
    UsageRanking,
}

impl PipelineStage {
    /// Returns the stable stage name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationIntake => "application_intake",
            Self::UsageAggregation => "usage_aggregation",
            Self::Enrichment => "enrichment",
            Self::PostJoinExclusion => "post_join_exclusion",
            Self::Coercion => "coercion",
            Self::Classification => "classification",
            Self::HighAdoption => "high_adoption",
            Self::EnvironmentRollup => "environment_rollup",
            Self::OwnerRollup => "owner_rollup",
            Self::UsageRanking => "usage_ranking",
        }
    }

    /// Stages that must hand on every row they receive.
    fn preserves_rows(&self) -> bool {
        matches!(self, Self::Enrichment | Self::Coercion)
    }
}

/// Rows entering and leaving one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    /// Stage.
    pub stage: PipelineStage,
    /// Rows received.
    pub rows_in: usize,
    /// Rows produced.
    pub rows_out: usize,
}

/// Summary of one written output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    /// Output table name.
    pub table: String,
    /// Rows written.
    pub rows: usize,
    /// Hex SHA-256 of the canonical table encoding.
    pub fingerprint: String,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Run identifier.
    pub run_id: RunId,
    /// Per-stage row counts in execution order.
    pub stages: Vec<StageReport>,
    /// Written tables in write order.
    pub outputs: Vec<OutputSummary>,
}

/// The four raw input tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTables {
    /// Application export.
    pub applications: RawTable,
    /// Environment export.
    pub environments: RawTable,
    /// Audit log export.
    pub audit_events: RawTable,
    /// User directory export.
    pub directory_users: RawTable,
}

/// Every derived table of one transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOutput {
    /// Every surviving application, classified.
    pub classified: Vec<ClassifiedApplication>,
    /// High-adoption subset of `classified`.
    pub high_adoption: Vec<ClassifiedApplication>,
    /// Per-environment roll-up.
    pub environment_rollup: Vec<EnvironmentRollup>,
    /// Per-owner roll-up.
    pub owner_rollup: Vec<OwnerRollup>,
    /// Usage ranking.
    pub usage_ranking: Vec<UsageRankingEntry>,
    /// Governance funnel.
    pub governance_funnel: Vec<FunnelRow>,
    /// Executive indicators.
    pub kpis: ExecutiveKpis,
    /// Per-stage row counts.
    pub stages: Vec<StageReport>,
}

/// Application service running the enrichment pipeline.
#[derive(Clone)]
pub struct PipelineService {
    source: Arc<dyn TableSource>,
    sink: Arc<dyn TableSink>,
}

impl PipelineService {
    /// Creates a service from source and sink implementations.
    #[must_use]
    pub fn new(source: Arc<dyn TableSource>, sink: Arc<dyn TableSink>) -> Self {
        Self { source, sink }
    }

    /// Loads every input, transforms it and writes all output tables.
    pub async fn run(&self, config: &PipelineConfig) -> AppResult<PipelineReport> {
        config.validate()?;
        let run_id = RunId::new();
        info!(
            run_id = %run_id,
            destination = %config.destination.as_str(),
            rollup_scope = config.rollup_scope.as_str(),
            "pipeline run started"
        );

        let inputs = self.load_inputs(config).await?;
        let output = Self::transform(&inputs, config)?;
        let tables = Self::export_tables(&output);

        let mut outputs = Vec::with_capacity(tables.len());
        for table in &tables {
            self.sink.write_table(&config.destination, table).await?;
            let summary = OutputSummary {
                table: table.name().to_owned(),
                rows: table.len(),
                fingerprint: Self::fingerprint(table)?,
            };
            info!(
                run_id = %run_id,
                table = %summary.table,
                rows = summary.rows,
                fingerprint = %summary.fingerprint,
                "output table written"
            );
            outputs.push(summary);
        }

        info!(run_id = %run_id, tables = outputs.len(), "pipeline run finished");
        Ok(PipelineReport {
            run_id,
            stages: output.stages,
            outputs,
        })
    }

    /// Runs every stage over in-memory inputs.
    ///
    /// Required columns of all four tables are checked before any stage runs,
    /// so a malformed input produces no partial output.
    pub fn transform(inputs: &InputTables, config: &PipelineConfig) -> AppResult<TransformOutput> {
        let application_id_column = Self::validate_inputs(inputs)?;
        let mut stages = Vec::new();

        let applications = Self::intake_applications(&inputs.applications, application_id_column);
        Self::record_stage(
            &mut stages,
            PipelineStage::ApplicationIntake,
            inputs.applications.len(),
            applications.len(),
        );

        let events: Vec<AuditEventRecord> = inputs
            .audit_events
            .rows()
            .iter()
            .map(AuditEventRecord::from_raw)
            .collect();
        let usage = Self::aggregate_usage(&events);
        Self::record_stage(
            &mut stages,
            PipelineStage::UsageAggregation,
            events.len(),
            usage.len(),
        );

        let directory: Vec<DirectoryUserRecord> = inputs
            .directory_users
            .rows()
            .iter()
            .map(DirectoryUserRecord::from_raw)
            .collect();
        let environments: Vec<EnvironmentRecord> = inputs
            .environments
            .rows()
            .iter()
            .map(EnvironmentRecord::from_raw)
            .collect();

        let application_count = applications.len();
        let joined = Self::enrich(applications, &usage, &directory, &environments);
        Self::record_stage(
            &mut stages,
            PipelineStage::Enrichment,
            application_count,
            joined.len(),
        );

        let joined_count = joined.len();
        let joined = Self::retain_included(joined);
        Self::record_stage(
            &mut stages,
            PipelineStage::PostJoinExclusion,
            joined_count,
            joined.len(),
        );

        let joined_count = joined.len();
        let enriched: Vec<EnrichedApplication> = joined.into_iter().map(Self::coerce).collect();
        Self::record_stage(
            &mut stages,
            PipelineStage::Coercion,
            joined_count,
            enriched.len(),
        );

        let enriched_count = enriched.len();
        let classified = Self::classify(enriched);
        Self::record_stage(
            &mut stages,
            PipelineStage::Classification,
            enriched_count,
            classified.len(),
        );

        let high_adoption = Self::high_adoption(&classified);
        Self::record_stage(
            &mut stages,
            PipelineStage::HighAdoption,
            classified.len(),
            high_adoption.len(),
        );

        let scope: &[ClassifiedApplication] = match config.rollup_scope {
            RollupScope::All => &classified,
            RollupScope::HighAdoption => &high_adoption,
        };

        let environment_rollup = Self::environment_rollup(scope);
        Self::record_stage(
            &mut stages,
            PipelineStage::EnvironmentRollup,
            scope.len(),
            environment_rollup.len(),
        );

        let owner_rollup = Self::owner_rollup(scope, config.owner_top_n);
        Self::record_stage(
            &mut stages,
            PipelineStage::OwnerRollup,
            scope.len(),
            owner_rollup.len(),
        );

        let usage_ranking = Self::usage_ranking(scope, config.usage_ranking_top_n);
        Self::record_stage(
            &mut stages,
            PipelineStage::UsageRanking,
            scope.len(),
            usage_ranking.len(),
        );

        let governance_funnel = Self::governance_funnel(&classified);
        let kpis = Self::executive_kpis(&classified, &environment_rollup);

        Ok(TransformOutput {
            classified,
            high_adoption,
            environment_rollup,
            owner_rollup,
            usage_ranking,
            governance_funnel,
            kpis,
            stages,
        })
    }

    /// Hex SHA-256 of a table's canonical JSON encoding.
    pub fn fingerprint(table: &OutputTable) -> AppResult<String> {
        let document = json!({
            "name": table.name(),
            "columns": table.columns(),
            "rows": table.to_json_records(),
        });
        let encoded = serde_json::to_vec(&document).map_err(|error| {
            AppError::Internal(format!(
                "failed to encode output table '{}' for fingerprinting: {error}",
                table.name()
            ))
        })?;

        let digest = Sha256::digest(encoded);
        Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    async fn load_inputs(&self, config: &PipelineConfig) -> AppResult<InputTables> {
        Ok(InputTables {
            applications: self.load_input(config, SourceTable::Applications).await?,
            environments: self.load_input(config, SourceTable::Environments).await?,
            audit_events: self.load_input(config, SourceTable::AuditEvents).await?,
            directory_users: self.load_input(config, SourceTable::DirectoryUsers).await?,
        })
    }

    async fn load_input(&self, config: &PipelineConfig, table: SourceTable) -> AppResult<RawTable> {
        let handle = config.source(table)?;
        let loaded = self
            .source
            .load_table(table, handle)
            .await?
            .ok_or_else(|| {
                AppError::MissingTable(format!("{table} (source '{}')", handle.as_str()))
            })?;

        info!(
            table = %table,
            source = %handle.as_str(),
            rows = loaded.len(),
            columns = loaded.columns().len(),
            "input table loaded"
        );
        Ok(loaded)
    }

    fn validate_inputs(inputs: &InputTables) -> AppResult<&'static str> {
        let application_id_column = Self::application_id_column(&inputs.applications)?;
        inputs
            .applications
            .require_columns(&columns::application::REQUIRED)?;
        inputs
            .environments
            .require_columns(&columns::environment::REQUIRED)?;
        inputs
            .audit_events
            .require_columns(&columns::audit::REQUIRED)?;
        inputs
            .directory_users
            .require_columns(&columns::directory::REQUIRED)?;

        Ok(application_id_column)
    }

    fn record_stage(
        stages: &mut Vec<StageReport>,
        stage: PipelineStage,
        rows_in: usize,
        rows_out: usize,
    ) {
        if stage.preserves_rows() && rows_out < rows_in {
            warn!(
                stage = stage.as_str(),
                rows_in, rows_out, "row-preserving stage lost rows"
            );
        } else {
            info!(stage = stage.as_str(), rows_in, rows_out, "pipeline stage completed");
        }

        stages.push(StageReport {
            stage,
            rows_in,
            rows_out,
        });
    }
}
