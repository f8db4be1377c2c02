//! Application services and ports.

#![forbid(unsafe_code)]

mod pipeline_config;
mod pipeline_ports;
mod pipeline_service;

pub use pipeline_config::{
    DEFAULT_OWNER_TOP_N, DEFAULT_USAGE_RANKING_TOP_N, PipelineConfig, RollupScope,
};
pub use pipeline_ports::{SinkHandle, SourceHandle, SourceTable, TableSink, TableSource};
pub use pipeline_service::{
    ENRICHED_APPLICATIONS_TABLE, ENVIRONMENT_ROLLUP_TABLE, EXECUTIVE_KPIS_TABLE,
    GOVERNANCE_FUNNEL_TABLE, HIGH_ADOPTION_TABLE, InputTables, OWNER_ROLLUP_TABLE,
    OutputSummary, PipelineReport, PipelineService, PipelineStage, StageReport, TransformOutput,
    USAGE_RANKING_TABLE,
};
