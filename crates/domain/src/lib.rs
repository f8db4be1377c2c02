//! Domain records, normalization and classification rules.

#![forbid(unsafe_code)]

pub mod classification;
pub mod coercion;
pub mod columns;
mod enriched;
pub mod identifier;
mod output;
mod raw;
mod records;
mod rollup;

pub use classification::Excludable;
pub use coercion::Timestamp;
pub use enriched::{ClassifiedApplication, EnrichedApplication};
pub use output::{CellValue, OutputTable};
pub use raw::{RawRecord, RawTable};
pub use records::{
    ApplicationRecord, AuditEventRecord, DELETED_FLAG_VALUES, DirectoryUserRecord,
    EnvironmentRecord, JoinedApplication, UsageMetric,
};
pub use rollup::{
    EnvironmentRollup, ExecutiveKpis, FunnelRow, FunnelStage, OwnerRollup, UsageRankingEntry,
    share_percent,
};
