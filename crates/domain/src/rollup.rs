use serde::{Deserialize, Serialize};

/// Usage summed over the applications of one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRollup {
    /// Normalized environment id.
    pub environment_id: String,
    /// Environment label.
    pub environment_name: String,
    /// Applications in the environment.
    pub app_count: i64,
    /// Summed distinct users.
    pub unique_users: i64,
    /// Summed audit events.
    pub total_events: i64,
}

/// Usage summed over the applications created by one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRollup {
    /// Creator display name.
    pub owner_name: String,
    /// Applications owned.
    pub app_count: i64,
    /// Summed distinct users.
    pub unique_users: i64,
    /// Summed audit events.
    pub total_events: i64,
}

/// One entry of the usage ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRankingEntry {
    /// Application id.
    pub app_id: String,
    /// Application name.
    pub app_name: Option<String>,
    /// Creator display name.
    pub creator_name: Option<String>,
    /// Distinct users.
    pub unique_users: i64,
    /// Audit events.
    pub total_events: i64,
    /// Environment label.
    pub environment_name: String,
}

/// Stages of the governance funnel, from broadest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    /// Every classified application.
    TotalApplications,
    /// Applications with at least one audit event.
    ApplicationsWithUsage,
    /// High-adoption applications.
    HighAdoptionApplications,
}

impl FunnelStage {
    /// Every stage in funnel order.
    pub const ALL: [Self; 3] = [
        Self::TotalApplications,
        Self::ApplicationsWithUsage,
        Self::HighAdoptionApplications,
    ];

    /// Returns the report label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::TotalApplications => "1. Total applications",
            Self::ApplicationsWithUsage => "2. Applications with recorded usage",
            Self::HighAdoptionApplications => "3. High-adoption applications",
        }
    }
}

/// One governance funnel row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelRow {
    /// Funnel stage.
    pub stage: FunnelStage,
    /// Applications at this stage.
    pub app_count: i64,
    /// Share of the total, in percent with one decimal.
    pub share_of_total: f64,
}

/// Headline indicators of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveKpis {
    /// Every classified application.
    pub total_applications: i64,
    /// Applications with at least one audit event.
    pub applications_with_usage: i64,
    /// High-adoption applications.
    pub high_adoption_applications: i64,
    /// Summed distinct users.
    pub total_unique_users: i64,
    /// Summed audit events.
    pub total_events: i64,
    /// Applications with usage over total, in percent with one decimal.
    pub adoption_rate: f64,
    /// Environments with at least one application.
    pub active_environments: i64,
}

/// Percentage of `part` in `total`, rounded to one decimal; 0.0 for an empty total.
#[must_use]
pub fn share_percent(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }

    let percent = part as f64 / total as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}
