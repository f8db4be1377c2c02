use appsight_domain::columns::output;

use super::*;

const APPLICATION_COLUMNS: [&str; 22] = [
    output::APP_ID,
    output::APP_NAME,
    output::CREATOR_NAME,
    output::OWNER_ID,
    output::OWNER_PRINCIPAL_TYPE,
    output::OWNER_EMAIL,
    output::ENVIRONMENT_ID,
    output::ENVIRONMENT_NAME,
    output::CREATED_ON,
    output::MODIFIED_ON,
    output::LAST_LAUNCHED_ON,
    output::UNIQUE_USERS,
    output::TOTAL_EVENTS,
    output::SHARED_USERS,
    output::SHARED_WITH_TENANT,
    output::SHARED_GROUPS,
    output::COMPLEXITY_SCORE,
    output::EDITORS,
    output::TOTAL_OWNERS,
    output::APP_TYPE,
    output::PERSONAL_PRODUCTIVITY,
    output::HIGH_ADOPTION,
];

impl PipelineService {
    /// Renders every derived table with its reporting column names.
    ///
    /// Empty tables are still rendered so consumers see a zero count.
    pub fn export_tables(transformed: &TransformOutput) -> Vec<OutputTable> {
        vec![
            Self::application_table(ENRICHED_APPLICATIONS_TABLE, &transformed.classified),
            Self::application_table(HIGH_ADOPTION_TABLE, &transformed.high_adoption),
            Self::environment_rollup_table(&transformed.environment_rollup),
            Self::owner_rollup_table(&transformed.owner_rollup),
            Self::usage_ranking_table(&transformed.usage_ranking),
            Self::governance_funnel_table(&transformed.governance_funnel),
            Self::executive_kpis_table(&transformed.kpis),
        ]
    }

    fn application_table(name: &str, rows: &[ClassifiedApplication]) -> OutputTable {
        let mut table = OutputTable::new(name, &APPLICATION_COLUMNS);

        for row in rows {
            let application = &row.application;
            table.push_row(vec![
                CellValue::from(application.app_id.as_str()),
                CellValue::optional_text(application.app_name.as_deref()),
                CellValue::optional_text(application.creator_name.as_deref()),
                CellValue::optional_text(application.owner_id.as_deref()),
                CellValue::optional_text(application.owner_principal_type.as_deref()),
                CellValue::optional_text(application.owner_email.as_deref()),
                CellValue::from(application.environment_id.as_str()),
                CellValue::from(application.environment_name.as_str()),
                CellValue::from(application.created_on),
                CellValue::from(application.modified_on),
                CellValue::from(application.last_launched_on),
                CellValue::from(application.unique_users),
                CellValue::from(application.total_events),
                CellValue::from(application.shared_user_count),
                CellValue::from(application.shared_with_tenant),
                CellValue::from(application.shared_group_count),
                CellValue::from(application.complexity_score),
                CellValue::from(application.editor_count),
                CellValue::from(row.total_owners),
                CellValue::optional_text(application.app_type.as_deref()),
                CellValue::from(row.personal_productivity),
                CellValue::from(row.high_adoption),
            ]);
        }

        table
    }

    fn environment_rollup_table(rollup: &[EnvironmentRollup]) -> OutputTable {
        let mut table = OutputTable::new(
            ENVIRONMENT_ROLLUP_TABLE,
            &[
                output::ENVIRONMENT_ID,
                output::ENVIRONMENT_NAME,
                output::TOTAL_APPS,
                output::TOTAL_UNIQUE_USERS,
                output::TOTAL_EVENTS,
            ],
        );

        for environment in rollup {
            table.push_row(vec![
                CellValue::from(environment.environment_id.as_str()),
                CellValue::from(environment.environment_name.as_str()),
                CellValue::from(environment.app_count),
                CellValue::from(environment.unique_users),
                CellValue::from(environment.total_events),
            ]);
        }

        table
    }

    fn owner_rollup_table(rollup: &[OwnerRollup]) -> OutputTable {
        let mut table = OutputTable::new(
            OWNER_ROLLUP_TABLE,
            &[
                output::OWNER_NAME,
                output::TOTAL_APPS,
                output::TOTAL_UNIQUE_USERS,
                output::TOTAL_EVENTS,
            ],
        );

        for owner in rollup {
            table.push_row(vec![
                CellValue::from(owner.owner_name.as_str()),
                CellValue::from(owner.app_count),
                CellValue::from(owner.unique_users),
                CellValue::from(owner.total_events),
            ]);
        }

        table
    }

    fn usage_ranking_table(ranking: &[UsageRankingEntry]) -> OutputTable {
        let mut table = OutputTable::new(
            USAGE_RANKING_TABLE,
            &[
                output::APP_ID,
                output::APP_NAME,
                output::CREATOR_NAME,
                output::UNIQUE_USERS,
                output::TOTAL_EVENTS,
                output::ENVIRONMENT_NAME,
            ],
        );

        for entry in ranking {
            table.push_row(vec![
                CellValue::from(entry.app_id.as_str()),
                CellValue::optional_text(entry.app_name.as_deref()),
                CellValue::optional_text(entry.creator_name.as_deref()),
                CellValue::from(entry.unique_users),
                CellValue::from(entry.total_events),
                CellValue::from(entry.environment_name.as_str()),
            ]);
        }

        table
    }

    fn governance_funnel_table(funnel: &[FunnelRow]) -> OutputTable {
        let mut table = OutputTable::new(
            GOVERNANCE_FUNNEL_TABLE,
            &[
                output::FUNNEL_STAGE,
                output::FUNNEL_APP_COUNT,
                output::FUNNEL_SHARE,
            ],
        );

        for row in funnel {
            table.push_row(vec![
                CellValue::from(row.stage.label()),
                CellValue::from(row.app_count),
                CellValue::from(row.share_of_total),
            ]);
        }

        table
    }

    fn executive_kpis_table(kpis: &ExecutiveKpis) -> OutputTable {
        let mut table = OutputTable::new(EXECUTIVE_KPIS_TABLE, &[output::KPI, output::KPI_VALUE]);
        let rows: [(&str, CellValue); 7] = [
            ("Total applications", kpis.total_applications.into()),
            (
                "Applications with recorded usage",
                kpis.applications_with_usage.into(),
            ),
            (
                "High-adoption applications",
                kpis.high_adoption_applications.into(),
            ),
            ("Total unique users", kpis.total_unique_users.into()),
            ("Total audit events", kpis.total_events.into()),
            ("Adoption rate (%)", kpis.adoption_rate.into()),
            ("Active environments", kpis.active_environments.into()),
        ];

        for (label, value) in rows {
            table.push_row(vec![CellValue::from(label), value]);
        }

        table
    }
}
