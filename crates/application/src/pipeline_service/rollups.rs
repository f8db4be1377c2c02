use appsight_domain::share_percent;

use super::*;

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

impl PipelineService {
    /// Application count and summed usage per environment, busiest first.
    pub fn environment_rollup(rows: &[ClassifiedApplication]) -> Vec<EnvironmentRollup> {
        let mut grouped: BTreeMap<(&str, &str), EnvironmentRollup> = BTreeMap::new();

        for row in rows {
            let application = &row.application;
            let entry = grouped
                .entry((
                    application.environment_id.as_str(),
                    application.environment_name.as_str(),
                ))
                .or_insert_with(|| EnvironmentRollup {
                    environment_id: application.environment_id.clone(),
                    environment_name: application.environment_name.clone(),
                    app_count: 0,
                    unique_users: 0,
                    total_events: 0,
                });
            entry.app_count = entry.app_count.saturating_add(1);
            entry.unique_users = entry.unique_users.saturating_add(application.unique_users);
            entry.total_events = entry.total_events.saturating_add(application.total_events);
        }

        let mut rollup: Vec<EnvironmentRollup> = grouped.into_values().collect();
        rollup.sort_by(|left, right| {
            right
                .unique_users
                .cmp(&left.unique_users)
                .then_with(|| left.environment_id.cmp(&right.environment_id))
                .then_with(|| left.environment_name.cmp(&right.environment_name))
        });
        rollup
    }

    /// Application count and summed usage per creator, top `limit` by users.
    ///
    /// Applications without a creator name are not attributed to anyone.
    pub fn owner_rollup(rows: &[ClassifiedApplication], limit: usize) -> Vec<OwnerRollup> {
        let mut grouped: BTreeMap<&str, OwnerRollup> = BTreeMap::new();

        for row in rows {
            let application = &row.application;
            let Some(owner_name) = application.creator_name.as_deref() else {
                continue;
            };

            let entry = grouped.entry(owner_name).or_insert_with(|| OwnerRollup {
                owner_name: owner_name.to_owned(),
                app_count: 0,
                unique_users: 0,
                total_events: 0,
            });
            entry.app_count = entry.app_count.saturating_add(1);
            entry.unique_users = entry.unique_users.saturating_add(application.unique_users);
            entry.total_events = entry.total_events.saturating_add(application.total_events);
        }

        let mut rollup: Vec<OwnerRollup> = grouped.into_values().collect();
        rollup.sort_by(|left, right| {
            right
                .unique_users
                .cmp(&left.unique_users)
                .then_with(|| left.owner_name.cmp(&right.owner_name))
        });
        rollup.truncate(limit);
        rollup
    }

    /// Top `limit` applications by distinct users.
    pub fn usage_ranking(rows: &[ClassifiedApplication], limit: usize) -> Vec<UsageRankingEntry> {
        let mut ranking: Vec<UsageRankingEntry> = rows
            .iter()
            .map(|row| UsageRankingEntry {
                app_id: row.application.app_id.clone(),
                app_name: row.application.app_name.clone(),
                creator_name: row.application.creator_name.clone(),
                unique_users: row.application.unique_users,
                total_events: row.application.total_events,
                environment_name: row.application.environment_name.clone(),
            })
            .collect();

        ranking.sort_by(|left, right| {
            right
                .unique_users
                .cmp(&left.unique_users)
                .then_with(|| right.total_events.cmp(&left.total_events))
                .then_with(|| left.app_id.cmp(&right.app_id))
        });
        ranking.truncate(limit);
        ranking
    }

    /// Total, used and high-adoption application counts with their shares.
    pub fn governance_funnel(classified: &[ClassifiedApplication]) -> Vec<FunnelRow> {
        let total = count(classified.len());

        FunnelStage::ALL
            .into_iter()
            .map(|stage| {
                let app_count = match stage {
                    FunnelStage::TotalApplications => total,
                    FunnelStage::ApplicationsWithUsage => count(
                        classified
                            .iter()
                            .filter(|row| row.application.total_events > 0)
                            .count(),
                    ),
                    FunnelStage::HighAdoptionApplications => count(
                        classified.iter().filter(|row| row.high_adoption).count(),
                    ),
                };

                FunnelRow {
                    stage,
                    app_count,
                    share_of_total: share_percent(app_count, total),
                }
            })
            .collect()
    }

    /// Headline indicators over the classified set.
    pub fn executive_kpis(
        classified: &[ClassifiedApplication],
        environment_rollup: &[EnvironmentRollup],
    ) -> ExecutiveKpis {
        let total_applications = count(classified.len());
        let applications_with_usage = count(
            classified
                .iter()
                .filter(|row| row.application.total_events > 0)
                .count(),
        );

        ExecutiveKpis {
            total_applications,
            applications_with_usage,
            high_adoption_applications: count(
                classified.iter().filter(|row| row.high_adoption).count(),
            ),
            total_unique_users: classified.iter().fold(0_i64, |sum, row| {
                sum.saturating_add(row.application.unique_users)
            }),
            total_events: classified.iter().fold(0_i64, |sum, row| {
                sum.saturating_add(row.application.total_events)
            }),
            adoption_rate: share_percent(applications_with_usage, total_applications),
            active_environments: count(
                environment_rollup
                    .iter()
                    .filter(|environment| environment.app_count > 0)
                    .count(),
            ),
        }
    }
}
