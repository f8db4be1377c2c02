use std::collections::hash_map::Entry;

use super::*;

impl PipelineService {
    /// Left-joins applications with usage, owner directory and environments.
    ///
    /// Every application yields exactly one joined row. Lookup tables are
    /// indexed by their first row per key, so a duplicated directory or
    /// environment entry cannot fan rows out.
    pub fn enrich(
        applications: Vec<ApplicationRecord>,
        usage: &[UsageMetric],
        directory: &[DirectoryUserRecord],
        environments: &[EnvironmentRecord],
    ) -> Vec<JoinedApplication> {
        let usage_by_app: HashMap<&str, &UsageMetric> = usage
            .iter()
            .map(|metric| (metric.app_id.as_str(), metric))
            .collect();
        let users_by_record = Self::index_first_by_key(
            SourceTable::DirectoryUsers,
            directory.iter().filter_map(|user| {
                user.record_id
                    .as_deref()
                    .map(|record_id| (normalize_key(record_id), user))
            }),
        );
        let environments_by_id = Self::index_first_by_key(
            SourceTable::Environments,
            environments.iter().filter_map(|environment| {
                environment
                    .environment_id
                    .as_deref()
                    .map(|environment_id| (normalize_key(environment_id), environment))
            }),
        );

        applications
            .into_iter()
            .map(|application| {
                let app_id = application
                    .internal_name
                    .as_deref()
                    .map(normalize_key)
                    .unwrap_or_default();
                let usage = usage_by_app
                    .get(app_id.as_str())
                    .map(|metric| (*metric).clone());

                let owner_email = application
                    .owner_record_ref
                    .as_deref()
                    .map(normalize_key)
                    .and_then(|record_ref| users_by_record.get(&record_ref))
                    .and_then(|user| user.resolved_email())
                    .map(str::to_owned);

                let environment_id = application
                    .environment_id
                    .as_deref()
                    .map(normalize_app_environment_id)
                    .unwrap_or_default();
                let environment_name = environments_by_id
                    .get(&environment_id)
                    .and_then(|environment| environment.display_name.clone())
                    .unwrap_or_else(|| environment_id.clone());

                JoinedApplication {
                    application,
                    app_id,
                    usage,
                    owner_email,
                    environment_id,
                    environment_name,
                }
            })
            .collect()
    }

    fn index_first_by_key<'a, T>(
        table: SourceTable,
        entries: impl Iterator<Item = (String, &'a T)>,
    ) -> HashMap<String, &'a T> {
        let mut index = HashMap::new();
        let mut duplicates = 0_usize;

        for (key, row) in entries {
            if key.is_empty() {
                continue;
            }

            match index.entry(key) {
                Entry::Occupied(_) => duplicates = duplicates.saturating_add(1),
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
            }
        }

        if duplicates > 0 {
            warn!(
                table = %table,
                duplicates, "duplicate lookup keys ignored; first row kept"
            );
        }

        index
    }
}
