use super::*;

impl PipelineService {
    /// Reduces audit events to one metric row per application reference.
    ///
    /// Events without an application reference are ignored. Events without
    /// a user count towards `total_events` but not towards `unique_users`.
    pub fn aggregate_usage(events: &[AuditEventRecord]) -> Vec<UsageMetric> {
        let mut grouped: BTreeMap<String, (HashSet<String>, i64)> = BTreeMap::new();

        for event in events {
            let Some(app_id) = event
                .app_id
                .as_deref()
                .map(normalize_key)
                .filter(|app_id| !app_id.is_empty())
            else {
                continue;
            };

            let (users, total_events) = grouped.entry(app_id).or_default();
            *total_events = total_events.saturating_add(1);
            if let Some(user) = event.user_upn.as_deref().map(normalize_key)
                && !user.is_empty()
            {
                users.insert(user);
            }
        }

        grouped
            .into_iter()
            .map(|(app_id, (users, total_events))| UsageMetric {
                app_id,
                unique_users: i64::try_from(users.len()).unwrap_or(i64::MAX),
                total_events,
            })
            .collect()
    }
}
