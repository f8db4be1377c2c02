use appsight_domain::coercion::{coerce_bool, coerce_float, coerce_integer, coerce_timestamp};

use super::*;

impl PipelineService {
    /// Converts a joined text row into its typed shape.
    ///
    /// Never fails: unparsable or absent values take their defaults and
    /// missing usage counts as zero.
    pub fn coerce(joined: JoinedApplication) -> EnrichedApplication {
        let is_deleted = joined.application.is_deleted();
        let JoinedApplication {
            application,
            app_id,
            usage,
            owner_email,
            environment_id,
            environment_name,
        } = joined;
        let (unique_users, total_events) = usage
            .map_or((0, 0), |metric| (metric.unique_users, metric.total_events));

        EnrichedApplication {
            app_id,
            created_on: coerce_timestamp(application.created_on.as_deref()),
            modified_on: coerce_timestamp(application.modified_on.as_deref()),
            last_launched_on: coerce_timestamp(application.last_launched_on.as_deref()),
            unique_users,
            total_events,
            shared_user_count: coerce_integer(application.shared_users.as_deref()),
            shared_with_tenant: coerce_bool(application.shared_with_tenant.as_deref()),
            shared_group_count: coerce_integer(application.shared_groups.as_deref()),
            complexity_score: coerce_float(application.complexity_score.as_deref()),
            editor_count: coerce_integer(application.shared_editors.as_deref()),
            app_name: application.display_name,
            creator_name: application.owner_display_name,
            owner_id: application.owner_id,
            owner_principal_type: application.owner_principal_type,
            owner_email,
            environment_id,
            environment_name,
            app_type: application.app_type,
            is_deleted,
        }
    }
}
