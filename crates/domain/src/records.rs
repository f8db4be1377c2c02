use serde::{Deserialize, Serialize};

use crate::columns;
use crate::raw::RawRecord;

/// Deletion-flag values that mark an application as deleted.
pub const DELETED_FLAG_VALUES: [&str; 3] = ["true", "1", "yes"];

/// Application row as exported, every attribute still text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Internal application identifier.
    pub internal_name: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
    /// Owner display name.
    pub owner_display_name: Option<String>,
    /// Owner lookup id.
    pub owner_id: Option<String>,
    /// Directory record reference of the owner.
    pub owner_record_ref: Option<String>,
    /// Owner principal type.
    pub owner_principal_type: Option<String>,
    /// Environment reference, not yet normalized.
    pub environment_id: Option<String>,
    /// Creation timestamp text.
    pub created_on: Option<String>,
    /// Modification timestamp text.
    pub modified_on: Option<String>,
    /// Last launch timestamp text.
    pub last_launched_on: Option<String>,
    /// Shared user count text.
    pub shared_users: Option<String>,
    /// Shared group count text.
    pub shared_groups: Option<String>,
    /// Shared-with-tenant flag text.
    pub shared_with_tenant: Option<String>,
    /// Editor count text.
    pub shared_editors: Option<String>,
    /// Complexity score text.
    pub complexity_score: Option<String>,
    /// App-type code.
    pub app_type: Option<String>,
    /// Deletion flag text.
    pub deleted: Option<String>,
}

impl ApplicationRecord {
    /// Projects one raw row, reading the identifier from `id_column`.
    #[must_use]
    pub fn from_raw(record: &RawRecord, id_column: &str) -> Self {
        use crate::columns::application as column;

        let text = |name: &str| record.get(name).map(str::to_owned);
        Self {
            internal_name: text(id_column),
            display_name: text(column::DISPLAY_NAME),
            owner_display_name: text(column::OWNER_DISPLAY_NAME),
            owner_id: text(column::OWNER_ID),
            owner_record_ref: text(column::OWNER_RECORD_REF),
            owner_principal_type: text(column::OWNER_PRINCIPAL_TYPE),
            environment_id: text(column::ENVIRONMENT_ID),
            created_on: text(column::CREATED_ON),
            modified_on: text(column::MODIFIED_ON),
            last_launched_on: text(column::LAST_LAUNCHED_ON),
            shared_users: text(column::SHARED_USERS),
            shared_groups: text(column::SHARED_GROUPS),
            shared_with_tenant: text(column::SHARED_WITH_TENANT),
            shared_editors: text(column::SHARED_EDITORS),
            complexity_score: text(column::COMPLEXITY_SCORE),
            app_type: text(column::APP_TYPE).map(|value| value.trim().to_owned()),
            deleted: text(column::DELETED),
        }
    }

    /// Returns whether the deletion flag is set.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted.as_deref().is_some_and(|value| {
            let value = value.trim().to_lowercase();
            DELETED_FLAG_VALUES.contains(&value.as_str())
        })
    }
}

/// Environment row as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentRecord {
    /// Environment identifier.
    pub environment_id: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
}

impl EnvironmentRecord {
    /// Projects one raw row.
    #[must_use]
    pub fn from_raw(record: &RawRecord) -> Self {
        Self {
            environment_id: record.get(columns::environment::ID).map(str::to_owned),
            display_name: record
                .get(columns::environment::DISPLAY_NAME)
                .map(str::to_owned),
        }
    }
}

/// One audit log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventRecord {
    /// Application reference.
    pub app_id: Option<String>,
    /// User principal reference.
    pub user_upn: Option<String>,
}

impl AuditEventRecord {
    /// Projects one raw row.
    #[must_use]
    pub fn from_raw(record: &RawRecord) -> Self {
        Self {
            app_id: record.get(columns::audit::APP_ID).map(str::to_owned),
            user_upn: record.get(columns::audit::USER_UPN).map(str::to_owned),
        }
    }
}

/// One user directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUserRecord {
    /// Directory record reference.
    pub record_id: Option<String>,
    /// Primary email.
    pub email: Option<String>,
    /// User principal name.
    pub principal_name: Option<String>,
}

impl DirectoryUserRecord {
    /// Projects one raw row.
    #[must_use]
    pub fn from_raw(record: &RawRecord) -> Self {
        Self {
            record_id: record.get(columns::directory::RECORD_ID).map(str::to_owned),
            email: record.get(columns::directory::EMAIL).map(str::to_owned),
            principal_name: record
                .get(columns::directory::PRINCIPAL_NAME)
                .map(str::to_owned),
        }
    }

    /// Resolved contact address: the principal name, else the email.
    #[must_use]
    pub fn resolved_email(&self) -> Option<&str> {
        self.principal_name.as_deref().or(self.email.as_deref())
    }
}

/// Usage aggregated from the audit log for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetric {
    /// Normalized application reference.
    pub app_id: String,
    /// Distinct user references.
    pub unique_users: i64,
    /// Audit events.
    pub total_events: i64,
}

/// An application row after every lookup join, attributes still text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedApplication {
    /// Source application row.
    pub application: ApplicationRecord,
    /// Normalized application id used for the usage join.
    pub app_id: String,
    /// Usage metrics, absent when the app has no audit events.
    pub usage: Option<UsageMetric>,
    /// Owner email resolved from the directory.
    pub owner_email: Option<String>,
    /// Normalized environment id.
    pub environment_id: String,
    /// Environment label, falling back to the environment id.
    pub environment_name: String,
}

#[cfg(test)]
mod tests {
    use super::{ApplicationRecord, DirectoryUserRecord};
    use crate::columns::application as column;
    use crate::raw::RawRecord;

    #[test]
    fn deletion_flag_accepts_common_truthy_values() {
        for flag in ["true", "TRUE", "1", "Yes"] {
            let record = ApplicationRecord::from_raw(
                &RawRecord::from_pairs([(column::DELETED, flag)]),
                column::INTERNAL_NAME,
            );
            assert!(record.is_deleted(), "flag '{flag}' should mark deletion");
        }

        let record = ApplicationRecord::from_raw(
            &RawRecord::from_pairs([(column::DELETED, "false")]),
            column::INTERNAL_NAME,
        );
        assert!(!record.is_deleted());
        assert!(!ApplicationRecord::default().is_deleted());
    }

    #[test]
    fn identifier_column_is_selectable() {
        let raw = RawRecord::from_pairs([(column::LEGACY_ID, "app-1")]);
        let record = ApplicationRecord::from_raw(&raw, column::LEGACY_ID);
        assert_eq!(record.internal_name.as_deref(), Some("app-1"));
    }

    #[test]
    fn principal_name_wins_over_email() {
        let user = DirectoryUserRecord {
            record_id: Some("u1".to_owned()),
            email: Some("b@x.com".to_owned()),
            principal_name: Some("a@x.com".to_owned()),
        };
        assert_eq!(user.resolved_email(), Some("a@x.com"));

        let email_only = DirectoryUserRecord {
            principal_name: None,
            ..user
        };
        assert_eq!(email_only.resolved_email(), Some("b@x.com"));
    }
}
