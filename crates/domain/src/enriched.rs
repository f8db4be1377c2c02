use serde::Serialize;

use crate::classification::{self, Excludable};
use crate::coercion::Timestamp;
use crate::records::{ApplicationRecord, JoinedApplication};

/// An application with every attribute in its semantic type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedApplication {
    /// Normalized application id.
    pub app_id: String,
    /// Display name.
    pub app_name: Option<String>,
    /// Creator display name.
    pub creator_name: Option<String>,
    /// Owner lookup id.
    pub owner_id: Option<String>,
    /// Owner principal type.
    pub owner_principal_type: Option<String>,
    /// Resolved owner email.
    pub owner_email: Option<String>,
    /// Normalized environment id.
    pub environment_id: String,
    /// Environment label.
    pub environment_name: String,
    /// Creation time.
    pub created_on: Timestamp,
    /// Modification time.
    pub modified_on: Timestamp,
    /// Last launch time.
    pub last_launched_on: Timestamp,
    /// Distinct audit users.
    pub unique_users: i64,
    /// Audit events.
    pub total_events: i64,
    /// Users the app is shared with.
    pub shared_user_count: i64,
    /// Whether the app is shared with the tenant.
    pub shared_with_tenant: bool,
    /// Groups the app is shared with.
    pub shared_group_count: i64,
    /// Complexity score.
    pub complexity_score: f64,
    /// Additional editors.
    pub editor_count: i64,
    /// App-type code.
    pub app_type: Option<String>,
    /// Deletion flag.
    pub is_deleted: bool,
}

/// An enriched application with its classification labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedApplication {
    /// Typed application attributes.
    pub application: EnrichedApplication,
    /// Owner plus editors.
    pub total_owners: i64,
    /// Personal-productivity flag.
    pub personal_productivity: bool,
    /// High-adoption membership.
    pub high_adoption: bool,
}

impl ClassifiedApplication {
    /// Applies the ownership, personal-productivity and adoption rules.
    #[must_use]
    pub fn classify(application: EnrichedApplication) -> Self {
        let total_owners = classification::total_owners(application.editor_count);
        let personal_productivity =
            classification::is_personal_productivity(application.shared_user_count);
        let high_adoption = classification::is_high_adoption(
            application.unique_users,
            total_owners,
            application.app_type.as_deref(),
        );

        Self {
            application,
            total_owners,
            personal_productivity,
            high_adoption,
        }
    }
}

impl Excludable for ApplicationRecord {
    fn app_type(&self) -> Option<&str> {
        self.app_type.as_deref()
    }

    fn is_deleted(&self) -> bool {
        ApplicationRecord::is_deleted(self)
    }
}

impl Excludable for JoinedApplication {
    fn app_type(&self) -> Option<&str> {
        self.application.app_type.as_deref()
    }

    fn is_deleted(&self) -> bool {
        self.application.is_deleted()
    }
}

impl Excludable for EnrichedApplication {
    fn app_type(&self) -> Option<&str> {
        self.app_type.as_deref()
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }
}

impl Excludable for ClassifiedApplication {
    fn app_type(&self) -> Option<&str> {
        self.application.app_type.as_deref()
    }

    fn is_deleted(&self) -> bool {
        self.application.is_deleted
    }
}
