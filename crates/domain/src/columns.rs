//! Column-name contracts for source tables and exported tables.

/// Columns of the raw application export.
pub mod application {
    /// Internal application identifier.
    pub const INTERNAL_NAME: &str = "admin_appinternalname";
    /// Legacy identifier column used when `INTERNAL_NAME` is not exported.
    pub const LEGACY_ID: &str = "admin_appid";
    /// Application display name.
    pub const DISPLAY_NAME: &str = "admin_displayname";
    /// Owner display name.
    pub const OWNER_DISPLAY_NAME: &str = "admin_appownerdisplayname";
    /// Owner lookup id as exported on the application row.
    pub const OWNER_ID: &str = "admin_appowner";
    /// Owner directory record reference used for the owner join.
    pub const OWNER_RECORD_REF: &str = "admin_appowner.admin_recordguidasstring";
    /// Owner principal type.
    pub const OWNER_PRINCIPAL_TYPE: &str = "admin_appownerprincipaltype";
    /// Hosting environment reference.
    pub const ENVIRONMENT_ID: &str = "admin_appenvironmentid";
    /// Creation timestamp.
    pub const CREATED_ON: &str = "admin_appcreatedon";
    /// Last modification timestamp.
    pub const MODIFIED_ON: &str = "admin_appmodifiedon";
    /// Last launch timestamp.
    pub const LAST_LAUNCHED_ON: &str = "admin_applastlaunchedon";
    /// Number of users the app is shared with.
    pub const SHARED_USERS: &str = "admin_appsharedusers";
    /// Number of groups the app is shared with.
    pub const SHARED_GROUPS: &str = "admin_appsharedgroups";
    /// Whether the app is shared with the whole tenant.
    pub const SHARED_WITH_TENANT: &str = "admin_appsharedwithtenant";
    /// Number of additional editors.
    pub const SHARED_EDITORS: &str = "admin_appsharededitors";
    /// Complexity score.
    pub const COMPLEXITY_SCORE: &str = "admin_appcomplexityscore";
    /// App-type code.
    pub const APP_TYPE: &str = "admin_powerappstype";
    /// Deletion flag.
    pub const DELETED: &str = "admin_appdeleted";

    /// Columns that must be present besides the identifier column.
    pub const REQUIRED: [&str; 4] = [ENVIRONMENT_ID, OWNER_RECORD_REF, APP_TYPE, DELETED];
}

/// Columns of the raw environment export.
pub mod environment {
    /// Environment identifier.
    pub const ID: &str = "admin_environmentid";
    /// Environment display name.
    pub const DISPLAY_NAME: &str = "admin_displayname";

    /// Columns that must be present.
    pub const REQUIRED: [&str; 2] = [ID, DISPLAY_NAME];
}

/// Columns of the raw audit log export.
pub mod audit {
    /// Application reference.
    pub const APP_ID: &str = "App ID";
    /// User principal reference.
    pub const USER_UPN: &str = "User UPN";

    /// Columns that must be present.
    pub const REQUIRED: [&str; 2] = [APP_ID, USER_UPN];
}

/// Columns of the raw user directory export.
pub mod directory {
    /// Directory record reference.
    pub const RECORD_ID: &str = "admin_recordguidasstring";
    /// Primary email.
    pub const EMAIL: &str = "admin_useremail";
    /// User principal name.
    pub const PRINCIPAL_NAME: &str = "admin_userprincipalname";

    /// Columns that must be present.
    pub const REQUIRED: [&str; 3] = [RECORD_ID, EMAIL, PRINCIPAL_NAME];
}

/// Human-readable column names of the exported tables.
pub mod output {
    /// Application id.
    pub const APP_ID: &str = "App ID";
    /// Application name.
    pub const APP_NAME: &str = "App Name";
    /// Creator display name.
    pub const CREATOR_NAME: &str = "Creator Name";
    /// Owner directory id.
    pub const OWNER_ID: &str = "Owner ID";
    /// Owner principal type.
    pub const OWNER_PRINCIPAL_TYPE: &str = "Owner Principal Type";
    /// Resolved owner email.
    pub const OWNER_EMAIL: &str = "Owner Email";
    /// Normalized environment id.
    pub const ENVIRONMENT_ID: &str = "Environment ID";
    /// Resolved environment name.
    pub const ENVIRONMENT_NAME: &str = "Environment Name";
    /// Creation timestamp.
    pub const CREATED_ON: &str = "Created On";
    /// Modification timestamp.
    pub const MODIFIED_ON: &str = "Modified On";
    /// Last launch timestamp.
    pub const LAST_LAUNCHED_ON: &str = "Last Launched On";
    /// Distinct users seen in the audit log.
    pub const UNIQUE_USERS: &str = "unique_users";
    /// Audit events recorded.
    pub const TOTAL_EVENTS: &str = "total_events";
    /// Shared user count.
    pub const SHARED_USERS: &str = "Shared Users";
    /// Shared-with-tenant flag.
    pub const SHARED_WITH_TENANT: &str = "Shared With Tenant";
    /// Shared group count.
    pub const SHARED_GROUPS: &str = "Shared Groups";
    /// Complexity score.
    pub const COMPLEXITY_SCORE: &str = "Complexity Score";
    /// Editor count.
    pub const EDITORS: &str = "Editors";
    /// Owner plus editors.
    pub const TOTAL_OWNERS: &str = "total_owners";
    /// App-type code.
    pub const APP_TYPE: &str = "App Type";
    /// Personal-productivity flag.
    pub const PERSONAL_PRODUCTIVITY: &str = "personal_productivity";
    /// High-adoption flag.
    pub const HIGH_ADOPTION: &str = "high_adoption";
    /// Owner name in the owner roll-up.
    pub const OWNER_NAME: &str = "Owner Name";
    /// Application count in roll-ups.
    pub const TOTAL_APPS: &str = "total_apps";
    /// Summed distinct users in roll-ups.
    pub const TOTAL_UNIQUE_USERS: &str = "total_unique_users";
    /// Governance funnel stage label.
    pub const FUNNEL_STAGE: &str = "Stage";
    /// Governance funnel application count.
    pub const FUNNEL_APP_COUNT: &str = "Application Count";
    /// Governance funnel share of the total.
    pub const FUNNEL_SHARE: &str = "% of Total";
    /// KPI label.
    pub const KPI: &str = "KPI";
    /// KPI value.
    pub const KPI_VALUE: &str = "Value";
}
