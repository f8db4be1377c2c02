//! Business classification rules for enriched applications.

/// App-type code of form apps.
pub const FORM_APP_TYPE: &str = "597910003";

/// App-type code of the related form-app variant.
pub const FORM_APP_VARIANT_TYPE: &str = "597910002";

/// App types excluded from every analysis table.
pub const EXCLUDED_APP_TYPES: [&str; 2] = [FORM_APP_VARIANT_TYPE, FORM_APP_TYPE];

/// Apps shared with fewer users than this are personal-productivity apps.
pub const PERSONAL_PRODUCTIVITY_SHARED_USER_LIMIT: i64 = 10;

/// Rows that carry the attributes the exclusion rule reads.
pub trait Excludable {
    /// App-type code, when known.
    fn app_type(&self) -> Option<&str>;

    /// Whether the row is flagged deleted.
    fn is_deleted(&self) -> bool;

    /// Whether the exclusion rule removes this row.
    fn is_excluded(&self) -> bool {
        is_excluded(self.app_type(), self.is_deleted())
    }
}

/// Returns whether an app type belongs to the excluded set.
#[must_use]
pub fn is_excluded_app_type(app_type: Option<&str>) -> bool {
    app_type.is_some_and(|code| EXCLUDED_APP_TYPES.contains(&code.trim()))
}

/// Exclusion predicate: deleted rows and excluded app types are dropped.
#[must_use]
pub fn is_excluded(app_type: Option<&str>, is_deleted: bool) -> bool {
    is_deleted || is_excluded_app_type(app_type)
}

/// The recorded owner plus every additional editor.
#[must_use]
pub fn total_owners(editor_count: i64) -> i64 {
    editor_count.saturating_add(1)
}

/// Personal-productivity flag.
#[must_use]
pub fn is_personal_productivity(shared_user_count: i64) -> bool {
    shared_user_count < PERSONAL_PRODUCTIVITY_SHARED_USER_LIMIT
}

/// More distinct people use the app than maintain it.
#[must_use]
pub fn is_high_adoption(unique_users: i64, total_owners: i64, app_type: Option<&str>) -> bool {
    unique_users > total_owners && !is_excluded_app_type(app_type)
}

#[cfg(test)]
mod tests {
    use super::{
        FORM_APP_TYPE, FORM_APP_VARIANT_TYPE, is_excluded, is_high_adoption,
        is_personal_productivity, total_owners,
    };

    #[test]
    fn personal_productivity_threshold_is_strict() {
        assert!(is_personal_productivity(9));
        assert!(!is_personal_productivity(10));
        assert!(is_personal_productivity(0));
    }

    #[test]
    fn high_adoption_requires_more_users_than_owners() {
        assert!(!is_high_adoption(5, 5, Some("0")));
        assert!(is_high_adoption(6, 5, Some("0")));
        assert!(is_high_adoption(6, 5, None));
    }

    #[test]
    fn high_adoption_skips_form_apps() {
        assert!(!is_high_adoption(100, 1, Some(FORM_APP_TYPE)));
        assert!(!is_high_adoption(100, 1, Some(FORM_APP_VARIANT_TYPE)));
    }

    #[test]
    fn exclusion_covers_deletion_and_form_types() {
        assert!(is_excluded(None, true));
        assert!(is_excluded(Some(FORM_APP_TYPE), false));
        assert!(is_excluded(Some(" 597910002 "), false));
        assert!(!is_excluded(Some("0"), false));
        assert!(!is_excluded(None, false));
    }

    #[test]
    fn total_owners_counts_creator() {
        assert_eq!(total_owners(0), 1);
        assert_eq!(total_owners(4), 5);
    }
}
