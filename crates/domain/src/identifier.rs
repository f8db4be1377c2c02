//! Join-key canonicalization.
//!
//! Upstream exports disagree on identifier formatting: values carry stray
//! whitespace, and the application export prefixes some environment ids with
//! `Default-` while the environment export does not.

/// Prefix the application export adds to environment references.
pub const DEFAULT_ENVIRONMENT_PREFIX: &str = "Default-";

/// Canonical form of a generic join key.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_owned()
}

/// Canonical form of an environment reference taken from an application row.
///
/// Only one leading `Default-` is removed. Environment-table ids go through
/// [`normalize_key`] instead and keep any prefix they carry.
#[must_use]
pub fn normalize_app_environment_id(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix(DEFAULT_ENVIRONMENT_PREFIX)
        .unwrap_or(trimmed)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{normalize_app_environment_id, normalize_key};

    #[test]
    fn strips_default_prefix_on_application_side() {
        assert_eq!(normalize_app_environment_id("Default-ENV123"), "ENV123");
        assert_eq!(normalize_app_environment_id("  Default-ENV123 "), "ENV123");
    }

    #[test]
    fn prefix_is_only_removed_at_the_start() {
        assert_eq!(
            normalize_app_environment_id("ENV-Default-1"),
            "ENV-Default-1"
        );
        assert_eq!(normalize_app_environment_id("default-ENV1"), "default-ENV1");
    }

    #[test]
    fn environment_side_keeps_prefix() {
        assert_eq!(normalize_key(" Default-ENV123 "), "Default-ENV123");
    }

    proptest! {
        #[test]
        fn normalize_key_is_idempotent(raw in "\\PC{0,24}") {
            let once = normalize_key(&raw);
            prop_assert_eq!(normalize_key(&once), once.clone());
        }

        #[test]
        fn prefixed_and_bare_ids_meet(id in "[A-Za-z0-9-]{1,20}") {
            let bare = normalize_key(&id);
            let prefixed = normalize_app_environment_id(&format!(" Default-{id}"));
            prop_assert_eq!(prefixed, bare);
        }
    }
}
