use super::*;

impl PipelineService {
    pub(super) fn application_id_column(table: &RawTable) -> AppResult<&'static str> {
        use appsight_domain::columns::application::{INTERNAL_NAME, LEGACY_ID};

        if table.has_column(INTERNAL_NAME) {
            return Ok(INTERNAL_NAME);
        }

        if table.has_column(LEGACY_ID) {
            return Ok(LEGACY_ID);
        }

        Err(AppError::missing_column(table.name(), INTERNAL_NAME))
    }

    /// Projects application rows, drops excluded ones and keeps the first
    /// row for each application id.
    ///
    /// Rows without an id are kept; they simply never match usage.
    pub fn intake_applications(table: &RawTable, id_column: &str) -> Vec<ApplicationRecord> {
        let mut seen_ids = HashSet::new();
        let mut duplicates = 0_usize;

        let records: Vec<ApplicationRecord> = table
            .rows()
            .iter()
            .map(|row| ApplicationRecord::from_raw(row, id_column))
            .filter(|record| !record.is_excluded())
            .filter(|record| {
                let Some(app_id) = record.internal_name.as_deref().map(normalize_key) else {
                    return true;
                };

                if seen_ids.insert(app_id) {
                    return true;
                }

                duplicates = duplicates.saturating_add(1);
                false
            })
            .collect();

        if duplicates > 0 {
            warn!(
                table = table.name(),
                duplicates, "duplicate application ids dropped; first row kept"
            );
        }

        records
    }

    /// Drops deleted rows and excluded app types.
    ///
    /// Idempotent; applied at intake, after the joins and again before
    /// classification.
    pub fn retain_included<T: Excludable>(rows: Vec<T>) -> Vec<T> {
        rows.into_iter().filter(|row| !row.is_excluded()).collect()
    }
}
