use super::*;

impl PipelineService {
    /// Reapplies the exclusion rule, then labels every remaining row.
    pub fn classify(enriched: Vec<EnrichedApplication>) -> Vec<ClassifiedApplication> {
        Self::retain_included(enriched)
            .into_iter()
            .map(ClassifiedApplication::classify)
            .collect()
    }

    /// High-adoption subset of classified rows.
    pub fn high_adoption(classified: &[ClassifiedApplication]) -> Vec<ClassifiedApplication> {
        classified
            .iter()
            .filter(|row| row.high_adoption && !row.is_excluded())
            .cloned()
            .collect()
    }
}
