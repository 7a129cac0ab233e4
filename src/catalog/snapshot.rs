use serde::Serialize;

use crate::filters::{DateRangePreset, AGE_BUCKETS};

/// Every value the dashboard offers in its filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCatalogSnapshot {
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub age_ranges: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
    pub date_ranges: Vec<String>
}

impl FilterCatalogSnapshot {
    /// Age buckets and date presets are fixed and filled in here.
    pub fn new(
        regions: Vec<String>,
        genders: Vec<String>,
        categories: Vec<String>,
        tags: Vec<String>,
        payment_methods: Vec<String>
    ) -> Self {
        Self {
            regions,
            genders,
            age_ranges: AGE_BUCKETS.iter().map(|bucket| bucket.to_string()).collect(),
            categories,
            tags,
            payment_methods,
            date_ranges: DateRangePreset::ALL.iter().map(|preset| preset.label().to_string()).collect()
        }
    }
}
