mod snapshot;
#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::models::{FacetField, SalesError};
use crate::storage::RecordSource;

pub use snapshot::FilterCatalogSnapshot;

/// Splits comma-joined tag strings into a sorted, deduplicated vocabulary of single tags.
pub fn decompose_tags<I, S>(raw_tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tags: BTreeSet<String> = raw_tags.into_iter()
        .flat_map(|raw| {
            raw.as_ref()
                .split(',')
                .map(|tag| tag.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|tag| !tag.is_empty())
        .collect();

    tags.into_iter().collect()
}

/// Distinct facet values for building filter controls, always over the whole dataset.
///
/// Snapshots are cached for `ttl`; concurrent misses share one build.
#[derive(Clone)]
pub struct FilterCatalog {
    source: Arc<dyn RecordSource>,
    cache: Cache<(), Arc<FilterCatalogSnapshot>>
}

impl FilterCatalog {
    pub fn new(source: Arc<dyn RecordSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build()
        }
    }

    pub async fn snapshot(&self) -> Result<Arc<FilterCatalogSnapshot>, SalesError> {
        self.cache.try_get_with((), self.build())
            .await
            .map_err(|error| SalesError::clone(&error))
    }

    pub async fn values(&self, field: FacetField) -> Result<Vec<String>, SalesError> {
        self.source.distinct_values(field).await
    }

    /// Individual tags, not the joined strings stored on records.
    pub async fn tags(&self) -> Result<Vec<String>, SalesError> {
        let raw_tags = self.source.distinct_values(FacetField::Tags).await?;

        Ok(decompose_tags(raw_tags))
    }

    pub async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
    }

    async fn build(&self) -> Result<Arc<FilterCatalogSnapshot>, SalesError> {
        let (regions, genders, categories, payment_methods, tags) = tokio::try_join!(
            self.values(FacetField::Region),
            self.values(FacetField::Gender),
            self.values(FacetField::Category),
            self.values(FacetField::PaymentMethod),
            self.tags()
        )?;

        debug!("Built filter catalog with {} regions and {} tags", regions.len(), tags.len());

        Ok(Arc::new(FilterCatalogSnapshot::new(regions, genders, categories, tags, payment_methods)))
    }
}
