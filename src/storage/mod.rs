mod dataset;
mod loader;
mod memory_source;
mod sqlite_source;

use async_trait::async_trait;

use crate::filters::CompiledFilter;
use crate::models::{FacetField, SaleRecord, SalesError};
use crate::query::{Aggregates, Evaluation, SortSpec};

pub use dataset::{Dataset, DatasetHandle};
pub use loader::load_csv;
pub use memory_source::MemorySource;
pub use sqlite_source::{SqliteSource, SALES_TABLE_DDL};

/// Read-only access to the sales dataset.
///
/// Implementations must agree on which records a [`CompiledFilter`] selects and on the
/// order a [`SortSpec`] produces, so callers can swap backends freely.
#[async_trait]
pub trait RecordSource: Send + Sync + 'static {
    async fn count(&self, filter: &CompiledFilter) -> Result<u64, SalesError>;

    async fn page(&self, filter: &CompiledFilter, sort: SortSpec, offset: u64, limit: u32) -> Result<Vec<SaleRecord>, SalesError>;

    async fn aggregate(&self, filter: &CompiledFilter) -> Result<Aggregates, SalesError>;

    /// Sorted, distinct, non-empty values of a facet across the whole dataset.
    async fn distinct_values(&self, field: FacetField) -> Result<Vec<String>, SalesError>;

    /// Count, aggregates and one page in a single call.
    async fn evaluate(&self, filter: &CompiledFilter, sort: SortSpec, offset: u64, limit: u32) -> Result<Evaluation, SalesError> {
        let (total, aggregates, records) = tokio::try_join!(
            self.count(filter),
            self.aggregate(filter),
            self.page(filter, sort, offset, limit)
        )?;

        Ok(Evaluation { records, total, aggregates })
    }

    /// Drops any cached snapshot so the next read sees fresh data.
    async fn refresh(&self) {}
}
