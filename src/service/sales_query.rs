use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::info;

use crate::catalog::{FilterCatalog, FilterCatalogSnapshot};
use crate::filters::{CompiledFilter, FilterRequest};
use crate::models::SalesError;
use crate::query::{QueryExecutor, ResultEnvelope};
use crate::storage::RecordSource;

/// The operations the transport layer needs: listing, filter options and health.
#[derive(Clone)]
pub struct SalesQuery {
    source: Arc<dyn RecordSource>,
    executor: QueryExecutor,
    catalog: FilterCatalog
}

impl SalesQuery {
    pub fn new(source: Arc<dyn RecordSource>, catalog_ttl: Duration) -> Self {
        Self {
            executor: QueryExecutor::new(source.clone()),
            catalog: FilterCatalog::new(source.clone(), catalog_ttl),
            source
        }
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.executor = self.executor.with_reference_date(date);
        self
    }

    pub async fn query(&self, request: &FilterRequest) -> Result<ResultEnvelope, SalesError> {
        self.executor.execute(request).await
    }

    pub async fn filter_options(&self) -> Result<Arc<FilterCatalogSnapshot>, SalesError> {
        self.catalog.snapshot().await
    }

    /// Number of records in the source; fails if it cannot be read.
    pub async fn health(&self) -> Result<u64, SalesError> {
        self.source.count(&CompiledFilter::unrestricted()).await
    }

    /// Reloads the dataset and rebuilds filter options on next use.
    pub async fn refresh(&self) {
        info!("Refreshing sales data");
        self.source.refresh().await;
        self.catalog.invalidate().await;
    }
}
