use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::task::spawn_blocking;

use crate::filters::CompiledFilter;
use crate::models::{FacetField, SaleRecord, SalesError};
use crate::query::{Aggregates, Evaluation, SortSpec};
use crate::storage::dataset::{Dataset, DatasetHandle};
use crate::storage::RecordSource;

/// Record source over a dataset held in memory.
#[derive(Clone)]
pub struct MemorySource {
    dataset: DatasetHandle
}

impl MemorySource {
    pub fn new(dataset: DatasetHandle) -> Self {
        Self { dataset }
    }

    pub fn from_csv(path: impl Into<PathBuf>) -> Self {
        Self::new(DatasetHandle::from_csv(path))
    }

    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self::new(DatasetHandle::from_records(records))
    }

    pub fn dataset(&self) -> &DatasetHandle {
        &self.dataset
    }

    /// Runs a full pass over the snapshot on a blocking thread.
    pub(crate) async fn scan<T, F>(&self, work: F) -> Result<T, SalesError>
    where
        T: Send + 'static,
        F: FnOnce(&Dataset) -> T + Send + 'static,
    {
        let dataset = self.dataset.get().await?;

        spawn_blocking(move || work(&dataset))
            .await
            .map_err(|error| SalesError::internal(format!("dataset scan task failed: {error}")))
    }
}

fn sorted_page(mut matching: Vec<&SaleRecord>, sort: SortSpec, offset: u64, limit: u32) -> Vec<SaleRecord> {
    matching.sort_by(|left, right| sort.compare(left, right));

    let offset = usize::try_from(offset).unwrap_or(usize::MAX);

    matching.into_iter()
        .skip(offset)
        .take(limit as usize)
        .cloned()
        .collect()
}

fn evaluate_snapshot(dataset: &Dataset, filter: &CompiledFilter, sort: SortSpec, offset: u64, limit: u32) -> Evaluation {
    let matching: Vec<&SaleRecord> = dataset.iter().filter(|record| filter.matches(record)).collect();
    let aggregates: Aggregates = matching.iter().copied().collect();
    let total = matching.len() as u64;

    Evaluation {
        records: sorted_page(matching, sort, offset, limit),
        total,
        aggregates
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn count(&self, filter: &CompiledFilter) -> Result<u64, SalesError> {
        let filter = filter.clone();

        self.scan(move |dataset| dataset.iter().filter(|record| filter.matches(record)).count() as u64).await
    }

    async fn page(&self, filter: &CompiledFilter, sort: SortSpec, offset: u64, limit: u32) -> Result<Vec<SaleRecord>, SalesError> {
        let filter = filter.clone();

        self.scan(move |dataset| {
            let matching = dataset.iter().filter(|record| filter.matches(record)).collect();
            sorted_page(matching, sort, offset, limit)
        })
        .await
    }

    async fn aggregate(&self, filter: &CompiledFilter) -> Result<Aggregates, SalesError> {
        let filter = filter.clone();

        self.scan(move |dataset| dataset.iter().filter(|record| filter.matches(record)).collect()).await
    }

    async fn distinct_values(&self, field: FacetField) -> Result<Vec<String>, SalesError> {
        self.scan(move |dataset| {
            let values: BTreeSet<&str> = dataset.iter()
                .map(|record| record.facet_value(field))
                .filter(|value| !value.is_empty())
                .collect();

            values.into_iter().map(str::to_string).collect()
        })
        .await
    }

    /// Filters once, accumulates over the full match set, then sorts and slices.
    async fn evaluate(&self, filter: &CompiledFilter, sort: SortSpec, offset: u64, limit: u32) -> Result<Evaluation, SalesError> {
        let filter = filter.clone();

        self.scan(move |dataset| evaluate_snapshot(dataset, &filter, sort, offset, limit)).await
    }

    async fn refresh(&self) {
        self.dataset.refresh().await;
    }
}
