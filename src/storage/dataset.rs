use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::future::Cache;
use tracing::info;

use crate::models::{SaleRecord, SalesError};
use crate::storage::loader::load_csv;

/// An immutable, shared snapshot of every sales record.
pub type Dataset = Arc<Vec<SaleRecord>>;

#[derive(Debug, Clone)]
enum Origin {
    Csv(PathBuf),
    Records(Dataset)
}

/// Lazily loaded dataset with single-flight initialization.
///
/// The first callers of [`DatasetHandle::get`] share one in-flight load; later callers get
/// the cached snapshot. A failed load is not cached, so the next call retries. The snapshot
/// is only replaced after an explicit [`DatasetHandle::refresh`].
#[derive(Clone)]
pub struct DatasetHandle {
    origin: Origin,
    snapshot: Cache<(), Dataset>,
    loads: Arc<AtomicU64>
}

impl DatasetHandle {
    pub fn from_csv(path: impl Into<PathBuf>) -> Self {
        Self::with_origin(Origin::Csv(path.into()))
    }

    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        Self::with_origin(Origin::Records(Arc::new(records)))
    }

    fn with_origin(origin: Origin) -> Self {
        Self {
            origin,
            snapshot: Cache::builder().max_capacity(1).build(),
            loads: Arc::new(AtomicU64::new(0))
        }
    }

    pub async fn get(&self) -> Result<Dataset, SalesError> {
        self.snapshot.try_get_with((), self.load())
            .await
            .map_err(|error| SalesError::clone(&error))
    }

    pub async fn refresh(&self) {
        info!("Invalidating loaded sales dataset");
        self.snapshot.invalidate(&()).await;
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.contains_key(&())
    }

    /// Number of loads started so far, failed ones included.
    pub fn load_count(&self) -> u64 {
        self.loads.load(Ordering::Acquire)
    }

    async fn load(&self) -> Result<Dataset, SalesError> {
        let attempt = self.loads.fetch_add(1, Ordering::AcqRel) + 1;
        info!("Loading sales dataset (attempt {attempt})");

        match &self.origin {
            Origin::Csv(path) => Ok(Arc::new(load_csv(path.clone()).await?)),
            Origin::Records(records) => Ok(records.clone())
        }
    }
}
