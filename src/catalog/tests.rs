use super::{decompose_tags, FilterCatalog};
use crate::filters::CompiledFilter;
use crate::models::{FacetField, SaleRecord, SalesError};
use crate::query::{Aggregates, SortSpec};
use crate::storage::{MemorySource, RecordSource};
use crate::test_support::sale;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Counts how often the catalog reaches the underlying source.
struct CountingSource {
    inner: MemorySource,
    lookups: AtomicUsize
}

impl CountingSource {
    fn new(records: Vec<SaleRecord>) -> Arc<Self> {
        Arc::new(Self {
            inner: MemorySource::from_records(records),
            lookups: AtomicUsize::new(0)
        })
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for CountingSource {
    async fn count(&self, filter: &CompiledFilter) -> Result<u64, SalesError> {
        self.inner.count(filter).await
    }

    async fn page(&self, filter: &CompiledFilter, sort: SortSpec, offset: u64, limit: u32) -> Result<Vec<SaleRecord>, SalesError> {
        self.inner.page(filter, sort, offset, limit).await
    }

    async fn aggregate(&self, filter: &CompiledFilter) -> Result<Aggregates, SalesError> {
        self.inner.aggregate(filter).await
    }

    async fn distinct_values(&self, field: FacetField) -> Result<Vec<String>, SalesError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.distinct_values(field).await
    }
}

fn records() -> Vec<SaleRecord> {
    vec![
        SaleRecord { customer_region: "West".to_string(), tags: "organic,sale".to_string(), ..sale("1") },
        SaleRecord { customer_region: "North".to_string(), tags: "sale, gift".to_string(), payment_method: "Cash".to_string(), ..sale("2") },
        SaleRecord { customer_region: "".to_string(), tags: "".to_string(), product_category: "Beauty".to_string(), ..sale("3") },
        SaleRecord { gender: "Male".to_string(), tags: "organic".to_string(), ..sale("4") }
    ]
}

#[test]
fn test_decompose_tags_splits_and_deduplicates() {
    assert_eq!(decompose_tags(["a,b", "b,c"]), vec!["a", "b", "c"]);
    assert_eq!(decompose_tags(["gift, sale", " sale ,", ""]), vec!["gift", "sale"]);
    assert!(decompose_tags(Vec::<String>::new()).is_empty());
}

#[tokio::test]
async fn test_snapshot_lists_every_facet() -> Result<()> {
    let catalog = FilterCatalog::new(CountingSource::new(records()), Duration::from_secs(60));

    let snapshot = catalog.snapshot().await?;

    assert_eq!(snapshot.regions, vec!["East", "North", "West"]);
    assert_eq!(snapshot.genders, vec!["Female", "Male"]);
    assert_eq!(snapshot.categories, vec!["Beauty", "Clothing"]);
    assert_eq!(snapshot.payment_methods, vec!["Cash", "UPI"]);
    assert_eq!(snapshot.tags, vec!["gift", "organic", "sale"]);
    assert_eq!(snapshot.age_ranges, vec!["18-25", "26-35", "36-45", "46-55", "56+"]);
    assert_eq!(snapshot.date_ranges, vec!["Last 7 days", "Last 30 days", "Last 90 days", "Last year"]);

    Ok(())
}

#[tokio::test]
async fn test_snapshot_serializes_with_dashboard_keys() -> Result<()> {
    let catalog = FilterCatalog::new(CountingSource::new(records()), Duration::from_secs(60));

    let json = serde_json::to_value(&*catalog.snapshot().await?)?;

    for key in ["regions", "genders", "ageRanges", "categories", "tags", "paymentMethods", "dateRanges"] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }

    Ok(())
}

#[tokio::test]
async fn test_snapshot_is_cached_until_invalidated() -> Result<()> {
    let source = CountingSource::new(records());
    let catalog = FilterCatalog::new(source.clone(), Duration::from_secs(60));

    let first = catalog.snapshot().await?;
    let lookups = source.lookups();
    let second = catalog.snapshot().await?;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(source.lookups(), lookups);

    catalog.invalidate().await;
    let third = catalog.snapshot().await?;

    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(source.lookups(), lookups * 2);
    assert_eq!(*first, *third);

    Ok(())
}

#[tokio::test]
async fn test_snapshot_expires_after_ttl() -> Result<()> {
    let source = CountingSource::new(records());
    let catalog = FilterCatalog::new(source.clone(), Duration::from_millis(20));

    catalog.snapshot().await?;
    let lookups = source.lookups();

    tokio::time::sleep(Duration::from_millis(150)).await;
    catalog.snapshot().await?;

    assert_eq!(source.lookups(), lookups * 2);

    Ok(())
}

#[tokio::test]
async fn test_failed_build_is_not_cached() -> Result<()> {
    let directory = tempfile::tempdir()?;
    let path = directory.path().join("sales.csv");
    let catalog = FilterCatalog::new(Arc::new(MemorySource::from_csv(&path)), Duration::from_secs(60));

    assert!(matches!(catalog.snapshot().await, Err(SalesError::SourceUnavailable(_))));

    std::fs::write(&path, "Transaction ID,Date,Customer Region\nT1,2024-01-01,South\n")?;

    assert_eq!(catalog.snapshot().await?.regions, vec!["South"]);

    Ok(())
}
