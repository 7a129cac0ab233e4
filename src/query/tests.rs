use super::{Pagination, QueryExecutor, SortKey, SortOrder, SortSpec};
use crate::filters::FilterRequest;
use crate::models::{SaleRecord, SalesError};
use crate::storage::MemorySource;
use crate::test_support::{date, sale};

use anyhow::Result;
use rust_decimal::Decimal;
use std::sync::Arc;

/// 25 records, 10 of them in the North region, with varied quantities and amounts.
fn dataset() -> Vec<SaleRecord> {
    (1..=25)
        .map(|index: u32| SaleRecord {
            customer_region: if index % 5 < 2 { "North".to_string() } else { "South".to_string() },
            customer_name: format!("Customer {:02}", 26 - index),
            quantity: index % 7 + 1,
            total_amount: Decimal::from(index * 10),
            final_amount: Decimal::from(index * 9),
            date: date("2024-01-01") + chrono::Days::new(u64::from(index)),
            ..sale(&format!("T-{index:02}"))
        })
        .collect()
}

fn executor() -> QueryExecutor {
    QueryExecutor::new(Arc::new(MemorySource::from_records(dataset()))).with_reference_date(date("2024-03-31"))
}

fn ids(records: &[SaleRecord]) -> Vec<&str> {
    records.iter().map(|record| record.transaction_id.as_str()).collect()
}

#[test]
fn test_sort_spec_defaults_depend_on_key() {
    assert_eq!(SortSpec::resolve(Some("customerName"), None).order, SortOrder::Ascending);
    assert_eq!(SortSpec::resolve(Some("date"), None).order, SortOrder::Descending);
    assert_eq!(SortSpec::resolve(Some("quantity"), None).order, SortOrder::Descending);
    assert_eq!(SortSpec::resolve(Some("customerName"), Some("DESC")).order, SortOrder::Descending);
    assert_eq!(SortSpec::resolve(Some("quantity"), Some("asc")).order, SortOrder::Ascending);
    assert_eq!(SortSpec::resolve(Some("customerName"), Some("sideways")).order, SortOrder::Ascending);
}

#[test]
fn test_unknown_sort_key_falls_back_to_date() {
    assert_eq!(SortSpec::resolve(Some("price"), None), SortSpec { key: SortKey::Date, order: SortOrder::Descending });
    assert_eq!(SortSpec::default().key, SortKey::Date);
    assert_eq!(SortKey::from_param(Some("total")), SortKey::TotalAmount);
    assert_eq!(SortKey::from_param(Some("final")), SortKey::FinalAmount);
}

#[test]
fn test_sort_ties_break_on_transaction_id() {
    let spec = SortSpec::resolve(Some("quantity"), None);
    let mut records = vec![sale("B"), sale("C"), sale("A")];

    records.sort_by(|left, right| spec.compare(left, right));

    assert_eq!(ids(&records), vec!["A", "B", "C"]);
    assert_eq!(spec.order_by_clause(), "ORDER BY quantity DESC, transaction_id ASC");
}

#[test]
fn test_pagination_rounds_up_and_never_reports_zero_pages() {
    assert_eq!(Pagination::new(1, 4, 10).total_pages, 3);
    assert_eq!(Pagination::new(1, 5, 10).total_pages, 2);
    assert_eq!(Pagination::new(1, 10, 0).total_pages, 1);
}

#[tokio::test]
async fn test_region_filter_scenario_paginates_matches() -> Result<()> {
    let request = FilterRequest {
        regions: vec!["North".to_string()],
        page: 1,
        page_size: 4,
        ..FilterRequest::default()
    };
    let envelope = executor().execute(&request).await?;

    assert_eq!(envelope.data.len(), 4);
    assert_eq!(envelope.pagination.total_items, 10);
    assert_eq!(envelope.pagination.total_pages, 3);
    assert!(envelope.data.iter().all(|record| record.customer_region == "North"));

    Ok(())
}

#[tokio::test]
async fn test_no_matches_is_an_empty_successful_result() -> Result<()> {
    let request = FilterRequest { categories: vec!["Nonexistent".to_string()], ..FilterRequest::default() };
    let envelope = executor().execute(&request).await?;

    assert!(envelope.data.is_empty());
    assert_eq!(envelope.pagination.total_items, 0);
    assert_eq!(envelope.metadata.total_units, 0);
    assert!(envelope.metadata.total_amount.is_zero());
    assert!(envelope.metadata.total_discount.is_zero());
    assert!(envelope.average_order_value().is_zero());

    Ok(())
}

#[tokio::test]
async fn test_aggregates_ignore_page_size_and_number() -> Result<()> {
    let small = FilterRequest { regions: vec!["South".to_string()], page_size: 5, page: 2, ..FilterRequest::default() };
    let large = FilterRequest { page_size: 1000, page: 1, ..small.clone() };

    let small_envelope = executor().execute(&small).await?;
    let large_envelope = executor().execute(&large).await?;

    assert_eq!(small_envelope.data.len(), 5);
    assert_eq!(large_envelope.data.len(), 15);
    assert_eq!(small_envelope.metadata, large_envelope.metadata);

    let expected_units: u64 = large_envelope.data.iter().map(|record| u64::from(record.quantity)).sum();
    assert_eq!(large_envelope.metadata.total_units, expected_units);

    let expected_discount: Decimal = large_envelope.data.iter().map(SaleRecord::discount).sum();
    assert_eq!(large_envelope.metadata.total_discount, expected_discount);

    Ok(())
}

#[tokio::test]
async fn test_page_past_the_end_is_empty_with_true_totals() -> Result<()> {
    let request = FilterRequest { regions: vec!["North".to_string()], page: 9, page_size: 4, ..FilterRequest::default() };
    let envelope = executor().execute(&request).await?;

    assert!(envelope.data.is_empty());
    assert_eq!(envelope.pagination.page, 9);
    assert_eq!(envelope.pagination.total_items, 10);
    assert_eq!(envelope.pagination.total_pages, 3);
    assert_eq!(envelope.metadata.total_units, executor().execute(&FilterRequest { page: 1, ..request }).await?.metadata.total_units);

    Ok(())
}

#[tokio::test]
async fn test_zero_page_size_pages_by_one_record() -> Result<()> {
    let request = FilterRequest { page: 5, page_size: 0, ..FilterRequest::default() };
    let envelope = executor().execute(&request).await?;

    assert_eq!(ids(&envelope.data), vec!["T-21"]);
    assert_eq!(envelope.pagination.page, 5);
    assert_eq!(envelope.pagination.page_size, 1);
    assert_eq!(envelope.pagination.total_pages, 25);
    assert_eq!(request.offset(), 4);

    Ok(())
}

#[tokio::test]
async fn test_default_sort_orders_per_key() -> Result<()> {
    let by_name = FilterRequest { sort_by: Some("customerName".to_string()), page_size: 25, ..FilterRequest::default() };
    let names: Vec<String> = executor().execute(&by_name).await?.data.into_iter().map(|record| record.customer_name).collect();
    let mut sorted_names = names.clone();
    sorted_names.sort();
    assert_eq!(names, sorted_names);

    let by_date = FilterRequest { sort_by: Some("date".to_string()), page_size: 25, ..FilterRequest::default() };
    let dates: Vec<_> = executor().execute(&by_date).await?.data.into_iter().map(|record| record.date).collect();
    assert!(dates.windows(2).all(|pair| pair[0] >= pair[1]));

    let unspecified = executor().execute(&FilterRequest { page_size: 25, ..FilterRequest::default() }).await?;
    assert_eq!(unspecified.data.first().map(|record| record.transaction_id.as_str()), Some("T-25"));

    Ok(())
}

#[tokio::test]
async fn test_average_order_value_divides_by_page_length() -> Result<()> {
    let request = FilterRequest { regions: vec!["North".to_string()], page_size: 4, ..FilterRequest::default() };
    let envelope = executor().execute(&request).await?;

    let expected = (envelope.metadata.total_amount / Decimal::from(4)).round_dp(2);
    assert_eq!(envelope.average_order_value(), expected);

    Ok(())
}

#[tokio::test]
async fn test_malformed_filter_propagates_as_input_error() {
    let request = FilterRequest { age_range: Some("young".to_string()), ..FilterRequest::default() };
    let result = executor().execute(&request).await;

    assert!(matches!(result, Err(SalesError::InputMalformed { .. })));
}

#[tokio::test]
async fn test_unreachable_source_is_not_an_empty_result() {
    let executor = QueryExecutor::new(Arc::new(MemorySource::from_csv("does/not/exist.csv")));
    let result = executor.execute(&FilterRequest::default()).await;

    assert!(matches!(result, Err(SalesError::SourceUnavailable(_))));
}
