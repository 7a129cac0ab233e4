//! Response bodies.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::SaleRecord;
use crate::query::{Aggregates, Pagination, ResultEnvelope};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesMetadata {
    #[serde(flatten)]
    pub aggregates: Aggregates,
    /// Total amount over the records on this page.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_order_value: Decimal
}

#[derive(Debug, Serialize)]
pub struct SalesResponse {
    pub data: Vec<SaleRecord>,
    pub pagination: Pagination,
    pub metadata: SalesMetadata
}

impl From<ResultEnvelope> for SalesResponse {
    fn from(envelope: ResultEnvelope) -> Self {
        let avg_order_value = envelope.average_order_value();

        Self {
            data: envelope.data,
            pagination: envelope.pagination,
            metadata: SalesMetadata {
                aggregates: envelope.metadata,
                avg_order_value
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub records: u64
}
