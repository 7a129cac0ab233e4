use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::SaleRecord;

/// Sums over every record matching a filter, independent of paging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    pub total_units: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_discount: Decimal
}

impl Aggregates {
    pub fn accumulate(&mut self, record: &SaleRecord) {
        self.total_units += u64::from(record.quantity);
        self.total_amount += record.total_amount;
        self.total_discount += record.discount();
    }
}

impl<'a> FromIterator<&'a SaleRecord> for Aggregates {
    fn from_iter<I: IntoIterator<Item = &'a SaleRecord>>(records: I) -> Self {
        let mut aggregates = Aggregates::default();

        for record in records {
            aggregates.accumulate(record);
        }

        aggregates
    }
}

/// Everything a record source returns for one listing request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub records: Vec<SaleRecord>,
    pub total: u64,
    pub aggregates: Aggregates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64
}

impl Pagination {
    /// `total_pages` is `ceil(total_items / page_size)` but never less than 1, so an empty
    /// result still reports a single (empty) page.
    pub fn new(page: u32, page_size: u32, total_items: u64) -> Self {
        let page_size = page_size.max(1);

        Self {
            page,
            page_size,
            total_items,
            total_pages: total_items.div_ceil(u64::from(page_size)).max(1)
        }
    }
}

/// One page of matching records with totals for the whole match set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEnvelope {
    pub data: Vec<SaleRecord>,
    pub pagination: Pagination,
    pub metadata: Aggregates
}

impl ResultEnvelope {
    /// Total amount of the whole match set divided by the number of records on this page.
    ///
    /// The denominator is the page length, not the match count. Zero for an empty page.
    pub fn average_order_value(&self) -> Decimal {
        if self.data.is_empty() {
            return Decimal::ZERO;
        }

        (self.metadata.total_amount / Decimal::from(self.data.len() as u64)).round_dp(2)
    }
}
