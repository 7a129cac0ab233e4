use std::cmp::Ordering;

use crate::models::SaleRecord;

/// Logical sort columns exposed to the dashboard.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SortKey {
    Date,
    CustomerName,
    Quantity,
    TotalAmount,
    FinalAmount
}

impl SortKey {
    /// Maps a `sortBy` parameter. Unknown or absent keys sort by date.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("customerName") => SortKey::CustomerName,
            Some("quantity") => SortKey::Quantity,
            Some("total") => SortKey::TotalAmount,
            Some("final") => SortKey::FinalAmount,
            _ => SortKey::Date
        }
    }

    /// Names sort A to Z; everything else shows the largest or newest first.
    pub fn default_order(self) -> SortOrder {
        match self {
            SortKey::CustomerName => SortOrder::Ascending,
            _ => SortOrder::Descending
        }
    }

    fn sql_expression(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::CustomerName => "LOWER(customer_name)",
            SortKey::Quantity => "quantity",
            SortKey::TotalAmount => "total_amount",
            SortKey::FinalAmount => "final_amount"
        }
    }

    /// Names compare after ASCII-only lowercasing, the same folding SQLite's `LOWER` applies.
    fn compare(self, left: &SaleRecord, right: &SaleRecord) -> Ordering {
        match self {
            SortKey::Date => left.date.cmp(&right.date),
            SortKey::CustomerName => left.customer_name.to_ascii_lowercase().cmp(&right.customer_name.to_ascii_lowercase()),
            SortKey::Quantity => left.quantity.cmp(&right.quantity),
            SortKey::TotalAmount => left.total_amount.cmp(&right.total_amount),
            SortKey::FinalAmount => left.final_amount.cmp(&right.final_amount)
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SortOrder {
    Ascending,
    Descending
}

impl SortOrder {
    /// Parses `asc` or `desc` in any case. Anything else is treated as unspecified.
    pub fn from_param(value: Option<&str>) -> Option<Self> {
        let value = value?.trim();

        if value.eq_ignore_ascii_case("asc") {
            Some(SortOrder::Ascending)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(SortOrder::Descending)
        } else {
            None
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC"
        }
    }
}

/// A resolved ordering. Ties always fall back to ascending transaction identifier so that
/// every backend pages through equal keys identically.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder
}

impl SortSpec {
    /// The key is resolved first so that an omitted direction takes that key's default.
    pub fn resolve(sort_by: Option<&str>, sort_order: Option<&str>) -> Self {
        let key = SortKey::from_param(sort_by);
        let order = SortOrder::from_param(sort_order).unwrap_or_else(|| key.default_order());

        Self { key, order }
    }

    pub fn compare(&self, left: &SaleRecord, right: &SaleRecord) -> Ordering {
        let primary = match self.order {
            SortOrder::Ascending => self.key.compare(left, right),
            SortOrder::Descending => self.key.compare(right, left)
        };

        primary.then_with(|| left.transaction_id.cmp(&right.transaction_id))
    }

    pub fn order_by_clause(&self) -> String {
        format!("ORDER BY {} {}, transaction_id ASC", self.key.sql_expression(), self.order.keyword())
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}
