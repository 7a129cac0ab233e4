use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::FacetField;
use crate::types::{Age, Quantity, TransactionId};

/// A single sales transaction.
///
/// Field names on the wire are fixed by existing dashboard consumers and must not change.
/// Currency values serialize as JSON numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(rename = "Transaction ID")]
    pub transaction_id: TransactionId,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Customer ID")]
    pub customer_id: String,
    #[serde(rename = "Customer name")]
    pub customer_name: String,
    #[serde(rename = "Phone Number")]
    pub phone_number: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age")]
    pub age: Age,
    #[serde(rename = "Customer region")]
    pub customer_region: String,
    #[serde(rename = "Product ID")]
    pub product_id: String,
    #[serde(rename = "Product Category")]
    pub product_category: String,
    #[serde(rename = "Product Name")]
    pub product_name: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "Quantity")]
    pub quantity: Quantity,
    #[serde(rename = "Price per Unit", with = "rust_decimal::serde::float")]
    pub price_per_unit: Decimal,
    #[serde(rename = "Total Amount", with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(rename = "Final Amount", with = "rust_decimal::serde::float")]
    pub final_amount: Decimal,
    #[serde(rename = "Discount Percentage", with = "rust_decimal::serde::float")]
    pub discount_percentage: Decimal,
    #[serde(rename = "Payment Method")]
    pub payment_method: String,
    /// Comma-joined labels, e.g. `"organic,sale"`.
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Employee name")]
    pub employee_name: String,
    #[serde(rename = "Customer Type")]
    pub customer_type: String,
    #[serde(rename = "Order Status")]
    pub order_status: String,
    #[serde(rename = "Delivery Type")]
    pub delivery_type: String,
    #[serde(rename = "Store ID")]
    pub store_id: String,
    #[serde(rename = "Store Location")]
    pub store_location: String,
    #[serde(rename = "Salesperson ID")]
    pub salesperson_id: String
}

impl SaleRecord {
    /// Amount knocked off the total (`total - final`).
    pub fn discount(&self) -> Decimal {
        self.total_amount - self.final_amount
    }

    pub fn facet_value(&self, field: FacetField) -> &str {
        match field {
            FacetField::Region => &self.customer_region,
            FacetField::Gender => &self.gender,
            FacetField::Category => &self.product_category,
            FacetField::PaymentMethod => &self.payment_method,
            FacetField::Tags => &self.tags
        }
    }
}
