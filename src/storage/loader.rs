use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::task::spawn_blocking;
use tracing::{info, warn};

use crate::models::{SaleRecord, SalesError};

const PROGRESS_INTERVAL: usize = 100_000;

/// One row of the exported sales CSV. Every column is optional and read as text so that a
/// sparse row still loads with defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvSaleRow {
    #[serde(rename = "Transaction ID")]
    transaction_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Phone Number")]
    phone_number: String,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Age")]
    age: String,
    #[serde(rename = "Customer Region")]
    customer_region: String,
    #[serde(rename = "Customer Type")]
    customer_type: String,
    #[serde(rename = "Product ID")]
    product_id: String,
    #[serde(rename = "Product Name")]
    product_name: String,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Product Category")]
    product_category: String,
    #[serde(rename = "Tags")]
    tags: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Price per Unit")]
    price_per_unit: String,
    #[serde(rename = "Discount Percentage")]
    discount_percentage: String,
    #[serde(rename = "Total Amount")]
    total_amount: String,
    #[serde(rename = "Final Amount")]
    final_amount: String,
    #[serde(rename = "Payment Method")]
    payment_method: String,
    #[serde(rename = "Order Status")]
    order_status: String,
    #[serde(rename = "Delivery Type")]
    delivery_type: String,
    #[serde(rename = "Store ID")]
    store_id: String,
    #[serde(rename = "Store Location")]
    store_location: String,
    #[serde(rename = "Salesperson ID")]
    salesperson_id: String,
    #[serde(rename = "Employee Name")]
    employee_name: String
}

impl CsvSaleRow {
    /// Numeric columns that fail to parse become zero. Only the date is mandatory.
    fn into_record(self) -> Result<SaleRecord, String> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|error| format!("unparsable date [{}]: {error}", self.date))?;

        Ok(SaleRecord {
            age: lenient(&self.age),
            quantity: lenient(&self.quantity),
            price_per_unit: lenient_decimal(&self.price_per_unit),
            total_amount: lenient_decimal(&self.total_amount),
            final_amount: lenient_decimal(&self.final_amount),
            discount_percentage: lenient_decimal(&self.discount_percentage),
            transaction_id: self.transaction_id,
            date,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            gender: self.gender,
            customer_region: self.customer_region,
            product_id: self.product_id,
            product_category: self.product_category,
            product_name: self.product_name,
            brand: self.brand,
            payment_method: self.payment_method,
            tags: self.tags,
            employee_name: self.employee_name,
            customer_type: self.customer_type,
            order_status: self.order_status,
            delivery_type: self.delivery_type,
            store_id: self.store_id,
            store_location: self.store_location,
            salesperson_id: self.salesperson_id
        })
    }
}

fn lenient<T: FromStr + Default>(value: &str) -> T {
    value.parse().unwrap_or_default()
}

fn lenient_decimal(value: &str) -> Decimal {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .unwrap_or_default()
}

/// Reads the whole sales CSV on a blocking thread.
///
/// A missing or unreadable file is `SourceUnavailable`. Rows that fail to deserialize or
/// carry no valid date are logged and skipped.
pub async fn load_csv(path: PathBuf) -> Result<Vec<SaleRecord>, SalesError> {
    spawn_blocking(move || read_csv(&path))
        .await
        .map_err(|error| SalesError::internal(format!("CSV loader task failed: {error}")))?
}

/// Short rows are padded with empty fields so missing trailing columns take their defaults.
fn pad_to(mut record: StringRecord, width: usize) -> StringRecord {
    while record.len() < width {
        record.push_field("");
    }

    record
}

fn read_csv(path: &Path) -> Result<Vec<SaleRecord>, SalesError> {
    let timer = Instant::now();
    let file = File::open(path).map_err(|error| {
        SalesError::source_unavailable(format!("cannot open sales CSV at [{}]: {error}", path.display()))
    })?;

    info!("Loading sales CSV from [{}]", path.display());

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()
        .map_err(|error| SalesError::source_unavailable(format!("cannot read sales CSV header at [{}]: {error}", path.display())))?
        .clone();

    let mut records = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let row = match result.and_then(|record| pad_to(record, headers.len()).deserialize::<CsvSaleRow>(Some(&headers))) {
            Ok(row) => row,
            Err(error) => {
                warn!("Skipping CSV row [{}]: {error}", index + 1);
                continue;
            }
        };

        match row.into_record() {
            Ok(record) => records.push(record),
            Err(reason) => warn!("Skipping CSV row [{}]: {reason}", index + 1)
        }

        if (index + 1) % PROGRESS_INTERVAL == 0 {
            info!("Processed {} rows...", index + 1);
        }
    }

    info!("Loaded {} sales records in {:?}", records.len(), timer.elapsed());

    Ok(records)
}
