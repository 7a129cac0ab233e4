use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::SaleRecord;

/// A fully populated record with neutral defaults; override fields with struct update syntax.
pub fn sale(transaction_id: &str) -> SaleRecord {
    SaleRecord {
        transaction_id: transaction_id.to_string(),
        date: date("2024-01-15"),
        customer_id: format!("CUST-{transaction_id}"),
        customer_name: "Alex Morgan".to_string(),
        phone_number: "9876543210".to_string(),
        gender: "Female".to_string(),
        age: 30,
        customer_region: "East".to_string(),
        product_id: "PROD-1".to_string(),
        product_category: "Clothing".to_string(),
        product_name: "Linen Shirt".to_string(),
        brand: "Northwind".to_string(),
        quantity: 1,
        price_per_unit: Decimal::new(10_000, 2),
        total_amount: Decimal::new(10_000, 2),
        final_amount: Decimal::new(9_000, 2),
        discount_percentage: Decimal::new(1_000, 2),
        payment_method: "UPI".to_string(),
        tags: "casual".to_string(),
        employee_name: "Jordan Lee".to_string(),
        customer_type: "Returning".to_string(),
        order_status: "Completed".to_string(),
        delivery_type: "Standard".to_string(),
        store_id: "ST-1".to_string(),
        store_location: "Mumbai".to_string(),
        salesperson_id: "SP-1".to_string()
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test dates are ISO formatted")
}
