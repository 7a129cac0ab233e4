use std::env;
use std::error::Error;
use std::fs::{create_dir_all, File};
use std::io::{stdout, BufWriter, Write};
use std::path::Path;

use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;

const REGIONS: [&str; 5] = ["North", "South", "East", "West", "Central"];
const GENDERS: [&str; 2] = ["Male", "Female"];
const CUSTOMER_TYPES: [&str; 3] = ["New", "Returning", "Loyal"];
const PAYMENT_METHODS: [&str; 6] = ["Cash", "Credit Card", "Debit Card", "UPI", "Wallet", "Net Banking"];
const ORDER_STATUSES: [&str; 4] = ["Completed", "Pending", "Cancelled", "Returned"];
const DELIVERY_TYPES: [&str; 3] = ["Standard", "Express", "Store Pickup"];
const STORE_LOCATIONS: [&str; 6] = ["Mumbai", "Delhi", "Bengaluru", "Chennai", "Kolkata", "Pune"];
const FIRST_NAMES: [&str; 10] = ["Aarav", "Diya", "Kabir", "Meera", "Rohan", "Sara", "Vikram", "Anaya", "Arjun", "Isha"];
const LAST_NAMES: [&str; 8] = ["Sharma", "Patel", "Reddy", "Iyer", "Khan", "Gupta", "Das", "Mehta"];
const EMPLOYEES: [&str; 5] = ["Harsh Agarwal", "Nisha Rao", "Tarun Bose", "Pooja Nair", "Imran Sheikh"];

/// Category, tag pool and product/brand pairs.
const CATALOG: [(&str, [&str; 4], [(&str, &str); 3]); 4] = [
    ("Electronics", ["wireless", "gadgets", "smart", "accessories"], [("Wireless Earbuds", "SoundPeak"), ("Smart Watch", "Tickr"), ("Power Bank", "Voltix")]),
    ("Clothing", ["fashion", "casual", "cotton", "formal"], [("Linen Shirt", "Weave"), ("Denim Jacket", "Indigo Co"), ("Running Tee", "Stride")]),
    ("Beauty", ["skincare", "organic", "makeup", "fragrance-free"], [("Vitamin C Serum", "Glow Lab"), ("Matte Lipstick", "Rouge"), ("Face Wash", "PureLeaf")]),
    ("Home", ["kitchen", "decor", "eco-friendly", "essentials"], [("Steel Bottle", "Hydra"), ("Table Lamp", "Lumen"), ("Cotton Towels", "SoftNest")])
];

#[derive(Serialize)]
struct DatasetRow {
    #[serde(rename = "Transaction ID")]
    transaction_id: String,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Customer ID")]
    customer_id: String,
    #[serde(rename = "Customer Name")]
    customer_name: String,
    #[serde(rename = "Phone Number")]
    phone_number: String,
    #[serde(rename = "Gender")]
    gender: &'static str,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Customer Region")]
    customer_region: &'static str,
    #[serde(rename = "Customer Type")]
    customer_type: &'static str,
    #[serde(rename = "Product ID")]
    product_id: String,
    #[serde(rename = "Product Name")]
    product_name: &'static str,
    #[serde(rename = "Brand")]
    brand: &'static str,
    #[serde(rename = "Product Category")]
    product_category: &'static str,
    #[serde(rename = "Tags")]
    tags: String,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "Price per Unit")]
    price_per_unit: Decimal,
    #[serde(rename = "Discount Percentage")]
    discount_percentage: u32,
    #[serde(rename = "Total Amount")]
    total_amount: Decimal,
    #[serde(rename = "Final Amount")]
    final_amount: Decimal,
    #[serde(rename = "Payment Method")]
    payment_method: &'static str,
    #[serde(rename = "Order Status")]
    order_status: &'static str,
    #[serde(rename = "Delivery Type")]
    delivery_type: &'static str,
    #[serde(rename = "Store ID")]
    store_id: String,
    #[serde(rename = "Store Location")]
    store_location: &'static str,
    #[serde(rename = "Salesperson ID")]
    salesperson_id: String,
    #[serde(rename = "Employee Name")]
    employee_name: &'static str
}

struct GeneratorConfig {
    num_records: usize,
    output_path: String
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
        let output_path = args.get(2).cloned().unwrap_or_else(|| "sales_dataset.csv".to_string());

        Self { num_records, output_path }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = GeneratorConfig::from_args();

    println!("Generating {} sales records in {}...", config.num_records, config.output_path);

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    let mut rng = rand::thread_rng();
    let first_day = NaiveDate::from_ymd_opt(2023, 1, 1).ok_or("invalid start date")?;

    for index in 1..=config.num_records {
        writer.serialize(generate_row(&mut rng, index, first_day))?;

        if index % 100_000 == 0 {
            print!(".");
            stdout().flush()?;
        }
    }

    writer.flush()?;
    println!("\nGeneration complete.");

    Ok(())
}

fn pick<R: Rng>(rng: &mut R, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or_default()
}

fn generate_row<R: Rng>(rng: &mut R, index: usize, first_day: NaiveDate) -> DatasetRow {
    let (category, tag_pool, products) = CATALOG[rng.gen_range(0..CATALOG.len())];
    let product_index = rng.gen_range(0..products.len());
    let (product_name, brand) = products[product_index];

    let tag_count = rng.gen_range(1..=3);
    let tags: Vec<&str> = tag_pool.choose_multiple(rng, tag_count).copied().collect();

    let quantity = rng.gen_range(1..=10);
    let price_per_unit = Decimal::new(rng.gen_range(99..=49_999), 2);
    let discount_percentage = if rng.gen_bool(0.6) { rng.gen_range(5..=40) } else { 0 };
    let total_amount = price_per_unit * Decimal::from(quantity);
    let final_amount = (total_amount * Decimal::from(100 - discount_percentage) / Decimal::ONE_HUNDRED).round_dp(2);
    let customer = rng.gen_range(1..=index.div_ceil(3).max(1));
    let store = rng.gen_range(0..STORE_LOCATIONS.len());
    let employee = rng.gen_range(0..EMPLOYEES.len());

    DatasetRow {
        transaction_id: format!("TXN{index:08}"),
        date: first_day + Days::new(rng.gen_range(0..730)),
        customer_id: format!("CUST{customer:06}"),
        customer_name: format!("{} {}", pick(rng, &FIRST_NAMES), pick(rng, &LAST_NAMES)),
        phone_number: format!("{}{:09}", rng.gen_range(6..=9), rng.gen_range(0..1_000_000_000u64)),
        gender: pick(rng, &GENDERS),
        age: rng.gen_range(18..=70),
        customer_region: pick(rng, &REGIONS),
        customer_type: pick(rng, &CUSTOMER_TYPES),
        product_id: format!("PROD-{}-{product_index}", &category[..3].to_ascii_uppercase()),
        product_name,
        brand,
        product_category: category,
        tags: tags.join(","),
        quantity,
        price_per_unit,
        discount_percentage,
        total_amount,
        final_amount,
        payment_method: pick(rng, &PAYMENT_METHODS),
        order_status: pick(rng, &ORDER_STATUSES),
        delivery_type: pick(rng, &DELIVERY_TYPES),
        store_id: format!("ST{:03}", store + 1),
        store_location: STORE_LOCATIONS[store],
        salesperson_id: format!("SP{:03}", employee + 1),
        employee_name: EMPLOYEES[employee]
    }
}
