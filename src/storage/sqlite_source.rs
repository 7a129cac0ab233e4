use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Arguments, FromRow, SqlitePool};
use tracing::{debug, error};

use crate::filters::{CompiledFilter, SqlParam};
use crate::models::{FacetField, SaleRecord, SalesError};
use crate::query::{Aggregates, SortSpec};
use crate::storage::RecordSource;
use crate::types::from_minor_units;

/// Layout of the `sales` table. Currency columns hold integer minor units (cents) and
/// `discount_percentage` holds hundredths of a percent; `date` is ISO `YYYY-MM-DD` text.
pub const SALES_TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS sales (
    transaction_id TEXT PRIMARY KEY,
    date TEXT NOT NULL,
    customer_id TEXT NOT NULL DEFAULT '',
    customer_name TEXT NOT NULL DEFAULT '',
    phone_number TEXT NOT NULL DEFAULT '',
    gender TEXT NOT NULL DEFAULT '',
    age INTEGER NOT NULL DEFAULT 0,
    customer_region TEXT NOT NULL DEFAULT '',
    product_id TEXT NOT NULL DEFAULT '',
    product_category TEXT NOT NULL DEFAULT '',
    product_name TEXT NOT NULL DEFAULT '',
    brand TEXT NOT NULL DEFAULT '',
    quantity INTEGER NOT NULL DEFAULT 0,
    price_per_unit INTEGER NOT NULL DEFAULT 0,
    total_amount INTEGER NOT NULL DEFAULT 0,
    final_amount INTEGER NOT NULL DEFAULT 0,
    discount_percentage INTEGER NOT NULL DEFAULT 0,
    payment_method TEXT NOT NULL DEFAULT '',
    tags TEXT NOT NULL DEFAULT '',
    employee_name TEXT NOT NULL DEFAULT '',
    customer_type TEXT NOT NULL DEFAULT '',
    order_status TEXT NOT NULL DEFAULT '',
    delivery_type TEXT NOT NULL DEFAULT '',
    store_id TEXT NOT NULL DEFAULT '',
    store_location TEXT NOT NULL DEFAULT '',
    salesperson_id TEXT NOT NULL DEFAULT ''
)";

const SALE_COLUMNS: &str = "transaction_id, date, customer_id, customer_name, phone_number, gender, age, \
    customer_region, product_id, product_category, product_name, brand, quantity, price_per_unit, total_amount, \
    final_amount, discount_percentage, payment_method, tags, employee_name, customer_type, order_status, \
    delivery_type, store_id, store_location, salesperson_id";

#[derive(Debug, FromRow)]
struct SaleRow {
    transaction_id: String,
    date: String,
    customer_id: String,
    customer_name: String,
    phone_number: String,
    gender: String,
    age: i64,
    customer_region: String,
    product_id: String,
    product_category: String,
    product_name: String,
    brand: String,
    quantity: i64,
    price_per_unit: i64,
    total_amount: i64,
    final_amount: i64,
    discount_percentage: i64,
    payment_method: String,
    tags: String,
    employee_name: String,
    customer_type: String,
    order_status: String,
    delivery_type: String,
    store_id: String,
    store_location: String,
    salesperson_id: String
}

impl TryFrom<SaleRow> for SaleRecord {
    type Error = SalesError;

    fn try_from(row: SaleRow) -> Result<Self, Self::Error> {
        let corrupt = |column: &str, detail: String| {
            SalesError::internal(format!("corrupt [{column}] for transaction [{}]: {detail}", row.transaction_id))
        };

        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|error| corrupt("date", error.to_string()))?;
        let age = u32::try_from(row.age).map_err(|error| corrupt("age", error.to_string()))?;
        let quantity = u32::try_from(row.quantity).map_err(|error| corrupt("quantity", error.to_string()))?;

        Ok(SaleRecord {
            transaction_id: row.transaction_id,
            date,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            phone_number: row.phone_number,
            gender: row.gender,
            age,
            customer_region: row.customer_region,
            product_id: row.product_id,
            product_category: row.product_category,
            product_name: row.product_name,
            brand: row.brand,
            quantity,
            price_per_unit: from_minor_units(row.price_per_unit),
            total_amount: from_minor_units(row.total_amount),
            final_amount: from_minor_units(row.final_amount),
            discount_percentage: from_minor_units(row.discount_percentage),
            payment_method: row.payment_method,
            tags: row.tags,
            employee_name: row.employee_name,
            customer_type: row.customer_type,
            order_status: row.order_status,
            delivery_type: row.delivery_type,
            store_id: row.store_id,
            store_location: row.store_location,
            salesperson_id: row.salesperson_id
        })
    }
}

/// Record source over the relational `sales` table.
#[derive(Clone)]
pub struct SqliteSource {
    pool: SqlitePool
}

impl SqliteSource {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a read-only pool. Nothing is created if the database is missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, SalesError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(classify)?
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(classify)?;

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn arguments<'q>(params: &[SqlParam]) -> Result<SqliteArguments<'q>, SalesError> {
    let mut arguments = SqliteArguments::default();

    for param in params {
        let added = match param {
            SqlParam::Text(value) => arguments.add(value.clone()),
            SqlParam::Integer(value) => arguments.add(*value)
        };

        added.map_err(|error| SalesError::internal(format!("failed to bind query parameter: {error}")))?;
    }

    Ok(arguments)
}

/// Connectivity failures and a missing table are retryable; anything else is internal.
fn classify(error: sqlx::Error) -> SalesError {
    match &error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => SalesError::source_unavailable(error.to_string()),
        sqlx::Error::Database(database_error) if database_error.message().contains("no such table")
            || database_error.message().contains("unable to open") => {
            SalesError::source_unavailable(error.to_string())
        }
        _ => {
            error!("Unexpected database error: {error}");
            SalesError::internal(error.to_string())
        }
    }
}

fn unsigned(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl RecordSource for SqliteSource {
    async fn count(&self, filter: &CompiledFilter) -> Result<u64, SalesError> {
        let sql_filter = filter.to_sql();
        let sql = format!("SELECT COUNT(*) FROM sales {}", sql_filter.where_clause());

        let total = sqlx::query_scalar_with::<_, i64, _>(&sql, arguments(&sql_filter.params)?)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        Ok(unsigned(total))
    }

    async fn page(&self, filter: &CompiledFilter, sort: SortSpec, offset: u64, limit: u32) -> Result<Vec<SaleRecord>, SalesError> {
        let sql_filter = filter.to_sql();
        let sql = format!(
            "SELECT {SALE_COLUMNS} FROM sales {} {} LIMIT ? OFFSET ?",
            sql_filter.where_clause(),
            sort.order_by_clause()
        );

        debug!("Executing page query: {sql}");

        let mut params = sql_filter.params;
        params.push(SqlParam::Integer(i64::from(limit)));
        params.push(SqlParam::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));

        let rows = sqlx::query_as_with::<_, SaleRow, _>(&sql, arguments(&params)?)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;

        rows.into_iter().map(SaleRecord::try_from).collect()
    }

    async fn aggregate(&self, filter: &CompiledFilter) -> Result<Aggregates, SalesError> {
        let sql_filter = filter.to_sql();
        let sql = format!(
            "SELECT COALESCE(SUM(quantity), 0), COALESCE(SUM(total_amount), 0), COALESCE(SUM(total_amount - final_amount), 0) FROM sales {}",
            sql_filter.where_clause()
        );

        let (units, amount, discount) = sqlx::query_as_with::<_, (i64, i64, i64), _>(&sql, arguments(&sql_filter.params)?)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)?;

        Ok(Aggregates {
            total_units: unsigned(units),
            total_amount: from_minor_units(amount),
            total_discount: from_minor_units(discount)
        })
    }

    async fn distinct_values(&self, field: FacetField) -> Result<Vec<String>, SalesError> {
        let column = field.column();
        let sql = format!("SELECT DISTINCT {column} FROM sales WHERE {column} IS NOT NULL AND {column} != '' ORDER BY {column}");

        sqlx::query_scalar::<_, String>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }
}
