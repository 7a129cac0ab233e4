mod sales_query;

pub use sales_query::SalesQuery;
