mod envelope;
mod executor;
mod sort;
#[cfg(test)]
mod tests;

pub use envelope::{Aggregates, Evaluation, Pagination, ResultEnvelope};
pub use executor::QueryExecutor;
pub use sort::{SortKey, SortOrder, SortSpec};
