use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::filters::{FilterCompiler, FilterRequest};
use crate::models::SalesError;
use crate::query::{Pagination, ResultEnvelope, SortSpec};
use crate::storage::RecordSource;

/// Runs listing requests against a record source.
#[derive(Clone)]
pub struct QueryExecutor {
    source: Arc<dyn RecordSource>,
    reference_date: Option<NaiveDate>
}

impl QueryExecutor {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self {
            source,
            reference_date: None
        }
    }

    /// Pins the date relative presets resolve against. Without it the local date is read
    /// on every request.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn compiler(&self) -> FilterCompiler {
        self.reference_date.map(FilterCompiler::new).unwrap_or_else(FilterCompiler::local)
    }

    /// Compiles the request and returns the requested page with totals for the whole match
    /// set. A page past the end is empty but still reports the true totals.
    ///
    /// # Errors
    /// - `InputMalformed` when a filter value cannot be interpreted.
    /// - `SourceUnavailable` when the record source cannot be read.
    pub async fn execute(&self, request: &FilterRequest) -> Result<ResultEnvelope, SalesError> {
        let filter = self.compiler().compile(request)?;
        let sort = SortSpec::resolve(request.sort_by.as_deref(), request.sort_order.as_deref());
        let page = request.page.max(1);
        let page_size = request.page_size.max(1);
        let offset = u64::from(page - 1) * u64::from(page_size);

        debug!("Executing query: sort [{sort:?}] offset [{offset}] limit [{page_size}]");

        let evaluation = self.source.evaluate(&filter, sort, offset, page_size).await?;

        debug!("Query matched [{}] records, returning [{}]", evaluation.total, evaluation.records.len());

        Ok(ResultEnvelope {
            data: evaluation.records,
            pagination: Pagination::new(page, page_size, evaluation.total),
            metadata: evaluation.aggregates
        })
    }
}
