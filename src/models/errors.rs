use thiserror::Error;

/// Failures surfaced by filter compilation and query execution.
#[derive(Debug, Clone, Error)]
pub enum SalesError {
    /// A filter parameter could not be interpreted. Maps to a client error.
    #[error("Invalid value [{value}] for filter [{field}]: {reason}")]
    InputMalformed {
        field: &'static str,
        value: String,
        reason: String
    },
    /// The record source cannot be reached or has not finished loading. Retryable.
    #[error("Sales data source unavailable: {0}")]
    SourceUnavailable(String),
    /// Unexpected fault. The detail is for logs only.
    #[error("Internal error: {0}")]
    Internal(String)
}

impl SalesError {
    pub fn input_malformed(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InputMalformed {
            field,
            value: value.to_string(),
            reason: reason.into()
        }
    }

    pub fn source_unavailable(detail: impl Into<String>) -> Self {
        Self::SourceUnavailable(detail.into())
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SourceUnavailable(_))
    }
}
