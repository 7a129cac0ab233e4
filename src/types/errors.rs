use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonetaryError {
    #[error("Monetary error: {0} has more than {1} decimal places")]
    PrecisionLoss(String, u32),
    #[error("Monetary error: Overflow")]
    Overflow
}
