use thiserror::Error;

/// Error type that captures storage and snapshot failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Import rejected: {0}")]
    Import(String),
}

/// Rejection reasons produced by the transaction editor.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid amount")]
    InvalidAmount,
    #[error("category required")]
    CategoryRequired,
    #[error("tag required")]
    TagRequired,
    #[error("invalid date")]
    InvalidDate,
    #[error("category kind does not match transaction kind")]
    CategoryKindMismatch,
}
