use thiserror::Error;

/// Failures raised by a durable document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not serialize document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Raised when imported vocabulary rows contain no usable pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("no valid word pairs found; each line needs a source and a target word")]
    NoValidPairs,
}
