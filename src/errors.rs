use thiserror::Error;

/// Errors that can arise in the muster domain core and its storage layer.
#[derive(Debug, Error)]
pub enum MusterError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around JSON serialization errors on the write path.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a stored value exists but no longer parses as the
    /// expected shape. Deliberately distinct from [`MusterError::Serde`] so
    /// callers can tell a bad write apart from bad data at rest.
    #[error("corrupt record at key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Returned when a required field fails validation.
    #[error("validation failed: {0}")]
    Validation(String),
}
