/// Errors from resource store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No entry is stored at the requested path.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The operation does not fit the shape of the target path, e.g.
    /// deleting a collection index or POSTing into a trailing-slash path.
    #[error("method not allowed on {path}: {reason}")]
    MethodNotAllowed { path: String, reason: String },

    /// The request body could not be fully read from its source.
    #[error("failed to read request body: {0}")]
    BodyRead(#[from] std::io::Error),

    /// A collection index could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub(crate) fn not_allowed(path: &str, reason: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
