use hbnb_types::ModelError;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document is not valid JSON.
    #[error("document is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The stored document is valid JSON but not an object of records.
    #[error("document root must be a JSON object")]
    NotAnObject,

    /// One entry of the stored document could not be rebuilt into a record.
    #[error("corrupt entry {key}: {source}")]
    CorruptEntry {
        key: String,
        #[source]
        source: ModelError,
    },

    /// Serialization failure while encoding the registry.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A record-level operation was rejected.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Storage backend refuses writes.
    #[error("store is read-only")]
    ReadOnly,
}

impl StoreError {
    /// Whether the error comes from the storage medium rather than from the
    /// data or the caller.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Self::Io(_) | Self::ReadOnly)
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
