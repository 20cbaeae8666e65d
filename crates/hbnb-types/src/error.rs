use thiserror::Error;

/// Errors produced by record operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("unknown record kind: {0}")]
    UnknownKind(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid timestamp for {field}: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("attribute is read-only: {0}")]
    ReadOnlyAttribute(String),

    #[error("expected a JSON object")]
    NotAnObject,
}

/// Result alias for record operations.
pub type ModelResult<T> = Result<T, ModelError>;
