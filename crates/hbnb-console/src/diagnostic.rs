use hbnb_store::StoreError;
use hbnb_types::ModelError;
use tracing::error;

/// A user-facing command failure. The `Display` form is the exact line the
/// console prints; none of these end the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("** class name missing **")]
    ClassNameMissing,

    #[error("** class doesn't exist **")]
    ClassDoesNotExist,

    #[error("** instance id missing **")]
    InstanceIdMissing,

    #[error("** no instance found **")]
    NoInstanceFound,

    #[error("** attribute name missing **")]
    AttributeNameMissing,

    #[error("** value missing **")]
    ValueMissing,

    #[error("** invalid dictionary syntax **")]
    InvalidDictionary,

    #[error("** invalid number of arguments **")]
    InvalidArgumentCount,

    #[error("** attribute can't be updated **")]
    AttributeReadOnly,

    #[error("** invalid value for attribute **")]
    InvalidValue,

    #[error("*** Unknown syntax: {0}")]
    UnknownSyntax(String),

    #[error("*** No help on {0}")]
    NoHelp(String),

    #[error("** storage unavailable: {0} **")]
    StorageUnavailable(String),
}

impl From<StoreError> for Diagnostic {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Model(ModelError::ReadOnlyAttribute(_)) => Self::AttributeReadOnly,
            StoreError::Model(ModelError::InvalidValue { .. }) => Self::InvalidValue,
            other => {
                error!(error = %other, "storage operation failed");
                Self::StorageUnavailable(other.to_string())
            }
        }
    }
}
