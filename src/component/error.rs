/// Errors that can occur while writing a renderer component
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error writing a binary array
    #[error("Binary array error: {0}")]
    BinaryError(#[from] crate::binary::BinaryError),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A domain was requested for an array with no values
    #[error("Cannot compute the domain of empty array '{0}'")]
    EmptyArray(String),

    /// An array holds NaN or infinite values, so its domain cannot be written
    #[error("Array '{0}' has non-finite values")]
    NonFiniteDomain(String),

    /// Two arrays of one component share a name
    #[error("Duplicate array name: {0}")]
    DuplicateArray(String),

    /// Array name collides with a fixed `config.json` key
    #[error("Array name '{0}' is reserved in config.json")]
    ReservedArrayName(String),
}
