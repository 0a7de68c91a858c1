use super::ElementType;

/// Errors that can occur while writing or reading raw binary arrays
#[derive(Debug, thiserror::Error)]
pub enum BinaryError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A value cannot be represented in the declared element type
    #[error("Schema mismatch: value {value} at index {index} cannot be stored as {element_type}")]
    SchemaMismatch {
        /// Position of the value in the array
        index: usize,
        /// The offending value, as text
        value: String,
        /// Declared output type
        element_type: ElementType,
    },

    /// File length does not match the element type or expected count
    #[error("Invalid data length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected byte count
        expected: usize,
        /// Actual byte count
        actual: usize,
    },

    /// Unknown element type name
    #[error("Unsupported element type: {0}")]
    UnsupportedElementType(String),
}
