/// Errors that can occur while reading and reconstructing streamlines
#[derive(Debug, thiserror::Error)]
pub enum StreamlineError {
    /// I/O error reading the table or writing the collection
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required column is absent from the table header
    #[error("Malformed input: missing column '{0}'")]
    MissingColumn(String),

    /// A required field is absent from a row
    #[error("Malformed input: row {row}: missing field '{field}'")]
    MalformedInput {
        /// Zero-based data row index
        row: usize,
        /// Name of the missing field
        field: String,
    },

    /// A required field is present but does not hold a finite number
    #[error("Schema mismatch: row {row}: field '{field}' is not a finite number: '{value}'")]
    SchemaMismatch {
        /// Zero-based data row index
        row: usize,
        /// Name of the offending field
        field: String,
        /// Raw cell text
        value: String,
    },

    /// An integration step appeared before any seed point
    #[error("Sample {index} (IntegrationTime = {integration_time}) precedes any seed point")]
    OrphanSample {
        /// Position of the sample in the input sequence
        index: usize,
        /// Its integration time
        integration_time: f64,
    },

    /// Quantized seed identity with more decimals than an f64 carries
    #[error("Quantized seed identity supports at most 17 decimals, got {decimals}")]
    InvalidSeedIdentity {
        /// Requested decimal count
        decimals: u32,
    },

    /// A serialized streamline violates the array length relationship
    #[error("Invalid streamline {index}: {reason}")]
    InvalidStreamline {
        /// Position of the streamline in the collection
        index: usize,
        /// What is wrong with it
        reason: String,
    },
}
