/// Errors that can occur while converting a case
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    /// I/O error reading the configuration or creating directories
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML configuration parsing error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] toml::de::Error),

    /// Mesh loading error
    #[error("Mesh error in '{source_file}': {error}")]
    MeshError {
        /// Mesh file being read
        source_file: String,
        /// Underlying error
        error: crate::mesh::MeshError,
    },

    /// Component writing error
    #[error("Component '{component}': {error}")]
    ComponentError {
        /// Component being written
        component: String,
        /// Underlying error
        error: crate::component::ComponentError,
    },

    /// Streamline conversion error
    #[error("Streamlines '{source_file}': {error}")]
    StreamlineError {
        /// Table being converted
        source_file: String,
        /// Underlying error
        error: crate::streamline::StreamlineError,
    },

    /// The configuration names no case to convert
    #[error("No case selected: set `cases` in the configuration or pass one explicitly")]
    NoCase,

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
