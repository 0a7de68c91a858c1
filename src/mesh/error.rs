/// Errors that can occur while loading or checking a mesh
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    /// I/O error reading the mesh file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The VTK reader rejected the file
    #[error("VTK error: {0}")]
    VtkError(String),

    /// A required point data array is absent
    #[error("Malformed input: missing point data array '{0}'")]
    MissingArray(String),

    /// Dataset kind other than unstructured grid or poly data
    #[error("Unsupported dataset: {0}")]
    UnsupportedDataSet(String),

    /// Cell kind that cannot be turned into surface triangles
    #[error("Unsupported cell type: {0}")]
    UnsupportedCell(String),

    /// Inconsistent arrays (bad index, wrong scalar count, ...)
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),
}
