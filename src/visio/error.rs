/// Error types for Visio page and shape-text operations.
use crate::opc::error::OpcError;
use crate::xml::XmlError;
use thiserror::Error;

/// Result type for Visio operations.
pub type Result<T> = std::result::Result<T, VisioError>;

/// Error types for Visio operations.
///
/// Container failures are folded into the kinds a caller acts on; whatever
/// has no kind of its own stays available as [`VisioError::Opc`].
#[derive(Error, Debug)]
pub enum VisioError {
    /// The input path does not name an existing file
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The file exists but is not a readable package
    #[error("Could not open package: {0}")]
    OpenFailed(String),

    /// An expected relationship is absent
    #[error("Relationship not found: {0}")]
    RelationshipNotFound(String),

    /// A relationship points at a part the package does not contain
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// A part's body is not well-formed XML
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// Page parts could not be resolved for the pages the index lists
    #[error("No pages found: {0}")]
    NoPagesFound(String),

    /// Any other OPC package error
    #[error("OPC error: {0}")]
    Opc(OpcError),
}

impl From<OpcError> for VisioError {
    fn from(err: OpcError) -> Self {
        match err {
            OpcError::PackageNotFound(path) => VisioError::FileNotFound(path),
            OpcError::OpenFailed(msg) => VisioError::OpenFailed(msg),
            OpcError::RelationshipNotFound(msg) => VisioError::RelationshipNotFound(msg),
            OpcError::PartNotFound(partname) => VisioError::PartNotFound(partname),
            OpcError::XmlError(msg) => VisioError::MalformedXml(msg),
            other => VisioError::Opc(other),
        }
    }
}

impl From<XmlError> for VisioError {
    fn from(err: XmlError) -> Self {
        VisioError::MalformedXml(err.to_string())
    }
}
