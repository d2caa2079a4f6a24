use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::PackURI;
use crate::xml::XmlDocument;

/// A part read out of an OPC package.
///
/// Parts are returned by value: the blob is a copy of the decompressed member,
/// so a `Part` stays usable after the package it came from is closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// The partname (URI) of this part
    partname: PackURI,

    /// The content type of this part, empty if the package does not declare one
    content_type: String,

    /// The decompressed content of this part
    blob: Vec<u8>,
}

impl Part {
    pub fn new(partname: PackURI, content_type: String, blob: Vec<u8>) -> Self {
        Self {
            partname,
            content_type,
            blob,
        }
    }

    /// Get the partname of this part.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Get the content type of this part.
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the binary content of this part.
    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Consume the part and return its content.
    #[inline]
    pub fn into_blob(self) -> Vec<u8> {
        self.blob
    }

    /// Parse the whole content as an XML document.
    pub fn xml(&self) -> Result<XmlDocument> {
        XmlDocument::parse(&self.blob)
            .map_err(|e| OpcError::XmlError(format!("{}: {}", self.partname, e)))
    }
}
