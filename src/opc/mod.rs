//! Open Packaging Conventions (OPC) reading.
//!
//! This module reads the container layer of `.vsdx` files: a ZIP archive whose
//! members are parts, typed by `[Content_Types].xml` and linked by the
//! relationships in `_rels/*.rels` members. It includes support for:
//!
//! - Opening packages from a path or any `Read + Seek` source
//! - Content type lookup (overrides, then extension defaults)
//! - Relationship lookup for the package root and for any part
//! - Resolving relative relationship targets to partnames
//!
//! Packages are read-only. Parts are decompressed on demand and returned by
//! value, so nothing borrows from the archive.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod rel;

// Re-export commonly used types
pub use error::OpcError;
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::Part;
pub use rel::{RelIdOrder, Relationship, Relationships};
