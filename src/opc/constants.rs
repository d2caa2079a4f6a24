//! Constant values related to the Open Packaging Convention as used by Visio.
//!
//! This module contains content type URIs, XML namespaces and relationship
//! types found in `.vsdx` / `.vsdm` packages.

/// Content type URIs (like MIME-types) that specify a part's format
pub mod content_type {
    // OPC core content types
    pub const OPC_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";

    // VisioML content types
    pub const VSD_DRAWING_MAIN: &str = "application/vnd.ms-visio.drawing.main+xml";
    pub const VSD_PAGES: &str = "application/vnd.ms-visio.pages+xml";
    pub const VSD_PAGE: &str = "application/vnd.ms-visio.page+xml";

    // Generic XML
    pub const XML: &str = "application/xml";
}

/// XML namespace URIs used in Visio packages
pub mod namespace {
    /// VisioML main namespace
    pub const VSD_MAIN: &str = "http://schemas.microsoft.com/office/visio/2012/main";

    /// Office relationships namespace (the `r:` prefix on `<Rel r:id>`)
    pub const OFC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// OPC relationships namespace
    pub const OPC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// OPC content types namespace
    pub const OPC_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";
}

/// Open XML relationship target modes
pub mod target_mode {
    /// Internal relationship target mode (default)
    pub const INTERNAL: &str = "Internal";

    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs followed from the package root down to pages
pub mod relationship_type {
    /// Package root → drawing document part
    pub const VSD_DOCUMENT: &str = "http://schemas.microsoft.com/visio/2010/relationships/document";

    /// Drawing document → pages collection part
    pub const VSD_PAGES: &str = "http://schemas.microsoft.com/visio/2010/relationships/pages";

    /// Pages collection → individual page part
    pub const VSD_PAGE: &str = "http://schemas.microsoft.com/visio/2010/relationships/page";
}
