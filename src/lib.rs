//! vsdx-notes - Prefix search over the shape text of Visio diagrams
//!
//! This library opens Visio `.vsdx` files read-only and collects, page by
//! page, every shape text that starts with a given prefix. Annotations such as
//! "Note: ..." or "TODO: ..." scattered over a drawing come back as an
//! ordered page name → texts mapping.
//!
//! # Features
//!
//! - **OPC reader**: ZIP container, content types and relationship navigation
//! - **Page resolution**: document → pages collection → page parts, with
//!   background pages left out
//! - **Shape text search**: nested group shapes at any depth
//! - **Configurable**: page pairing and relationship id ordering via
//!   [`SearchOptions`], plus the nested-shape text scope
//!
//! # Example - Searching a drawing
//!
//! ```no_run
//! use vsdx_notes::search_prefix_text;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let notes = search_prefix_text("diagram.vsdx", "Note")?;
//! for (page, texts) in notes.iter() {
//!     println!("{}:", page);
//!     for text in texts {
//!         println!("  {}", text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Low-level package access
//!
//! ```no_run
//! use vsdx_notes::opc::constants::relationship_type;
//! use vsdx_notes::opc::OpcPackage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut pkg = OpcPackage::open("diagram.vsdx")?;
//! let document = pkg.part_by_reltype(relationship_type::VSD_DOCUMENT)?;
//! println!("{} ({} bytes)", document.partname(), document.blob().len());
//! # Ok(())
//! # }
//! ```

/// OPC (Open Packaging Conventions) container reader
///
/// Reads parts, content types and relationships out of ZIP-based packages.
pub mod opc;

/// Visio drawing pages and shape text search
pub mod visio;

/// Owned XML trees with namespace-agnostic lookups
pub mod xml;

// Re-export commonly used types for convenience
pub use visio::{
    PagePairing, PrefixMatches, SearchOptions, TextScope, VisioError, VisioPackage,
    search_prefix_text, search_prefix_text_with,
};
