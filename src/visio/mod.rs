//! Visio drawings (`.vsdx`).
//!
//! A drawing is an OPC package whose pages are reached through the chain
//! package → document → pages collection → page parts. This module resolves
//! that chain, names each page part from the pages index, and searches the
//! text of every shape on every page.
//!
//! # Example
//!
//! ```no_run
//! use vsdx_notes::visio::{PagePairing, SearchOptions, VisioPackage};
//!
//! let options = SearchOptions::default().with_pairing(PagePairing::ByRelationshipId);
//! let mut drawing = VisioPackage::open("diagram.vsdx")?.with_options(options);
//!
//! for (page, notes) in &drawing.search("TODO:")? {
//!     println!("{}: {} note(s)", page, notes.len());
//! }
//! # Ok::<(), vsdx_notes::visio::VisioError>(())
//! ```

pub mod error;
pub mod options;
pub mod pages;
pub mod search;
pub mod shapes;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{Result, VisioError};
pub use options::{PagePairing, SearchOptions, TextScope};
pub use pages::{Page, PageEntry, PageIndex};
pub use search::{PrefixMatches, VisioPackage, search_prefix_text, search_prefix_text_with};
