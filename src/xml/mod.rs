//! Owned XML document trees with namespace-agnostic lookups.
//!
//! Part bodies are parsed once with quick-xml into an [`XmlDocument`]. Lookups
//! compare local names only, so `<Shape>`, `<v:Shape>` and a `Shape` in a
//! default namespace are all the same element to [`XmlElement::descendants_by_local_name`].
//!
//! # Example
//!
//! ```
//! use vsdx_notes::xml::XmlDocument;
//!
//! let doc = XmlDocument::parse(br#"<Shapes><Shape><Text>Note <cp IX="0"/>one</Text></Shape></Shapes>"#)?;
//! let texts: Vec<String> = doc.descendants_by_local_name("Text").map(|t| t.text()).collect();
//! assert_eq!(texts, vec!["Note one".to_string()]);
//! # Ok::<(), vsdx_notes::xml::XmlError>(())
//! ```

mod document;
mod error;

pub use document::{Descendants, XmlDocument, XmlElement, XmlNode};
pub use error::{Result, XmlError};
