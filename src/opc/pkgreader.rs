//! Parsers for the two package-level XML formats: `[Content_Types].xml` and
//! the `.rels` relationship parts.
//!
//! Both are flat lists of attribute-only elements, so they are read with a
//! streaming quick-xml loop instead of a full tree.

use crate::opc::constants::target_mode;
use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::PackURI;
use crate::opc::rel::Relationships;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// Content type map for looking up content types by part name or extension.
///
/// Implements the OPC content type discovery algorithm using Default and
/// Override elements from [Content_Types].xml.
#[derive(Debug, Default)]
pub struct ContentTypeMap {
    /// Maps lowercase file extensions to default content types
    defaults: HashMap<String, String>,

    /// Maps lowercase partnames to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from [Content_Types].xml.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"Default" => {
                        // <Default Extension="xml" ContentType="application/xml"/>
                        let ext = attr_value(e, b"Extension")?;
                        let content_type = attr_value(e, b"ContentType")?;
                        if let (Some(ext), Some(ct)) = (ext, content_type) {
                            map.defaults.insert(ext.to_lowercase(), ct);
                        }
                    },
                    b"Override" => {
                        // <Override PartName="/visio/document.xml" ContentType="..."/>
                        let partname = attr_value(e, b"PartName")?;
                        let content_type = attr_value(e, b"ContentType")?;
                        if let (Some(pn), Some(ct)) = (partname, content_type) {
                            map.overrides.insert(pn.to_lowercase(), ct);
                        }
                    },
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!(
                        "Content types parse error: {}",
                        e
                    )));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Get the content type for a partname.
    ///
    /// Overrides win over extension defaults. Partnames compare
    /// case-insensitively, as OPC requires.
    pub fn get(&self, pack_uri: &PackURI) -> Option<&str> {
        self.overrides
            .get(&pack_uri.as_str().to_lowercase())
            .or_else(|| self.defaults.get(&pack_uri.ext().to_lowercase()))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.overrides.is_empty()
    }
}

/// Parse a `.rels` part into the relationships of `source`.
///
/// Relationships missing an Id, Type or Target are skipped.
pub fn parse_rels_xml(rels_xml: &[u8], source: &PackURI) -> Result<Relationships> {
    let mut rels = Relationships::new(source.base_uri().to_string());
    let mut reader = Reader::from_reader(rels_xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    let r_id = attr_value(e, b"Id")?;
                    let reltype = attr_value(e, b"Type")?;
                    let target_ref = attr_value(e, b"Target")?;
                    let is_external = attr_value(e, b"TargetMode")?
                        .is_some_and(|mode| mode == target_mode::EXTERNAL);

                    if let (Some(id), Some(rt), Some(tr)) = (r_id, reltype, target_ref) {
                        rels.add_relationship(rt, tr, id, is_external);
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OpcError::XmlError(format!(
                    "Rels parse error in {}: {}",
                    source, e
                )));
            },
            _ => {},
        }
        buf.clear();
    }

    Ok(rels)
}

/// Read an unprefixed attribute's unescaped value.
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
