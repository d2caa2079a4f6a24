//! XML document tree built from quick-xml events.

use crate::xml::error::{Result, XmlError};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// A child node of an element: a nested element or a run of character data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its attributes and children, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name as written, prefix included (e.g. "r:Rel")
    name: String,

    /// Attributes as written, namespace declarations excluded
    attributes: Vec<(String, String)>,

    children: Vec<XmlNode>,
}

/// A parsed XML part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    root: XmlElement,
}

/// The local (unprefixed) part of a qualified XML name.
#[inline]
fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>, position: u64) -> Result<Self> {
        let name = std::str::from_utf8(start.name().as_ref())
            .map_err(|_| XmlError::InvalidUtf8("tag name"))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| XmlError::Syntax {
                position,
                message: e.to_string(),
            })?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|_| XmlError::InvalidUtf8("attribute name"))?;
            if key == "xmlns" || key.starts_with("xmlns:") {
                continue;
            }
            let value = attr.unescape_value().map_err(|e| XmlError::Syntax {
                position,
                message: e.to_string(),
            })?;
            attributes.push((key.to_string(), value.into_owned()));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Append character data, merging with a preceding text node.
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_string()));
        }
    }

    /// Tag name as written, including any namespace prefix.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tag name without its namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Look up an attribute by local name, ignoring any prefix.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_part(key) == local_name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether an attribute with this local name is present, whatever its value.
    #[inline]
    pub fn has_attribute(&self, local_name: &str) -> bool {
        self.attribute(local_name).is_some()
    }

    /// All attributes as (qualified name, value) pairs.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Child nodes, text included.
    #[inline]
    pub fn nodes(&self) -> &[XmlNode] {
        &self.children
    }

    /// Child elements.
    pub fn children(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given local name.
    pub fn child(&self, local_name: &str) -> Option<&XmlElement> {
        self.children().find(|child| child.local_name() == local_name)
    }

    /// Every element below this one, depth first, in document order.
    #[inline]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    /// Every element below this one whose local name is `local_name`, in
    /// document order and at any depth.
    pub fn descendants_by_local_name<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants()
            .filter(move |element| element.local_name() == local_name)
    }

    /// Concatenated character data of the whole subtree.
    pub fn text(&self) -> String {
        let mut text = String::new();
        let mut stack = vec![self.children.iter()];
        while let Some(top) = stack.last_mut() {
            match top.next() {
                Some(XmlNode::Text(run)) => text.push_str(run),
                Some(XmlNode::Element(element)) => stack.push(element.children.iter()),
                None => {
                    stack.pop();
                },
            }
        }
        text
    }
}

/// Depth-first iterator over the elements of a subtree.
///
/// Keeps one slice iterator per open level, so depth costs heap, not stack.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, XmlNode>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(XmlNode::Element(element)) => {
                    self.stack.push(element.children.iter());
                    return Some(element);
                },
                Some(XmlNode::Text(_)) => {},
                None => {
                    self.stack.pop();
                },
            }
        }
    }
}

impl XmlDocument {
    /// Parse a complete XML document.
    ///
    /// Whitespace is preserved in text nodes; entity and character references
    /// are resolved. The document must have exactly one root element and every
    /// element must be closed.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| XmlError::Syntax {
                    position,
                    message: e.to_string(),
                })?;

            match event {
                Event::Start(ref e) => {
                    let element = XmlElement::from_start(e, position)?;
                    if stack.is_empty() && root.is_some() {
                        return Err(XmlError::MultipleRoots(element.name));
                    }
                    stack.push(element);
                },
                Event::Empty(ref e) => {
                    let element = XmlElement::from_start(e, position)?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| XmlError::Syntax {
                        position,
                        message: "end tag without a matching start tag".to_string(),
                    })?;
                    Self::attach(&mut stack, &mut root, element)?;
                },
                Event::Text(ref t) => {
                    if let Some(current) = stack.last_mut() {
                        let text =
                            std::str::from_utf8(t).map_err(|_| XmlError::InvalidUtf8("text content"))?;
                        current.push_text(text);
                    }
                },
                Event::CData(ref c) => {
                    if let Some(current) = stack.last_mut() {
                        let text =
                            std::str::from_utf8(c).map_err(|_| XmlError::InvalidUtf8("CDATA section"))?;
                        current.push_text(text);
                    }
                },
                Event::GeneralRef(ref r) => {
                    if let Some(current) = stack.last_mut() {
                        let resolved = r.resolve_char_ref().map_err(|e| XmlError::Syntax {
                            position,
                            message: e.to_string(),
                        })?;
                        match resolved {
                            Some(ch) => {
                                let mut utf8 = [0u8; 4];
                                current.push_text(ch.encode_utf8(&mut utf8));
                            },
                            None => {
                                let name = std::str::from_utf8(r)
                                    .map_err(|_| XmlError::InvalidUtf8("entity reference"))?;
                                let value = quick_xml::escape::resolve_predefined_entity(name)
                                    .ok_or_else(|| XmlError::UnknownEntity(name.to_string()))?;
                                current.push_text(value);
                            },
                        }
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::UnclosedElement(open.name));
        }
        root.map(|root| Self { root }).ok_or(XmlError::NoRoot)
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> Result<()> {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(XmlNode::Element(element));
        } else if root.is_none() {
            *root = Some(element);
        } else {
            return Err(XmlError::MultipleRoots(element.name));
        }
        Ok(())
    }

    /// The document element.
    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// Every element of the document whose local name is `local_name`, the
    /// root included, in document order.
    pub fn descendants_by_local_name<'a>(
        &'a self,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        std::iter::once(&self.root)
            .filter(move |root| root.local_name() == local_name)
            .chain(self.root.descendants_by_local_name(local_name))
    }
}
