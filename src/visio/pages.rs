//! Page discovery: the pages index and the page parts it describes.
//!
//! A drawing reaches its pages through two hops of relationships,
//! package → document → pages collection, and from there one `page`
//! relationship per page part. The pages collection is also an XML index of
//! `<Page>` entries carrying the page names, a `Background` marker and a
//! `<Rel r:id>` child naming the relationship of each page's part.

use crate::opc::constants::relationship_type;
use crate::opc::{OpcPackage, Part, RelIdOrder, Relationship};
use crate::visio::error::{Result, VisioError};
use crate::visio::options::{PagePairing, TextScope};
use crate::visio::shapes;
use crate::xml::XmlDocument;
use std::io::{Read, Seek};

/// One `<Page>` entry of the pages index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    /// Trimmed `Name` attribute, if present
    name: Option<String>,

    /// Whether the entry carries a `Background` attribute
    background: bool,

    /// Relationship id of the page's part, from its `<Rel>` child
    rel_id: Option<String>,
}

impl PageEntry {
    pub fn new(name: Option<String>, background: bool, rel_id: Option<String>) -> Self {
        Self {
            name,
            background,
            rel_id,
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn is_background(&self) -> bool {
        self.background
    }

    #[inline]
    pub fn rel_id(&self) -> Option<&str> {
        self.rel_id.as_deref()
    }

    /// The name this entry contributes to the page list: foreground pages
    /// with a `Name` only.
    #[inline]
    pub fn foreground_name(&self) -> Option<&str> {
        if self.background { None } else { self.name() }
    }
}

/// The `<Page>` entries of a pages collection part, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    entries: Vec<PageEntry>,
}

impl PageIndex {
    /// Read the index from the parsed pages collection.
    pub fn from_document(doc: &XmlDocument) -> Self {
        let entries = doc
            .descendants_by_local_name("Page")
            .map(|page| {
                let name = page.attribute("Name").map(|name| name.trim().to_string());
                let background = page.has_attribute("Background");
                let rel_id = page
                    .child("Rel")
                    .and_then(|rel| rel.attribute("id"))
                    .map(str::to_string);
                PageEntry::new(name, background, rel_id)
            })
            .collect();
        Self { entries }
    }

    /// Parse the index from the body of a pages collection part.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let doc = XmlDocument::parse(xml)?;
        Ok(Self::from_document(&doc))
    }

    /// Every entry, background pages included.
    #[inline]
    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    /// Names of the foreground pages, in index order.
    pub fn page_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(PageEntry::foreground_name)
            .collect()
    }

    /// The entry that references relationship `r_id`.
    pub fn entry_for_rel_id(&self, r_id: &str) -> Option<&PageEntry> {
        self.entries.iter().find(|entry| entry.rel_id() == Some(r_id))
    }

    /// Whether every entry names its page's relationship.
    pub fn has_rel_ids(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|entry| entry.rel_id.is_some())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A page part together with the name it was given.
#[derive(Debug, Clone)]
pub struct Page {
    name: String,
    rel_id: String,
    part: Part,
}

impl Page {
    /// Display name from the pages index.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the relationship that reached this page's part.
    #[inline]
    pub fn rel_id(&self) -> &str {
        &self.rel_id
    }

    #[inline]
    pub fn part(&self) -> &Part {
        &self.part
    }

    /// Trimmed shape texts of this page that start with `prefix`.
    pub fn prefix_texts(&self, prefix: &str, scope: TextScope) -> Result<Vec<String>> {
        let doc = self.part.xml()?;
        Ok(shapes::prefix_texts(doc.root(), prefix, scope))
    }
}

/// The pages index together with the page parts, in relationship id order.
#[derive(Debug)]
pub struct ResolvedPages {
    pub index: PageIndex,
    pub parts: Vec<(Relationship, Part)>,
}

/// Walk document → pages collection → page parts.
///
/// # Errors
/// `RelationshipNotFound` or `PartNotFound` when the chain is broken,
/// `MalformedXml` when the index cannot be parsed, and `NoPagesFound` when
/// the index lists pages but the collection has no page relationships.
pub fn resolve_pages<R: Read + Seek>(
    package: &mut OpcPackage<R>,
    order: RelIdOrder,
) -> Result<ResolvedPages> {
    let document = package.part_by_reltype(relationship_type::VSD_DOCUMENT)?;
    log::debug!("document part: {}", document.partname());

    let pages = package.resolve_one(document.partname(), relationship_type::VSD_PAGES)?;
    log::debug!("pages collection part: {}", pages.partname());

    let index = PageIndex::from_document(&pages.xml()?);
    let parts = package.resolve_many(pages.partname(), relationship_type::VSD_PAGE, order)?;
    log::debug!(
        "{} index entries, {} page parts under {:?} order",
        index.len(),
        parts.len(),
        order
    );

    if parts.is_empty() && !index.is_empty() {
        return Err(VisioError::NoPagesFound(format!(
            "{} lists {} page(s) but has no page relationships",
            pages.partname(),
            index.len()
        )));
    }

    Ok(ResolvedPages { index, parts })
}

/// Give each page part its name from the index.
///
/// Parts that end up without a name are dropped with a warning.
pub fn pair_pages(resolved: ResolvedPages, pairing: PagePairing) -> Vec<Page> {
    let ResolvedPages { index, parts } = resolved;

    let by_rel_id = match pairing {
        PagePairing::Auto => index.has_rel_ids(),
        PagePairing::Positional => false,
        PagePairing::ByRelationshipId => true,
    };
    log::debug!(
        "pairing page parts {}",
        if by_rel_id { "by relationship id" } else { "by position" }
    );

    let names = index.page_names();
    let mut pages = Vec::with_capacity(parts.len());

    for (position, (rel, part)) in parts.into_iter().enumerate() {
        let name = if by_rel_id {
            index
                .entry_for_rel_id(rel.r_id())
                .and_then(PageEntry::foreground_name)
        } else {
            names.get(position).copied()
        };

        match name {
            Some(name) => pages.push(Page {
                name: name.to_string(),
                rel_id: rel.r_id().to_string(),
                part,
            }),
            None => log::warn!(
                "page part {} ({}) has no name in the pages index, skipping",
                part.partname(),
                rel.r_id()
            ),
        }
    }

    pages
}

/// Resolve and name every page of the package.
pub fn named_pages<R: Read + Seek>(
    package: &mut OpcPackage<R>,
    pairing: PagePairing,
    order: RelIdOrder,
) -> Result<Vec<Page>> {
    let resolved = resolve_pages(package, order)?;
    Ok(pair_pages(resolved, pairing))
}
