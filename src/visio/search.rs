//! Prefix search over the shape texts of every page.

use crate::opc::OpcPackage;
use crate::visio::error::Result;
use crate::visio::options::SearchOptions;
use crate::visio::pages::{self, Page, PageIndex};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Matching texts per page, in page traversal order.
///
/// Every page name appears at most once, and only pages with at least one
/// match appear. Serializes as a map from page name to its texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMatches {
    pages: Vec<(String, Vec<String>)>,
}

impl PrefixMatches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record matches for a page, appending to an existing entry of the same
    /// name. Empty match lists are not recorded.
    fn record(&mut self, name: &str, matches: Vec<String>) {
        if matches.is_empty() {
            return;
        }
        match self.pages.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, texts)) => {
                log::warn!("page name {:?} appears more than once, merging its matches", name);
                texts.extend(matches);
            },
            None => self.pages.push((name.to_string(), matches)),
        }
    }

    /// Matches found on the page called `name`.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.pages
            .iter()
            .find(|(page, _)| page == name)
            .map(|(_, texts)| texts.as_slice())
    }

    /// Iterate over (page name, matches) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.pages
            .iter()
            .map(|(name, texts)| (name.as_str(), texts.as_slice()))
    }

    /// Names of the pages with matches, in order.
    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|(name, _)| name.as_str())
    }

    /// Number of pages with matches.
    #[inline]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of matches over all pages.
    pub fn total_matches(&self) -> usize {
        self.pages.iter().map(|(_, texts)| texts.len()).sum()
    }

    pub fn into_inner(self) -> Vec<(String, Vec<String>)> {
        self.pages
    }
}

impl IntoIterator for PrefixMatches {
    type Item = (String, Vec<String>);
    type IntoIter = std::vec::IntoIter<(String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.into_iter()
    }
}

impl<'a> IntoIterator for &'a PrefixMatches {
    type Item = &'a (String, Vec<String>);
    type IntoIter = std::slice::Iter<'a, (String, Vec<String>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl Serialize for PrefixMatches {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pages.len()))?;
        for (name, texts) in &self.pages {
            map.serialize_entry(name, texts)?;
        }
        map.end()
    }
}

/// An opened Visio drawing.
///
/// # Example
/// ```no_run
/// use vsdx_notes::visio::VisioPackage;
///
/// let mut drawing = VisioPackage::open("diagram.vsdx")?;
/// for page in drawing.pages()? {
///     println!("{}: {}", page.name(), page.part().partname());
/// }
/// let notes = drawing.search("Note")?;
/// println!("{} notes", notes.total_matches());
/// # Ok::<(), vsdx_notes::visio::VisioError>(())
/// ```
pub struct VisioPackage<R: Read + Seek> {
    package: OpcPackage<R>,
    options: SearchOptions,
}

impl VisioPackage<BufReader<File>> {
    /// Open a `.vsdx` file with default options.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let package = OpcPackage::open(path)?;
        Ok(Self::with_package(package))
    }
}

impl<R: Read + Seek> VisioPackage<R> {
    /// Load a drawing from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let package = OpcPackage::from_reader(reader)?;
        Ok(Self::with_package(package))
    }

    fn with_package(package: OpcPackage<R>) -> Self {
        Self {
            package,
            options: SearchOptions::default(),
        }
    }

    /// Replace the search options.
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Read the pages index.
    pub fn page_index(&mut self) -> Result<PageIndex> {
        Ok(pages::resolve_pages(&mut self.package, self.options.rel_id_order)?.index)
    }

    /// Named page parts, in relationship id order.
    pub fn pages(&mut self) -> Result<Vec<Page>> {
        pages::named_pages(&mut self.package, self.options.pairing, self.options.rel_id_order)
    }

    /// Collect every shape text starting with `prefix`, grouped by page.
    pub fn search(&mut self, prefix: &str) -> Result<PrefixMatches> {
        let mut matches = PrefixMatches::new();
        for page in self.pages()? {
            let texts = page.prefix_texts(prefix, self.options.text_scope)?;
            log::debug!("page {:?}: {} match(es)", page.name(), texts.len());
            matches.record(page.name(), texts);
        }
        Ok(matches)
    }

    /// Give back the underlying package.
    pub fn into_package(self) -> OpcPackage<R> {
        self.package
    }
}

/// Search a `.vsdx` file for shape texts starting with `prefix`.
///
/// The file is opened for this call only and closed before returning, on
/// success and failure alike.
///
/// # Example
/// ```no_run
/// let notes = vsdx_notes::search_prefix_text("diagram.vsdx", "Note")?;
/// for (page, texts) in notes.iter() {
///     println!("{}: {:?}", page, texts);
/// }
/// # Ok::<(), vsdx_notes::VisioError>(())
/// ```
pub fn search_prefix_text<P: AsRef<Path>>(path: P, prefix: &str) -> Result<PrefixMatches> {
    search_prefix_text_with(path, prefix, &SearchOptions::default())
}

/// [`search_prefix_text`] with explicit options.
pub fn search_prefix_text_with<P: AsRef<Path>>(
    path: P,
    prefix: &str,
    options: &SearchOptions,
) -> Result<PrefixMatches> {
    let path = path.as_ref();
    log::debug!("searching {} for {:?}", path.display(), prefix);
    VisioPackage::open(path)?.with_options(*options).search(prefix)
}
