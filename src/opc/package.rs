/// Read access to an OPC package.
///
/// This module provides the main OpcPackage type: an opened ZIP container
/// plus its content type map. Parts and relationship collections are read
/// from the archive on demand; nothing is cached between calls, and dropping
/// the package releases the underlying file.
use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use crate::opc::part::Part;
use crate::opc::phys_pkg::PhysPkgReader;
use crate::opc::pkgreader::{ContentTypeMap, parse_rels_xml};
use crate::opc::rel::{RelIdOrder, Relationship, Relationships};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// An opened OPC package.
///
/// Reading methods take `&mut self` because every read seeks the
/// underlying archive; one package serves one caller at a time.
pub struct OpcPackage<R: Read + Seek> {
    /// The physical ZIP container
    phys: PhysPkgReader<R>,

    /// Content types declared in [Content_Types].xml
    content_types: ContentTypeMap,
}

impl OpcPackage<BufReader<File>> {
    /// Open an OPC package from a file.
    ///
    /// # Errors
    /// `PackageNotFound` if `path` is not an existing file (checked before
    /// anything is opened), `OpenFailed` if the file is not a readable
    /// package.
    ///
    /// # Example
    /// ```no_run
    /// use vsdx_notes::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::open("diagram.vsdx")?;
    /// # Ok::<(), vsdx_notes::opc::OpcError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let phys = PhysPkgReader::open(path)?;
        Self::from_phys_reader(phys)
    }
}

impl<R: Read + Seek> OpcPackage<R> {
    /// Load an OPC package from a reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let phys = PhysPkgReader::new(reader)?;
        Self::from_phys_reader(phys)
    }

    fn from_phys_reader(mut phys: PhysPkgReader<R>) -> Result<Self> {
        let content_types = match phys.content_types_xml()? {
            Some(xml) => ContentTypeMap::from_xml(&xml).map_err(|e| {
                OpcError::OpenFailed(format!("{} is unreadable: {}", CONTENT_TYPES_URI, e))
            })?,
            None => {
                log::debug!("package has no {}, content types will be empty", CONTENT_TYPES_URI);
                ContentTypeMap::default()
            },
        };

        Ok(Self {
            phys,
            content_types,
        })
    }

    /// Get a part by its partname.
    pub fn part(&mut self, partname: &PackURI) -> Result<Part> {
        let blob = self.phys.blob_for(partname)?;
        let content_type = self
            .content_types
            .get(partname)
            .unwrap_or_default()
            .to_string();
        Ok(Part::new(partname.clone(), content_type, blob))
    }

    /// Check if a part exists in the package.
    pub fn contains_part(&self, partname: &PackURI) -> bool {
        !partname.is_package() && self.phys.contains(partname)
    }

    /// List the partnames of every part in the package.
    ///
    /// Relationship parts, [Content_Types].xml and directory entries are not
    /// parts and are left out.
    pub fn part_names(&self) -> Vec<PackURI> {
        let mut names: Vec<PackURI> = self
            .phys
            .member_names()
            .iter()
            .map(|name| PackURI::from_membername(name))
            .filter(|uri| uri.as_str() != CONTENT_TYPES_URI)
            .filter(|uri| !uri.ext().eq_ignore_ascii_case("rels"))
            .collect();
        names.sort();
        names
    }

    /// Content type declared for a partname, if any.
    pub fn content_type_of(&self, partname: &PackURI) -> Option<&str> {
        self.content_types.get(partname)
    }

    /// Get the relationships whose source is `source`.
    ///
    /// Pass [`PackURI::package`] for the package-level relationships. A source
    /// without a .rels part has no relationships.
    pub fn rels_for(&mut self, source: &PackURI) -> Result<Relationships> {
        match self.phys.rels_xml_for(source)? {
            Some(xml) => parse_rels_xml(&xml, source),
            None => Ok(Relationships::new(source.base_uri().to_string())),
        }
    }

    /// Follow the first relationship of `reltype` from `source` to its part.
    ///
    /// # Errors
    /// `RelationshipNotFound` if `source` has no relationship of that type,
    /// `PartNotFound` if the target is not in the package.
    pub fn resolve_one(&mut self, source: &PackURI, reltype: &str) -> Result<Part> {
        let rels = self.rels_for(source)?;
        let rel = rels.first_with_reltype(reltype)?;
        let partname = rel.target_partname()?;
        log::debug!("{} --{}--> {}", source, rel.r_id(), partname);
        self.part(&partname)
    }

    /// Follow every relationship of `reltype` from `source`, ordered by
    /// relationship id.
    ///
    /// Returns an empty vector if there is none. Fails on the first target
    /// that is not in the package.
    pub fn resolve_many(
        &mut self,
        source: &PackURI,
        reltype: &str,
        order: RelIdOrder,
    ) -> Result<Vec<(Relationship, Part)>> {
        let rels = self.rels_for(source)?;
        let matching = rels.all_with_reltype(reltype, order);

        let mut resolved = Vec::with_capacity(matching.len());
        for rel in matching {
            let partname = rel.target_partname()?;
            let part = self.part(&partname)?;
            resolved.push((rel.clone(), part));
        }
        Ok(resolved)
    }

    /// Follow the first package-level relationship of `reltype`.
    #[inline]
    pub fn part_by_reltype(&mut self, reltype: &str) -> Result<Part> {
        self.resolve_one(&PackURI::package(), reltype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opc::constants::{content_type, relationship_type};
    use crate::visio::fixtures::VsdxBuilder;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn two_page_package() -> OpcPackage<Cursor<Vec<u8>>> {
        let bytes = VsdxBuilder::new()
            .page("Alpha", "<Shape ID=\"1\"><Text>a</Text></Shape>")
            .page("Beta", "<Shape ID=\"1\"><Text>b</Text></Shape>")
            .build();
        OpcPackage::from_reader(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_part_by_reltype() {
        let mut pkg = two_page_package();

        let document = pkg.part_by_reltype(relationship_type::VSD_DOCUMENT).unwrap();
        assert_eq!(document.partname().as_str(), "/visio/document.xml");
        assert_eq!(document.content_type(), content_type::VSD_DRAWING_MAIN);
    }

    #[test]
    fn test_resolve_chain() {
        let mut pkg = two_page_package();

        let document = pkg.part_by_reltype(relationship_type::VSD_DOCUMENT).unwrap();
        let pages = pkg
            .resolve_one(document.partname(), relationship_type::VSD_PAGES)
            .unwrap();
        assert_eq!(pages.partname().as_str(), "/visio/pages/pages.xml");
        assert_eq!(pages.content_type(), content_type::VSD_PAGES);

        let page_parts = pkg
            .resolve_many(pages.partname(), relationship_type::VSD_PAGE, RelIdOrder::default())
            .unwrap();
        let resolved: Vec<(&str, &str)> = page_parts
            .iter()
            .map(|(rel, part)| (rel.r_id(), part.partname().as_str()))
            .collect();
        assert_eq!(
            resolved,
            vec![("rId1", "/visio/pages/page1.xml"), ("rId2", "/visio/pages/page2.xml")]
        );
        assert_eq!(page_parts[0].1.content_type(), content_type::VSD_PAGE);
    }

    #[test]
    fn test_resolve_one_missing_relationship() {
        let mut pkg = two_page_package();

        let result = pkg.resolve_one(&PackURI::package(), relationship_type::VSD_PAGES);
        assert!(matches!(result, Err(OpcError::RelationshipNotFound(_))));
    }

    #[test]
    fn test_resolve_many_none_is_empty() {
        let mut pkg = two_page_package();

        let document = PackURI::new("/visio/document.xml").unwrap();
        let pages = pkg
            .resolve_many(&document, relationship_type::VSD_PAGE, RelIdOrder::default())
            .unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_dangling_target_is_part_not_found() {
        let bytes = VsdxBuilder::new()
            .page("Alpha", "")
            .without_member("visio/pages/page1.xml")
            .build();
        let mut pkg = OpcPackage::from_reader(Cursor::new(bytes)).unwrap();

        let pages = PackURI::new("/visio/pages/pages.xml").unwrap();
        let result = pkg.resolve_many(&pages, relationship_type::VSD_PAGE, RelIdOrder::default());
        assert!(matches!(result, Err(OpcError::PartNotFound(_))));
    }

    #[test]
    fn test_part_names_and_contains() {
        let pkg = two_page_package();

        let names: Vec<String> = pkg.part_names().iter().map(|uri| uri.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "/visio/document.xml",
                "/visio/pages/page1.xml",
                "/visio/pages/page2.xml",
                "/visio/pages/pages.xml",
            ]
        );
        assert!(pkg.contains_part(&PackURI::new("/visio/pages/page2.xml").unwrap()));
        assert!(!pkg.contains_part(&PackURI::package()));
        assert_eq!(
            pkg.content_type_of(&PackURI::new("/visio/pages/page1.xml").unwrap()),
            Some(content_type::VSD_PAGE)
        );
    }

    #[test]
    fn test_package_without_content_types() {
        let mut zip_data = Vec::new();
        {
            let mut writer = ZipWriter::new(Cursor::new(&mut zip_data));
            let options = SimpleFileOptions::default();
            writer.start_file("_rels/.rels", options).unwrap();
            writer
                .write_all(
                    br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.microsoft.com/visio/2010/relationships/document" Target="/visio/document.xml"/>
</Relationships>"#,
                )
                .unwrap();
            writer.start_file("visio/document.xml", options).unwrap();
            writer.write_all(b"<VisioDocument/>").unwrap();
            writer.finish().unwrap();
        }

        let mut pkg = OpcPackage::from_reader(Cursor::new(zip_data)).unwrap();
        let document = pkg.part_by_reltype(relationship_type::VSD_DOCUMENT).unwrap();
        assert_eq!(document.content_type(), "");
        assert_eq!(document.blob(), b"<VisioDocument/>");
    }

    #[test]
    fn test_open_from_disk() {
        let bytes = VsdxBuilder::new().page("Alpha", "").build();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes).unwrap();

        let mut pkg = OpcPackage::open(file.path()).unwrap();
        assert!(pkg.part_by_reltype(relationship_type::VSD_DOCUMENT).is_ok());

        let missing = file.path().with_extension("nope");
        assert!(matches!(OpcPackage::open(missing), Err(OpcError::PackageNotFound(_))));
    }
}
