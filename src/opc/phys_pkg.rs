//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level reading of package members from a ZIP
//! archive. Members are decompressed on demand, one part at a time; nothing is
//! cached between reads.

use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Physical package reader that provides access to members of a ZIP-based OPC package.
///
/// The reader owns the archive (and with it the file handle); dropping it
/// closes the package.
pub struct PhysPkgReader<R: Read + Seek> {
    /// The underlying ZIP archive
    archive: ZipArchive<R>,
}

impl PhysPkgReader<BufReader<File>> {
    /// Open an OPC package from a file path.
    ///
    /// # Errors
    /// Returns `PackageNotFound` if the path is not an existing file, before
    /// anything is read, and `OpenFailed` if the file is not a ZIP archive.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: Read + Seek> PhysPkgReader<R> {
    /// Create a new PhysPkgReader over any seekable reader.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader).map_err(|e| OpcError::OpenFailed(e.to_string()))?;
        Ok(Self { archive })
    }

    /// Get the binary content for a part by its PackURI.
    ///
    /// Member names are matched exactly first, then ASCII case-insensitively,
    /// since OPC part names are case-insensitive.
    pub fn blob_for(&mut self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        let index = self
            .member_index(pack_uri)
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))?;

        let mut file = self.archive.by_index(index)?;
        if file.is_dir() {
            return Err(OpcError::PartNotFound(pack_uri.to_string()));
        }

        let mut blob = Vec::new();
        file.read_to_end(&mut blob)?;
        Ok(blob)
    }

    /// Get the [Content_Types].xml content, if the package has one.
    pub fn content_types_xml(&mut self) -> Result<Option<Vec<u8>>> {
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        self.optional_blob_for(&content_types_uri)
    }

    /// Get the relationships XML for a specific source URI.
    ///
    /// Returns None if the source has no relationships part.
    pub fn rels_xml_for(&mut self, source_uri: &PackURI) -> Result<Option<Vec<u8>>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        self.optional_blob_for(&rels_uri)
    }

    fn optional_blob_for(&mut self, pack_uri: &PackURI) -> Result<Option<Vec<u8>>> {
        match self.blob_for(pack_uri) {
            Ok(blob) => Ok(Some(blob)),
            Err(OpcError::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Check if a specific member exists in the package.
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.member_index(pack_uri).is_some()
    }

    /// List all member names in the package, directories excluded.
    pub fn member_names(&self) -> Vec<String> {
        self.archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(String::from)
            .collect()
    }

    fn member_index(&self, pack_uri: &PackURI) -> Option<usize> {
        let membername = pack_uri.membername();
        if membername.is_empty() {
            return None;
        }
        self.archive.index_for_name(membername).or_else(|| {
            let actual = self
                .archive
                .file_names()
                .find(|name| name.eq_ignore_ascii_case(membername))?;
            self.archive.index_for_name(actual)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn archive(members: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, data) in members {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data.as_bytes()).unwrap();
            }
        }
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_blob_for() {
        let mut reader = PhysPkgReader::new(archive(&[
            ("visio/", ""),
            ("visio/document.xml", "<VisioDocument/>"),
        ]))
        .unwrap();

        let uri = PackURI::new("/visio/document.xml").unwrap();
        assert!(reader.contains(&uri));
        assert_eq!(reader.blob_for(&uri).unwrap(), b"<VisioDocument/>");
        assert_eq!(reader.member_names(), vec!["visio/document.xml".to_string()]);

        let missing = PackURI::new("/visio/pages/pages.xml").unwrap();
        assert!(!reader.contains(&missing));
        assert!(matches!(reader.blob_for(&missing), Err(OpcError::PartNotFound(_))));
    }

    #[test]
    fn test_blob_for_is_case_insensitive() {
        let mut reader =
            PhysPkgReader::new(archive(&[("Visio/Pages/Page1.xml", "<PageContents/>")])).unwrap();

        let uri = PackURI::new("/visio/pages/page1.xml").unwrap();
        assert_eq!(reader.blob_for(&uri).unwrap(), b"<PageContents/>");
    }

    #[test]
    fn test_missing_rels_and_content_types() {
        let mut reader = PhysPkgReader::new(archive(&[("visio/document.xml", "<x/>")])).unwrap();

        assert!(reader.content_types_xml().unwrap().is_none());
        let source = PackURI::new("/visio/document.xml").unwrap();
        assert!(reader.rels_xml_for(&source).unwrap().is_none());
    }

    #[test]
    fn test_not_a_zip() {
        let result = PhysPkgReader::new(Cursor::new(b"definitely not a zip".to_vec()));
        assert!(matches!(result, Err(OpcError::OpenFailed(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PhysPkgReader::open(dir.path().join("missing.vsdx"));
        assert!(matches!(result, Err(OpcError::PackageNotFound(_))));

        // A directory is not a package file either
        let result = PhysPkgReader::open(dir.path());
        assert!(matches!(result, Err(OpcError::PackageNotFound(_))));
    }
}
