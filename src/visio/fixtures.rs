//! In-memory `.vsdx` packages for tests.

use crate::opc::constants::{content_type, namespace, relationship_type, target_mode};
use quick_xml::escape::escape;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

struct PageSpec {
    name: Option<String>,
    background: bool,
    rel_id: String,
    listed: bool,
    shapes: String,
}

/// Builds a minimal drawing: document, pages collection and one part per page.
///
/// Page `n` (1-based, in the order added) is stored at
/// `/visio/pages/page{n}.xml` and, unless given another id, reached through
/// relationship `rId{n}`.
#[derive(Default)]
pub struct VsdxBuilder {
    pages: Vec<PageSpec>,
    omitted: Vec<String>,
    index_rel_ids: bool,
    page_relationships: bool,
}

impl VsdxBuilder {
    pub fn new() -> Self {
        Self {
            index_rel_ids: true,
            page_relationships: true,
            ..Self::default()
        }
    }

    fn push(
        mut self,
        name: Option<&str>,
        background: bool,
        rel_id: Option<&str>,
        listed: bool,
        shapes: &str,
    ) -> Self {
        let rel_id = rel_id.map_or_else(|| format!("rId{}", self.pages.len() + 1), str::to_string);
        self.pages.push(PageSpec {
            name: name.map(str::to_string),
            background,
            rel_id,
            listed,
            shapes: shapes.to_string(),
        });
        self
    }

    /// A foreground page whose `<Shapes>` holds `shapes`.
    pub fn page(self, name: &str, shapes: &str) -> Self {
        self.push(Some(name), false, None, true, shapes)
    }

    pub fn page_with_rel_id(self, name: &str, rel_id: &str, shapes: &str) -> Self {
        self.push(Some(name), false, Some(rel_id), true, shapes)
    }

    pub fn background_page(self, name: &str, shapes: &str) -> Self {
        self.push(Some(name), true, None, true, shapes)
    }

    /// An index entry without a `Name` attribute.
    pub fn unnamed_page(self, shapes: &str) -> Self {
        self.push(None, false, None, true, shapes)
    }

    /// A page part the index does not list.
    pub fn unlisted_page(self, rel_id: &str, shapes: &str) -> Self {
        self.push(None, false, Some(rel_id), false, shapes)
    }

    /// Leave `<Rel>` children out of the index entries.
    pub fn without_index_rel_ids(mut self) -> Self {
        self.index_rel_ids = false;
        self
    }

    /// Leave every `page` relationship out of the pages collection's rels.
    pub fn without_page_relationships(mut self) -> Self {
        self.page_relationships = false;
        self
    }

    /// Drop a member (e.g. "visio/pages/page1.xml") from the archive.
    pub fn without_member(mut self, membername: &str) -> Self {
        self.omitted.push(membername.to_string());
        self
    }

    fn content_types(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="{}"><Default Extension="rels" ContentType="{}"/><Default Extension="xml" ContentType="{}"/><Override PartName="/visio/document.xml" ContentType="{}"/><Override PartName="/visio/pages/pages.xml" ContentType="{}"/>"#,
            namespace::OPC_CONTENT_TYPES,
            content_type::OPC_RELATIONSHIPS,
            content_type::XML,
            content_type::VSD_DRAWING_MAIN,
            content_type::VSD_PAGES,
        );
        for n in 1..=self.pages.len() {
            xml.push_str(&format!(
                r#"<Override PartName="/visio/pages/page{}.xml" ContentType="{}"/>"#,
                n,
                content_type::VSD_PAGE
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    fn rels(entries: &[(&str, &str, String)]) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">"#,
            namespace::OPC_RELATIONSHIPS
        );
        for (r_id, reltype, target) in entries {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}" TargetMode="{}"/>"#,
                r_id,
                reltype,
                target,
                target_mode::INTERNAL
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }

    fn pages_index(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Pages xmlns="{}" xmlns:r="{}" xml:space="preserve">"#,
            namespace::VSD_MAIN,
            namespace::OFC_RELATIONSHIPS
        );
        for (i, page) in self.pages.iter().enumerate().filter(|(_, page)| page.listed) {
            xml.push_str(&format!(r#"<Page ID="{}""#, i));
            if let Some(name) = &page.name {
                let name = escape(name.as_str());
                xml.push_str(&format!(r#" NameU="{}" Name="{}""#, name, name));
            }
            if page.background {
                xml.push_str(r#" Background="1""#);
            }
            xml.push_str("><PageSheet LineStyle=\"0\"/>");
            if self.index_rel_ids {
                xml.push_str(&format!(r#"<Rel r:id="{}"/>"#, page.rel_id));
            }
            xml.push_str("</Page>");
        }
        xml.push_str("</Pages>");
        xml
    }

    fn page_contents(shapes: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<PageContents xmlns="{}" xmlns:r="{}" xml:space="preserve"><Shapes>{}</Shapes></PageContents>"#,
            namespace::VSD_MAIN,
            namespace::OFC_RELATIONSHIPS,
            shapes
        )
    }

    /// Write the package and return the archive bytes.
    pub fn build(&self) -> Vec<u8> {
        let mut members: Vec<(String, String)> = vec![
            ("[Content_Types].xml".to_string(), self.content_types()),
            (
                "_rels/.rels".to_string(),
                Self::rels(&[("rId1", relationship_type::VSD_DOCUMENT, "visio/document.xml".to_string())]),
            ),
            (
                "visio/document.xml".to_string(),
                format!(
                    r#"<VisioDocument xmlns="{}" xmlns:r="{}"/>"#,
                    namespace::VSD_MAIN,
                    namespace::OFC_RELATIONSHIPS
                ),
            ),
            (
                "visio/_rels/document.xml.rels".to_string(),
                Self::rels(&[("rId1", relationship_type::VSD_PAGES, "pages/pages.xml".to_string())]),
            ),
            ("visio/pages/pages.xml".to_string(), self.pages_index()),
        ];

        let page_rels: Vec<(&str, &str, String)> = if self.page_relationships {
            self.pages
                .iter()
                .enumerate()
                .map(|(i, page)| {
                    (
                        page.rel_id.as_str(),
                        relationship_type::VSD_PAGE,
                        format!("page{}.xml", i + 1),
                    )
                })
                .collect()
        } else {
            Vec::new()
        };
        members.push(("visio/pages/_rels/pages.xml.rels".to_string(), Self::rels(&page_rels)));

        for (i, page) in self.pages.iter().enumerate() {
            members.push((format!("visio/pages/page{}.xml", i + 1), Self::page_contents(&page.shapes)));
        }

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, data) in members.iter().filter(|(name, _)| !self.omitted.contains(name)) {
            writer.start_file(name.as_str(), options).unwrap();
            writer.write_all(data.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}
