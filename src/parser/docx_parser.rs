//! DOCX template parser using zip + quick-xml.

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use zip::ZipArchive;

use crate::detect::{is_docx_bytes, office_document_target, PACKAGE_RELATIONSHIPS};
use crate::error::{Error, Result};
use crate::model::{Package, PackagePart, StyleSheet, TemplateDocument, MAIN_DOCUMENT_PART};

use super::xml;

/// DOCX template parser.
pub struct DocxParser {
    package: Package,
}

impl DocxParser {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Read a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !is_docx_bytes(data) {
            return Err(Error::InvalidTemplate(
                "not a DOCX package (missing zip header or main document part)".to_string(),
            ));
        }

        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut package = Package::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)?;
            package.parts.push(PackagePart {
                name: file.name().to_string(),
                data: bytes,
                compressed: file.compression() != zip::CompressionMethod::Stored,
                is_dir: file.is_dir(),
            });
        }

        package.main_part = find_main_part(&package);
        log::debug!(
            "Read DOCX package with {} parts, main part {}",
            package.parts.len(),
            package.main_part
        );

        Ok(Self { package })
    }

    /// Read a DOCX package from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Parse the main document part and styles into a template document.
    pub fn parse(self) -> Result<TemplateDocument> {
        let main = self.package.get(&self.package.main_part).ok_or_else(|| {
            Error::InvalidTemplate(format!("missing main part {}", self.package.main_part))
        })?;
        let root = xml::parse(&main.data)?;
        if !root.is("w:document") {
            return Err(Error::InvalidTemplate(format!(
                "unexpected root element <{}> in {}",
                root.name, self.package.main_part
            )));
        }

        let styles = read_styles(&self.package);
        let doc = TemplateDocument::from_root(root, styles, self.package)?;
        log::debug!(
            "Parsed template: {} paragraphs, {} tables",
            doc.paragraph_count(),
            doc.tables().count()
        );
        Ok(doc)
    }
}

/// Locate the main document part through the package relationships,
/// falling back to `word/document.xml`.
fn find_main_part(package: &Package) -> String {
    let target = package
        .get(PACKAGE_RELATIONSHIPS)
        .and_then(|rels| office_document_target(&rels.data));

    match target {
        Some(t) if package.contains(&t) => t,
        _ => MAIN_DOCUMENT_PART.to_string(),
    }
}

/// Paragraph styles from the styles part next to the main part.
///
/// A missing or unreadable styles part yields an empty sheet, so every
/// paragraph reports the fallback style name.
fn read_styles(package: &Package) -> StyleSheet {
    let name = format!("{}styles.xml", package.main_part_dir());
    let Some(part) = package.get(&name) else {
        return StyleSheet::new();
    };

    match xml::parse(&part.data) {
        Ok(root) => StyleSheet::from_element(&root),
        Err(e) => {
            log::warn!("Ignoring unreadable styles part {}: {}", name, e);
            StyleSheet::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory DOCX fixtures.

    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    use crate::model::WORDPROCESSINGML_NS;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style><w:style w:type="paragraph" w:styleId="ListParagraph"><w:name w:val="List Paragraph"/></w:style></w:styles>"#;

    /// Build a zip container from `(name, content)` entries.
    pub fn build_package(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, content) in parts {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    /// Build a DOCX package whose body holds `body_xml`.
    pub fn build_docx(body_xml: &str) -> Vec<u8> {
        build_docx_with_main_part("word/document.xml", body_xml)
    }

    /// Build a DOCX package whose main part lives at `main_part`.
    pub fn build_docx_with_main_part(main_part: &str, body_xml: &str) -> Vec<u8> {
        let content_types = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#,
            main_part
        );
        let rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="{}"/></Relationships>"#,
            main_part
        );
        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:body></w:document>"#,
            WORDPROCESSINGML_NS, body_xml
        );

        build_package(&[
            ("[Content_Types].xml", content_types.as_str()),
            ("_rels/.rels", rels.as_str()),
            (main_part, document.as_str()),
            ("word/styles.xml", STYLES),
        ])
    }
}
