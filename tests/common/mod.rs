//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style><w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/></w:style><w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/></w:style></w:styles>"#;

/// Bytes standing in for an embedded image; only their survival matters.
pub const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really an image";

/// Build a DOCX package with `body_xml` before the section properties.
pub fn docx(body_xml: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}"><w:body>{}<w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr></w:body></w:document>"#,
        W_NS, body_xml
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    for (name, content, options) in [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes(), deflated),
        ("_rels/.rels", RELS.as_bytes(), deflated),
        ("word/document.xml", document.as_bytes(), deflated),
        ("word/styles.xml", STYLES.as_bytes(), deflated),
        ("word/media/image1.png", IMAGE_BYTES, stored),
    ] {
        writer.start_file(name, options).unwrap();
        writer.write_all(content).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// A paragraph with a single run.
pub fn para(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
}

/// A paragraph with a single bold, 12pt run.
pub fn bold_para(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:rPr><w:b/><w:sz w:val="24"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        text
    )
}

/// A paragraph in the given style.
pub fn styled_para(style: &str, text: &str) -> String {
    format!(
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        style, text
    )
}

/// An empty paragraph.
pub fn blank() -> String {
    "<w:p/>".to_string()
}

/// A table with one row per slice of cell texts.
pub fn table(rows: &[&[&str]]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr/>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in row.iter() {
            xml.push_str("<w:tc>");
            xml.push_str(&para(cell));
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

/// The claim template used across tests.
pub fn glr_template() -> Vec<u8> {
    let body = [
        styled_para("Title", "GENERAL LOSS REPORT"),
        blank(),
        bold_para("Date of Loss:"),
        para("(enter date)"),
        para("John Smith, 123 Main St"),
        blank(),
        styled_para("Heading1", "DWELLING"),
        para("(one story, two story, etc.)"),
        para("DwellingRoof"),
        para("Describe the roof damage here."),
        table(&[&["Item", "Count"], &["Shingles", ""]]),
    ]
    .concat();
    docx(&body)
}

/// Write bytes to a temporary `.docx` file.
pub fn temp_docx(data: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
    file.write_all(data).unwrap();
    file.flush().unwrap();
    file
}
