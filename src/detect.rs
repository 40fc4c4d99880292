//! Input format detection for templates and reports.

use crate::error::{Error, Result};
use crate::parser::xml;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

/// Formats accepted by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFormat {
    /// A WordprocessingML package (template)
    Docx,
    /// A PDF file with its header version (photo report)
    Pdf {
        /// PDF version (e.g., "1.7", "2.0")
        version: String,
    },
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Docx => write!(f, "DOCX"),
            InputFormat::Pdf { version } => write!(f, "PDF {}", version),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Zip local file header signature.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Usual location of the main document part.
const DOCX_MAIN_PART: &str = "word/document.xml";

/// Package-level relationships part.
pub(crate) const PACKAGE_RELATIONSHIPS: &str = "_rels/.rels";
const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const WORDPROCESSING_MAIN_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Detect the input format of a file.
///
/// # Example
/// ```no_run
/// use glrfill::detect::{detect_format_from_path, InputFormat};
///
/// let format = detect_format_from_path("template.docx").unwrap();
/// assert_eq!(format, InputFormat::Docx);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let mut data = Vec::new();
    File::open(path)?.read_to_end(&mut data)?;
    detect_format_from_bytes(&data)
}

/// Detect the input format of in-memory file content.
///
/// # Returns
/// * `Ok(InputFormat)` for a DOCX package or a PDF with a valid header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if let Some(version) = pdf_version(data) {
        return Ok(InputFormat::Pdf { version });
    }
    if is_docx_bytes(data) {
        return Ok(InputFormat::Docx);
    }
    Err(Error::UnknownFormat)
}

/// PDF header version, if `data` starts with a valid `%PDF-x.y` header.
pub fn pdf_version(data: &[u8]) -> Option<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return None;
    }

    // Extract version string (e.g., "1.7" from "%PDF-1.7")
    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    is_valid_version(&version).then_some(version)
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version(data).is_some()
}

/// Check if bytes are a WordprocessingML package.
///
/// The package must hold `word/document.xml`, or its relationships must
/// name a main part that `[Content_Types].xml` declares as a document.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    if !data.starts_with(ZIP_MAGIC) {
        return false;
    }
    let Ok(mut archive) = ZipArchive::new(Cursor::new(data)) else {
        return false;
    };
    if archive.file_names().any(|name| name == DOCX_MAIN_PART) {
        return true;
    }
    declares_document_main_part(&mut archive)
}

/// Main document part named by a package relationships part.
pub(crate) fn office_document_target(rels: &[u8]) -> Option<String> {
    let root = xml::parse(rels).ok()?;
    let target = root
        .elements()
        .filter(|e| e.is("Relationship"))
        .find(|e| {
            e.attribute("Type")
                .is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL))
        })
        .and_then(|e| e.attribute("Target"))
        .map(|t| t.trim_start_matches('/').to_string());
    target
}

fn declares_document_main_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> bool {
    let Some(target) =
        read_entry(archive, PACKAGE_RELATIONSHIPS).and_then(|rels| office_document_target(&rels))
    else {
        return false;
    };
    if archive.by_name(&target).is_err() {
        return false;
    }

    let part_name = format!("/{}", target);
    read_entry(archive, CONTENT_TYPES_PART)
        .and_then(|types| xml::parse(&types).ok())
        .is_some_and(|root| {
            root.elements().filter(|e| e.is("Override")).any(|e| {
                e.attribute("PartName") == Some(part_name.as_str())
                    && e.attribute("ContentType") == Some(WORDPROCESSING_MAIN_TYPE)
            })
        })
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Option<Vec<u8>> {
    let mut file = archive.by_name(name).ok()?;
    let mut data = Vec::new();
    file.read_to_end(&mut data).ok()?;
    Some(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::docx_parser::testing::{build_docx, build_docx_with_main_part, build_package};

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(
            format,
            InputFormat::Pdf {
                version: "1.7".to_string()
            }
        );
        assert_eq!(format.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_detect_docx() {
        let data = build_docx("<w:p/>");
        assert_eq!(detect_format_from_bytes(&data).unwrap(), InputFormat::Docx);
        assert!(is_docx_bytes(&data));
        assert!(!is_pdf_bytes(&data));
    }

    #[test]
    fn test_zip_without_document_is_not_docx() {
        use std::io::Write;
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("readme.txt", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"hello").unwrap();
        let data = writer.finish().unwrap().into_inner();

        assert!(!is_docx_bytes(&data));
        assert!(matches!(
            detect_format_from_bytes(&data),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_detect_docx_with_relocated_main_part() {
        let data = build_docx_with_main_part("word/document2.xml", "<w:p/>");
        assert!(is_docx_bytes(&data));
        assert_eq!(detect_format_from_bytes(&data).unwrap(), InputFormat::Docx);
    }

    #[test]
    fn test_other_office_package_is_not_docx() {
        let data = build_package(&[
            (
                "[Content_Types].xml",
                r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#,
            ),
            (
                "_rels/.rels",
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#,
            ),
            ("xl/workbook.xml", "<workbook/>"),
        ]);
        assert!(!is_docx_bytes(&data));
    }

    #[test]
    fn test_office_document_target() {
        let rels = br#"<Relationships><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="/word/document2.xml"/></Relationships>"#;
        assert_eq!(
            office_document_target(rels).as_deref(),
            Some("word/document2.xml")
        );
        assert_eq!(office_document_target(b"<Relationships/>"), None);
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        assert!(!is_pdf_bytes(b"%PDF"));
        assert!(!is_docx_bytes(b"PK"));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }
}
