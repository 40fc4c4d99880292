//! DOCX serialization.
//!
//! The main document part is regenerated from the model; every other part
//! is written back byte-for-byte in its original archive order.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::model::TemplateDocument;
use crate::parser::xml;

/// File name offered for the populated report.
pub const OUTPUT_FILE_NAME: &str = "completed_glr_report.docx";

/// MIME type of a WordprocessingML document.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Serialize a document to DOCX bytes.
pub fn to_docx_bytes(doc: &TemplateDocument) -> Result<Vec<u8>> {
    let main_xml = xml::write(&doc.to_root())?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut wrote_main = false;

    for part in &doc.package.parts {
        let method = if part.compressed {
            CompressionMethod::Deflated
        } else {
            CompressionMethod::Stored
        };
        let options = SimpleFileOptions::default().compression_method(method);

        if part.is_dir {
            writer.add_directory(part.name.as_str(), options)?;
            continue;
        }

        writer.start_file(part.name.as_str(), options)?;
        if part.name == doc.package.main_part {
            writer.write_all(&main_xml)?;
            wrote_main = true;
        } else {
            writer.write_all(&part.data)?;
        }
    }

    if !wrote_main {
        // Documents built in memory have no package parts yet
        writer.start_file(doc.package.main_part.as_str(), SimpleFileOptions::default())?;
        writer.write_all(&main_xml)?;
    }

    let bytes = writer.finish()?.into_inner();
    log::debug!("Serialized DOCX package ({} bytes)", bytes.len());
    Ok(bytes)
}

/// Serialize a document and write it to `path`.
pub fn save<P: AsRef<Path>>(doc: &TemplateDocument, path: P) -> Result<()> {
    let bytes = to_docx_bytes(doc)?;
    fs::write(path, bytes)?;
    Ok(())
}
