//! # glrfill
//!
//! Fill General Loss Report (GLR) templates from photo inspection reports.
//!
//! A GLR template is a Word document whose paragraphs mix section headers,
//! field labels and parenthesized instructions. This library reads the
//! template, extracts text from the PDF inspection reports, asks a hosted
//! language model to rewrite the report one paragraph per line, and writes
//! the answer back into the template paragraph by paragraph, keeping the
//! template's styles and run formatting.
//!
//! ## Quick Start
//!
//! ```no_run
//! use glrfill::{CompletionConfig, CredentialSource, ReportPipeline, Upload};
//!
//! fn main() -> glrfill::Result<()> {
//!     let pipeline =
//!         ReportPipeline::from_credentials(&CredentialSource::default(), CompletionConfig::default())?;
//!
//!     let output = pipeline.run(
//!         &Upload::from_path("glr_template.docx")?,
//!         &[Upload::from_path("photo_report.pdf")?],
//!     )?;
//!     std::fs::write(&output.file_name, &output.document)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! - **Template model**: lossless DOCX round-trip of body paragraphs and tables
//! - **Structure analysis**: LABEL / HEADER / INSTRUCTION / CONTENT classification
//! - **Report extraction**: PDF text, degrading to empty text on failure
//! - **Completion**: OpenAI-compatible chat client behind a trait
//! - **Population**: positional paragraph rewrite preserving first-run formatting

pub mod analyze;
pub mod completion;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod populate;
pub mod render;

// Re-export commonly used types
pub use analyze::{analyze_structure, classify, structure_summary, ParagraphDescriptor, ParagraphKind};
pub use completion::{
    ChatCompletionClient, CompletionConfig, CompletionService, Credential, CredentialSource,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use model::{Block, Paragraph, Table, TableCell, TableRow, TemplateDocument, TextRun};
pub use parser::DocxParser;
pub use pipeline::{
    LogObserver, PipelineObserver, PipelineOptions, PipelineOutput, ReportPipeline, Stage, Upload,
};
pub use populate::{populate_document, populate_template, rewrite_paragraph, PopulateReport};
pub use render::JsonFormat;

use std::path::Path;

/// Open a DOCX template.
///
/// # Example
///
/// ```no_run
/// use glrfill::open_template;
///
/// let doc = open_template("glr_template.docx").unwrap();
/// println!("Paragraphs: {}", doc.paragraph_count());
/// ```
pub fn open_template<P: AsRef<Path>>(path: P) -> Result<TemplateDocument> {
    DocxParser::open(path)?.parse()
}

/// Open a DOCX template from bytes.
pub fn open_template_bytes(data: &[u8]) -> Result<TemplateDocument> {
    DocxParser::from_bytes(data)?.parse()
}

/// Plain text of a template: non-blank paragraphs, then table rows.
///
/// # Example
///
/// ```no_run
/// let text = glrfill::template_text("glr_template.docx").unwrap();
/// println!("{}", text);
/// ```
pub fn template_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = open_template(path)?;
    Ok(render::to_text(&doc))
}

/// Classify every non-blank paragraph of a template.
pub fn template_structure<P: AsRef<Path>>(path: P) -> Result<Vec<ParagraphDescriptor>> {
    let doc = open_template(path)?;
    Ok(analyze_structure(&doc))
}

/// Classify a template and serialize the descriptors to JSON.
///
/// # Example
///
/// ```no_run
/// use glrfill::{template_structure_json, JsonFormat};
///
/// let json = template_structure_json("glr_template.docx", JsonFormat::Pretty).unwrap();
/// std::fs::write("structure.json", json).unwrap();
/// ```
pub fn template_structure_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let descriptors = template_structure(path)?;
    render::to_json(&descriptors, format)
}

/// Text of a PDF photo report, or an empty string if extraction fails.
pub fn report_text<P: AsRef<Path>>(path: P) -> String {
    parser::extract_text_from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::docx_parser::testing::build_docx;

    const BODY: &str = concat!(
        r#"<w:p><w:r><w:t>Date of Loss:</w:t></w:r></w:p>"#,
        r#"<w:p/>"#,
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>DWELLING</w:t></w:r></w:p>"#,
        r#"<w:p><w:r><w:t>(one story, two story, etc.)</w:t></w:r></w:p>"#,
    );

    #[test]
    fn test_open_template_bytes() {
        let doc = open_template_bytes(&build_docx(BODY)).unwrap();
        assert_eq!(doc.paragraph_count(), 4);
    }

    #[test]
    fn test_open_template_bytes_rejects_pdf() {
        let result = open_template_bytes(b"%PDF-1.7\n%test");
        assert!(matches!(result, Err(Error::InvalidTemplate(_))));
    }

    #[test]
    fn test_template_helpers_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.docx");
        std::fs::write(&path, build_docx(BODY)).unwrap();

        let text = template_text(&path).unwrap();
        assert_eq!(text, "Date of Loss:\nDWELLING\n(one story, two story, etc.)");

        let descriptors = template_structure(&path).unwrap();
        let kinds: Vec<_> = descriptors.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![ParagraphKind::Label, ParagraphKind::Header, ParagraphKind::Instruction]
        );
        assert_eq!(descriptors[1].index, 2);
        assert_eq!(descriptors[1].style, "Heading 1");

        let json = template_structure_json(&path, JsonFormat::Compact).unwrap();
        assert!(json.contains(r#""type":"LABEL""#));
    }

    #[test]
    fn test_report_text_missing_file_is_empty() {
        assert_eq!(report_text("/nonexistent/report.pdf"), "");
    }

    #[test]
    fn test_detect_format_unknown_magic() {
        let result = detect_format_from_bytes(b"<!DOCTYPE html><html></html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }
}
