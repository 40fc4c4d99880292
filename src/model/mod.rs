//! Document model types for DOCX template content.
//!
//! This module defines the in-memory form of a template between loading and
//! saving. Paragraphs and runs are decoded enough to read and rewrite their
//! text; everything else is kept as raw XML so formatting survives.

mod document;
mod package;
mod paragraph;
mod style;
mod table;

pub use document::{Block, TemplateDocument, WORDPROCESSINGML_NS};
pub use package::{Package, PackagePart, MAIN_DOCUMENT_PART};
pub use paragraph::{InlineContent, Paragraph, RunContent, TextRun};
pub use style::{StyleSheet, FALLBACK_STYLE_NAME};
pub use table::{Table, TableCell, TableRow};
