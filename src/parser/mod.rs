//! Input parsing: DOCX templates and PDF photo reports.

pub mod docx_parser;
pub mod pdf_parser;
pub mod xml;

pub use docx_parser::DocxParser;
pub use pdf_parser::{
    extract_pages, extract_text, extract_text_from_path, join_pages, try_extract_text,
};
