//! Rendering module for template output: DOCX, plain text and JSON.

pub mod docx;
mod json;
pub mod text;

pub use docx::{save, to_docx_bytes, DOCX_MIME_TYPE, OUTPUT_FILE_NAME};
pub use json::{to_json, JsonFormat};
pub use text::{to_text, truncate_chars};
