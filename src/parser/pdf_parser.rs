//! Photo-report text extraction using pdf-extract.
//!
//! `pdf_extract` can panic on malformed input instead of returning an
//! error, so every call runs inside [`std::panic::catch_unwind`].

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::{Error, Result};

/// Extract the text of each page.
pub fn extract_pages(data: &[u8]) -> Result<Vec<String>> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(data)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(Error::from(e)),
        Err(_) => Err(Error::PdfExtract(
            "extraction panicked (malformed document)".to_string(),
        )),
    }
}

/// Join page texts, each followed by a newline.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::with_capacity(pages.iter().map(|p| p.as_ref().len() + 1).sum());
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}

/// Extract the whole document: each page's text followed by a newline.
pub fn try_extract_text(data: &[u8]) -> Result<String> {
    let pages = extract_pages(data)?;
    let text = join_pages(&pages);
    log::debug!("Extracted {} pages ({} bytes of text)", pages.len(), text.len());
    Ok(text)
}

/// Extract the whole document, degrading to an empty string on any failure.
///
/// The failure is logged; an empty result is indistinguishable from a
/// genuinely blank document.
pub fn extract_text(data: &[u8]) -> String {
    try_extract_text(data).unwrap_or_else(|e| {
        log::error!("Error extracting PDF: {}", e);
        String::new()
    })
}

/// Read and extract a PDF file, degrading to an empty string on any failure.
pub fn extract_text_from_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(data) => extract_text(&data),
        Err(e) => {
            log::error!("Error reading PDF {}: {}", path.display(), e);
            String::new()
        }
    }
}
